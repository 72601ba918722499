//! Allocation-free stepping tests.
//!
//! Steps real fixture tracks for thousands of ticks under `assert_no_alloc`,
//! covering rests, the empty opcode, end markers and modulo wrap-around.
//!
//! Just run `cargo test`. `--features alloc_check` additionally wraps every
//! `Sequencer::tick` in its own check.

use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use bt_engine::{RecordingSink, Sequencer, Track};
use bt_formats::{TrackFile, TrackSettings};
use bt_ir::Tables;
use std::fs;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(name: &str) -> TrackFile {
    let data = fs::read(fixtures_dir().join("tracks").join(name)).unwrap();
    bt_formats::load_any(&data, TrackSettings::default()).unwrap()
}

/// Step one track for `ticks`, aborting on any heap allocation.
fn assert_track_alloc_free(file: &TrackFile, ticks: usize) {
    let tables = Tables::REFERENCE;
    let mut track = file.track();
    let mut sink = RecordingSink::<64>::new();

    assert_no_alloc(|| {
        for _ in 0..ticks {
            track.step(&tables, &mut sink);
        }
    });

    assert!(!sink.is_empty());
}

#[test]
fn melody_alloc_free() {
    assert_track_alloc_free(&load("melody.btrk"), 10_000);
}

#[test]
fn raw_bass_alloc_free() {
    assert_track_alloc_free(&load("bass.bin"), 10_000);
}

#[test]
fn wrapping_arpeggio_alloc_free() {
    assert_track_alloc_free(&load("arpeggio.btrk"), 10_000);
}

#[test]
fn sequencer_alloc_free() {
    let files = [load("melody.btrk"), load("bass.bin"), load("arpeggio.btrk")];
    let mut seq = Sequencer::<4>::new(Tables::REFERENCE);
    for file in &files {
        seq.add_track(file.track()).unwrap();
    }

    let mut calls = 0usize;
    assert_no_alloc(|| {
        for _ in 0..10_000 {
            seq.tick_with(|_, _| calls += 1);
        }
        seq.reset();
        for _ in 0..100 {
            seq.tick_with(|_, _| calls += 1);
        }
    });

    assert!(calls > 0);
    assert_eq!(seq.ticks_elapsed(), 100);
}

#[test]
fn closure_sink_alloc_free() {
    let tones = [33u8, 1, 0, 0xFE, 0, 0];
    let mut track = Track::from_entries(&tones);
    let tables = Tables::REFERENCE;
    let mut last = 0u32;

    assert_no_alloc(|| {
        for _ in 0..1_000 {
            track.step(&tables, &mut |frequency: u32, _: u32, _: u32, _: u32| last = frequency);
        }
    });

    assert_eq!(last, 440);
}
