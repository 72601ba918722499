//! End-to-end playback of fixture tracks through the controller.

use bt_formats::TrackSettings;
use bt_master::{trace_to_string, Controller, PlayerConfig, TraceEvent, ToneWords};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn controller(config: PlayerConfig, tracks: &[&str]) -> Controller {
    let mut ctrl = Controller::new(config).unwrap();
    for name in tracks {
        let path = fixtures_dir().join("tracks").join(name);
        ctrl.add_file(&path, TrackSettings::default()).unwrap();
    }
    ctrl
}

fn ticks_and_frequencies(events: &[TraceEvent]) -> Vec<(u64, u32)> {
    events.iter().map(|e| (e.tick, e.words.frequency)).collect()
}

#[test]
fn melody_first_loop() {
    let ctrl = controller(PlayerConfig::default(), &["melody.btrk"]);
    let events = ctrl.trace(25);

    // The empty opcode and note 70 rest; the end marker loops back on tick 24
    assert_eq!(
        ticks_and_frequencies(&events),
        vec![(0, 440), (5, 490), (10, 550), (16, 600)]
    );

    // ticks = 2, instrument 1 (pulse1 50%), volume 80
    assert_eq!(
        events[0].words,
        ToneWords { frequency: 440, envelope: 8 << 8, volume: 80, flags: 2 << 2 }
    );
    assert_eq!(events[2].words.envelope, 4 << 8);
}

#[test]
fn melody_loops_with_fixed_period() {
    let ctrl = controller(PlayerConfig::default(), &["melody.btrk"]);
    let events = ctrl.trace(100);

    assert_eq!(events.len(), 16);
    for (a, b) in events.iter().zip(events.iter().skip(4)) {
        assert_eq!(b.tick - a.tick, 25);
        assert_eq!(a.words, b.words);
    }
}

#[test]
fn raw_file_uses_given_settings() {
    let path = fixtures_dir().join("tracks/bass.bin");
    let mut ctrl = Controller::new(PlayerConfig::default()).unwrap();
    let settings = TrackSettings { ticks: 3, instrument: 0, volume: 50 };
    ctrl.add_file(&path, settings).unwrap();

    let events = ctrl.trace(20);
    assert_eq!(ticks_and_frequencies(&events), vec![(0, 110), (9, 85), (19, 110)]);
    assert_eq!(
        events[0].words,
        ToneWords { frequency: 110, envelope: 24 << 8, volume: 50, flags: 2 }
    );
}

#[test]
fn cursor_wraps_without_end_marker() {
    let ctrl = controller(PlayerConfig::default(), &["arpeggio.btrk"]);
    let events = ctrl.trace(12);

    assert_eq!(
        ticks_and_frequencies(&events),
        vec![(0, 260), (2, 330), (4, 390), (6, 260), (8, 330), (10, 390)]
    );
    // instrument 4: pulse1 12.5%
    assert!(events.iter().all(|e| e.words.flags == 0 && e.words.volume == 60));
}

#[test]
fn tracks_play_side_by_side() {
    let ctrl = controller(
        PlayerConfig::default(),
        &["melody.btrk", "bass.bin", "arpeggio.btrk"],
    );
    let events = ctrl.trace(1);

    let tracks: Vec<usize> = events.iter().map(|e| e.track).collect();
    assert_eq!(tracks, vec![0, 1, 2]);
    assert_eq!(ticks_and_frequencies(&events), vec![(0, 440), (0, 110), (0, 260)]);
}

#[test]
fn configured_tuning_and_instruments() {
    let config = PlayerConfig::load(&fixtures_dir().join("config/a440.toml")).unwrap();
    assert_eq!(config.tick_rate, 120);
    let ctrl = controller(config, &["melody.btrk"]);
    let events = ctrl.trace(25);

    // Only 37 notes: entries 37 and 38 now rest as well
    assert_eq!(ticks_and_frequencies(&events), vec![(0, 740), (5, 831)]);
    // instrument 1 of 2: pulse2 25%
    assert_eq!(events[0].words.flags, 1 | (1 << 2));
}

#[test]
fn truncated_container_rejected() {
    let path = fixtures_dir().join("tracks/truncated.btrk");
    let mut ctrl = Controller::new(PlayerConfig::default()).unwrap();
    let err = ctrl.add_file(&path, TrackSettings::default()).unwrap_err();
    assert!(err.to_string().contains("truncated.btrk"));
    assert!(ctrl.tracks().is_empty());
}

#[test]
fn trace_text_layout() {
    let ctrl = controller(PlayerConfig::default(), &["arpeggio.btrk"]);
    let text = trace_to_string(&ctrl.trace(3));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "       0     0  0x00000104 0x00000100  60 0x00");
    assert_eq!(lines[2], "       2     0  0x0000014A 0x00000100  60 0x00");
}
