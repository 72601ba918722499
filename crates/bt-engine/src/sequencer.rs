//! Steps several independent tracks against shared tables.

use bt_ir::{Tables, ToneParams};

use crate::sink::{play_tone, ToneSink};
use crate::track::{StepOutcome, Track};

/// A fixed-capacity group of tracks stepped together once per tick.
///
/// Tracks do not interact: each keeps its own cursor and wait counter, and
/// their host calls only stay disjoint if they are authored on different
/// channels.
#[derive(Clone, Debug)]
pub struct Sequencer<'a, const N: usize> {
    tables: Tables<'a>,
    tracks: heapless::Vec<Track<'a>, N>,
    ticks_elapsed: u64,
}

impl<'a, const N: usize> Sequencer<'a, N> {
    pub fn new(tables: Tables<'a>) -> Self {
        Self {
            tables,
            tracks: heapless::Vec::new(),
            ticks_elapsed: 0,
        }
    }

    /// Add a track. Hands the track back if the sequencer is full.
    pub fn add_track(&mut self, track: Track<'a>) -> Result<usize, Track<'a>> {
        self.tracks.push(track)?;
        Ok(self.tracks.len() - 1)
    }

    /// Step every track once, sending emitted tones to `sink`.
    pub fn tick<S: ToneSink + ?Sized>(&mut self, sink: &mut S) {
        self.tick_with(|_, params| play_tone(params, sink));
    }

    /// Step every track once, passing each emitted tone and its track index to `on_tone`.
    pub fn tick_with<F: FnMut(usize, &ToneParams)>(&mut self, mut on_tone: F) {
        #[cfg(feature = "alloc_check")]
        assert_no_alloc::assert_no_alloc(|| self.step_tracks(&mut on_tone));
        #[cfg(not(feature = "alloc_check"))]
        self.step_tracks(&mut on_tone);

        self.ticks_elapsed += 1;
    }

    fn step_tracks<F: FnMut(usize, &ToneParams)>(&mut self, on_tone: &mut F) {
        let tables = &self.tables;
        for (index, track) in self.tracks.iter_mut().enumerate() {
            if let StepOutcome::Played(params) = track.advance(tables) {
                on_tone(index, &params);
            }
        }
    }

    /// Restart every track and the tick counter.
    pub fn reset(&mut self) {
        for track in self.tracks.iter_mut() {
            track.reset();
        }
        self.ticks_elapsed = 0;
    }

    pub fn tables(&self) -> &Tables<'a> {
        &self.tables
    }

    pub fn track(&self, index: usize) -> Option<&Track<'a>> {
        self.tracks.get(index)
    }

    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track<'a>> {
        self.tracks.get_mut(index)
    }

    pub fn tracks(&self) -> &[Track<'a>] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks_elapsed
    }
}
