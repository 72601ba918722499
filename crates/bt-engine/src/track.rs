//! Track playback state.
//!
//! A track walks a borrowed buffer of 3-byte entries, one transition per
//! tick. While its wait counter is non-zero a tick only counts down; when it
//! reaches zero the next entry is decoded, at most one tone is emitted, and
//! the entry's duration becomes the new wait.

use bt_ir::{Tables, ToneParams, TrackEntry, ENTRY_SIZE, OP_END};

use crate::sink::{play_tone, ToneSink};

/// Where a track is in its tick cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackState {
    /// Counting down before the next entry
    Waiting { remaining: u16 },
    /// The next tick decodes an entry
    Ready,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Counted down; `remaining` ticks left to wait
    Waited { remaining: u16 },
    /// Decoded a note and emitted this tone
    Played(ToneParams),
    /// Decoded a note index past the note table; nothing emitted
    Rest,
    /// Decoded the end marker; the cursor is back at entry 0
    Looped,
}

impl StepOutcome {
    /// The emitted tone, if any.
    pub fn tone(&self) -> Option<&ToneParams> {
        match self {
            StepOutcome::Played(params) => Some(params),
            _ => None,
        }
    }
}

/// One monophonic sequence of entries and its playback cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track<'a> {
    /// Next entry index, always in `0..tone_count`
    next: usize,
    /// Ticks left before the next decode
    wait: u16,
    /// Release ticks per duration unit
    ticks: u8,
    /// Instrument index, wrapped by the instrument table
    instrument: u8,
    volume: u8,
    tones: &'a [u8],
    tone_count: usize,
}

impl<'a> Track<'a> {
    /// Create a track over `tone_count` entries of `tones`.
    ///
    /// The caller guarantees `tones` holds at least `tone_count` entries.
    /// A mismatch is not recovered from: reading a missing entry panics.
    pub fn new(tones: &'a [u8], tone_count: usize) -> Self {
        assert!(tone_count > 0, "track must have at least one entry");
        debug_assert!(
            tones.len() >= tone_count * ENTRY_SIZE,
            "{} entries do not fit in {} bytes",
            tone_count,
            tones.len()
        );
        Self {
            next: 0,
            wait: 0,
            ticks: 1,
            instrument: 0,
            volume: 100,
            tones,
            tone_count,
        }
    }

    /// Create a track over every whole entry in `tones`.
    pub fn from_entries(tones: &'a [u8]) -> Self {
        Self::new(tones, tones.len() / ENTRY_SIZE)
    }

    pub fn with_ticks(mut self, ticks: u8) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_instrument(mut self, instrument: u8) -> Self {
        self.instrument = instrument;
        self
    }

    pub fn with_volume(mut self, volume: u8) -> Self {
        self.volume = volume;
        self
    }

    pub fn state(&self) -> TrackState {
        if self.wait > 0 {
            TrackState::Waiting { remaining: self.wait }
        } else {
            TrackState::Ready
        }
    }

    /// Run one tick's transition without touching the host.
    pub fn advance(&mut self, tables: &Tables<'_>) -> StepOutcome {
        match self.state() {
            TrackState::Waiting { remaining } => {
                self.wait = remaining - 1;
                StepOutcome::Waited { remaining: self.wait }
            }
            TrackState::Ready => self.decode_next(tables),
        }
    }

    /// Run one tick, emitting at most one tone to `sink`.
    pub fn step<S: ToneSink + ?Sized>(&mut self, tables: &Tables<'_>, sink: &mut S) -> StepOutcome {
        let outcome = self.advance(tables);
        if let StepOutcome::Played(params) = &outcome {
            play_tone(params, sink);
        }
        outcome
    }

    fn decode_next(&mut self, tables: &Tables<'_>) -> StepOutcome {
        let entry = TrackEntry::read(self.tones, self.next);

        let outcome = match tables.notes.get(entry.note as usize) {
            Some(frequency) => {
                let instrument = tables.instruments.resolve(self.instrument);
                let params = ToneParams {
                    freq1: frequency as u32,
                    freq2: 0,
                    attack: 0,
                    decay: 0,
                    sustain: 0,
                    release: entry.duration as u32 * self.ticks as u32,
                    volume: self.volume as u32,
                    channel: instrument.channel as u32,
                    mode: instrument.mode as u32,
                };
                log::trace!(
                    "entry {}: note {} -> {} Hz on {}",
                    self.next,
                    entry.note,
                    frequency,
                    instrument.label()
                );
                StepOutcome::Played(params)
            }
            None if entry.note == OP_END => StepOutcome::Looped,
            None => StepOutcome::Rest,
        };

        self.next = (self.next + 1) % self.tone_count;
        self.wait = entry.duration as u16;

        if entry.note == OP_END {
            log::debug!("end marker, restarting track");
            self.next = 0;
        }

        outcome
    }

    /// Restart from the first entry with no pending wait.
    pub fn reset(&mut self) {
        self.next = 0;
        self.wait = 0;
    }

    pub fn next(&self) -> usize {
        self.next
    }

    pub fn wait(&self) -> u16 {
        self.wait
    }

    pub fn ticks(&self) -> u8 {
        self.ticks
    }

    pub fn instrument(&self) -> u8 {
        self.instrument
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn tone_count(&self) -> usize {
        self.tone_count
    }

    pub fn tones(&self) -> &'a [u8] {
        self.tones
    }

    pub fn set_instrument(&mut self, instrument: u8) {
        self.instrument = instrument;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
    }
}
