//! Track stepping engine for beeptrack.
//!
//! Decodes track entries one tick at a time and forwards tones to the host
//! synthesizer through [`ToneSink`]. The stepping path never allocates.

#![cfg_attr(not(feature = "std"), no_std)]

mod sequencer;
mod sink;
mod track;

pub use sequencer::Sequencer;
pub use sink::{play_tone, NullSink, RecordingSink, ToneSink};
pub use track::{StepOutcome, Track, TrackState};
