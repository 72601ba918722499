//! Core track types for beeptrack.
//!
//! Lookup tables, tone parameters and the 3-byte track entry format shared
//! by the stepping engine and the loaders. Nothing here allocates.

#![cfg_attr(not(feature = "std"), no_std)]

mod entry;
mod error;
mod instrument;
mod note_table;
mod tables;
mod tone;

pub use entry::{entries, EntryKind, TrackEntry, ENTRY_SIZE, OP_EMPTY, OP_END};
pub use error::TableError;
pub use instrument::{Channel, DutyMode, Instrument, InstrumentTable};
pub use note_table::{equal_tempered, fill_equal_tempered, NoteTable};
pub use tables::Tables;
pub use tone::{
    ToneParams, ToneWords, ATTACK_SHIFT, DECAY_SHIFT, FREQ2_SHIFT, MODE_SHIFT, RELEASE_SHIFT,
};
