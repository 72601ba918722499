//! Track entry encoding.
//!
//! A track is a flat byte buffer of 3-byte entries:
//! `[note, duration, flags]`. `note` is an index into the note table or a
//! reserved opcode, `duration` is the wait in ticks before the next entry,
//! and `flags` is reserved.

use crate::note_table::NoteTable;

/// Bytes per track entry.
pub const ENTRY_SIZE: usize = 3;

/// Reserved for unused slots. Past the end of any note table, so it plays as a rest.
pub const OP_EMPTY: u8 = 0xFF;

/// Restarts the track from its first entry.
pub const OP_END: u8 = 0xFE;

/// One decoded track entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackEntry {
    /// Note index or opcode
    pub note: u8,
    /// Encoded duration unit
    pub duration: u8,
    /// Reserved
    pub flags: u8,
}

impl TrackEntry {
    pub const fn new(note: u8, duration: u8) -> Self {
        Self { note, duration, flags: 0 }
    }

    /// An `OP_END` entry.
    pub const fn end() -> Self {
        Self::new(OP_END, 0)
    }

    /// Read entry `index` from a track buffer.
    ///
    /// Panics if the entry lies past the end of `tones`.
    pub fn read(tones: &[u8], index: usize) -> Self {
        let offset = index * ENTRY_SIZE;
        let bytes = &tones[offset..offset + ENTRY_SIZE];
        Self {
            note: bytes[0],
            duration: bytes[1],
            flags: bytes[2],
        }
    }

    pub const fn to_bytes(self) -> [u8; ENTRY_SIZE] {
        [self.note, self.duration, self.flags]
    }

    /// Classify this entry against a note table.
    pub fn kind(&self, notes: &NoteTable<'_>) -> EntryKind {
        match self.note {
            OP_END => EntryKind::End,
            OP_EMPTY => EntryKind::Empty,
            n if notes.contains(n) => EntryKind::Note(n),
            _ => EntryKind::Rest,
        }
    }
}

/// What an entry does when stepped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// Plays the note at this index
    Note(u8),
    /// Note index past the table: silent
    Rest,
    /// Loop marker
    End,
    /// Unused slot (silent, same as a rest)
    Empty,
}

impl EntryKind {
    /// Returns true if stepping this entry calls the host.
    pub fn is_audible(self) -> bool {
        matches!(self, EntryKind::Note(_))
    }
}

/// Iterate over the whole entries in a track buffer. Trailing partial bytes are ignored.
pub fn entries(tones: &[u8]) -> impl Iterator<Item = TrackEntry> + '_ {
    tones.chunks_exact(ENTRY_SIZE).map(|b| TrackEntry {
        note: b[0],
        duration: b[1],
        flags: b[2],
    })
}
