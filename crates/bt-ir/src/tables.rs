//! The lookup tables a track is played against.

use crate::instrument::InstrumentTable;
use crate::note_table::NoteTable;

/// Note and instrument tables, injected into stepping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tables<'a> {
    pub notes: NoteTable<'a>,
    pub instruments: InstrumentTable<'a>,
}

impl Tables<'static> {
    /// 60-note reference tuning with the 9 reference instruments.
    pub const REFERENCE: Tables<'static> = Tables {
        notes: NoteTable::REFERENCE,
        instruments: InstrumentTable::REFERENCE,
    };
}

impl<'a> Tables<'a> {
    pub const fn new(notes: NoteTable<'a>, instruments: InstrumentTable<'a>) -> Self {
        Self { notes, instruments }
    }
}

impl Default for Tables<'static> {
    fn default() -> Self {
        Self::REFERENCE
    }
}
