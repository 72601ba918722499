//! Human-readable track listings.

use std::fmt;

use bt_ir::{entries, EntryKind, NoteTable, TrackEntry};

use crate::track_format::TrackFile;

/// One disassembled entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryListing {
    pub index: usize,
    pub entry: TrackEntry,
    pub kind: EntryKind,
    /// Frequency when the entry plays a note
    pub frequency: Option<u16>,
}

impl fmt::Display for EntryListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.entry;
        write!(f, "{:04}  {:02X} {:02X} {:02X}  ", self.index, e.note, e.duration, e.flags)?;
        match (self.kind, self.frequency) {
            (EntryKind::Note(n), Some(hz)) => write!(f, "note {:>3} {:>5} Hz", n, hz)?,
            (EntryKind::Note(n), None) => write!(f, "note {:>3}", n)?,
            (EntryKind::Rest, _) => write!(f, "rest")?,
            (EntryKind::Empty, _) => write!(f, "empty")?,
            (EntryKind::End, _) => return write!(f, "end -> 0000"),
        }
        write!(f, "  wait {}", e.duration)
    }
}

/// List every entry of a track against a note table.
pub fn disassemble(file: &TrackFile, notes: &NoteTable<'_>) -> Vec<EntryListing> {
    entries(file.tones())
        .enumerate()
        .map(|(index, entry)| {
            let kind = entry.kind(notes);
            let frequency = match kind {
                EntryKind::Note(n) => notes.get(n as usize),
                _ => None,
            };
            EntryListing { index, entry, kind, frequency }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track_format::TrackSettings;
    use bt_ir::{OP_EMPTY, OP_END};

    #[test]
    fn lists_every_kind() {
        let tones = vec![33, 4, 0, 60, 2, 0, OP_EMPTY, 5, 0, OP_END, 0, 0];
        let file = TrackFile::new(TrackSettings::default(), tones).unwrap();
        let rows = disassemble(&file, &NoteTable::REFERENCE);

        let kinds: Vec<_> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Note(33), EntryKind::Rest, EntryKind::Empty, EntryKind::End]
        );
        assert_eq!(rows[0].frequency, Some(440));
        assert_eq!(rows[1].frequency, None);
    }

    #[test]
    fn display_format() {
        let tones = vec![33, 4, 0, OP_END, 0, 0];
        let file = TrackFile::new(TrackSettings::default(), tones).unwrap();
        let rows = disassemble(&file, &NoteTable::REFERENCE);

        assert_eq!(rows[0].to_string(), "0000  21 04 00  note  33   440 Hz  wait 4");
        assert_eq!(rows[1].to_string(), "0001  FE 00 00  end -> 0000");
    }
}
