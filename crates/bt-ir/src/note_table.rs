//! Note-index to frequency lookup.

use crate::error::TableError;

/// Reference tuning: 60 notes from C2 to B6, hand-rounded to 5/10 Hz steps.
const REFERENCE_FREQUENCIES: [u16; 60] = [
    65, 70, 75, 80, 85, 90, 95, 100, 105, 110, 115, 125, // C2-B2
    130, 140, 150, 160, 170, 180, 190, 200, 210, 220, 230, 250, // C3-B3
    260, 280, 290, 310, 330, 350, 370, 390, 410, 440, 460, 490, // C4-B4
    520, 550, 600, 620, 660, 700, 750, 780, 840, 880, 940, 980, // C5-B5
    1050, 1110, 1170, 1240, 1320, 1400, 1480, 1570, 1660, 1760, 1860, 1980, // C6-B6
];

/// An ordered table of note frequencies.
///
/// Frequencies never decrease with the index, so comparing note indices
/// compares pitches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoteTable<'a> {
    frequencies: &'a [u16],
}

impl NoteTable<'static> {
    /// The 60-note reference tuning.
    pub const REFERENCE: NoteTable<'static> = NoteTable {
        frequencies: &REFERENCE_FREQUENCIES,
    };
}

impl<'a> NoteTable<'a> {
    /// Wrap a frequency slice, checking it is non-empty and non-decreasing.
    pub fn new(frequencies: &'a [u16]) -> Result<Self, TableError> {
        if frequencies.is_empty() {
            return Err(TableError::Empty);
        }
        if let Some(index) = frequencies.windows(2).position(|w| w[1] < w[0]) {
            return Err(TableError::NotMonotonic { index: index + 1 });
        }
        Ok(Self { frequencies })
    }

    /// Frequency for a note index, if the index is a pitch.
    pub fn get(&self, note: usize) -> Option<u16> {
        self.frequencies.get(note).copied()
    }

    /// Returns true if `note` names a pitch rather than a rest or opcode.
    pub fn contains(&self, note: u8) -> bool {
        (note as usize) < self.frequencies.len()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn as_slice(&self) -> &'a [u16] {
        self.frequencies
    }
}

impl Default for NoteTable<'static> {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Fill `out` with an equal-tempered scale starting at `base_hz`.
///
/// Entry `i` is `base_hz * 2^(i/12)`, rounded and clamped to `u16`.
pub fn fill_equal_tempered(out: &mut [u16], base_hz: f32) {
    for (i, slot) in out.iter_mut().enumerate() {
        let hz = base_hz * libm::powf(2.0, i as f32 / 12.0);
        *slot = libm::roundf(hz).clamp(0.0, u16::MAX as f32) as u16;
    }
}

/// Build an `N`-note equal-tempered scale starting at `base_hz`.
pub fn equal_tempered<const N: usize>(base_hz: f32) -> [u16; N] {
    let mut table = [0u16; N];
    fill_equal_tempered(&mut table, base_hz);
    table
}
