//! `.btrk` track container and headerless raw track loading.
//!
//! Container layout (little-endian):
//!
//! | offset | size | field        |
//! |--------|------|--------------|
//! | 0      | 4    | magic `BTRK` |
//! | 4      | 1    | version (1)  |
//! | 5      | 1    | ticks        |
//! | 6      | 1    | instrument   |
//! | 7      | 1    | volume       |
//! | 8      | 2    | tone_count   |
//! | 10     | 3n   | entries      |

use std::io::Cursor;

use binrw::{binrw, BinRead, BinWrite};
use bt_engine::Track;
use bt_ir::ENTRY_SIZE;

use crate::FormatError;

/// File magic for the track container.
pub const MAGIC: &[u8; 4] = b"BTRK";

/// Only supported container version.
pub const VERSION: u8 = 1;

/// Size of the container header in bytes, magic included.
pub const HEADER_SIZE: usize = 10;

#[binrw]
#[brw(little, magic = b"BTRK")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ContainerHeader {
    version: u8,
    ticks: u8,
    instrument: u8,
    volume: u8,
    tone_count: u16,
}

/// Per-track playback settings stored alongside the entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackSettings {
    /// Release ticks per duration unit
    pub ticks: u8,
    /// Instrument index (wraps around the instrument table)
    pub instrument: u8,
    pub volume: u8,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            ticks: 1,
            instrument: 0,
            volume: 100,
        }
    }
}

/// A loaded track: settings plus an entry buffer whose length is a whole,
/// non-zero number of entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackFile {
    pub settings: TrackSettings,
    tones: Vec<u8>,
}

impl TrackFile {
    /// Wrap an entry buffer, checking it holds a whole, non-zero number of entries.
    pub fn new(settings: TrackSettings, tones: Vec<u8>) -> Result<Self, FormatError> {
        if tones.is_empty() {
            return Err(FormatError::EmptyTrack);
        }
        if tones.len() % ENTRY_SIZE != 0 {
            return Err(FormatError::Misaligned(tones.len()));
        }
        Ok(Self { settings, tones })
    }

    pub fn tones(&self) -> &[u8] {
        &self.tones
    }

    pub fn tone_count(&self) -> usize {
        self.tones.len() / ENTRY_SIZE
    }

    /// A playback cursor borrowing this file's entries.
    pub fn track(&self) -> Track<'_> {
        Track::new(&self.tones, self.tone_count())
            .with_ticks(self.settings.ticks)
            .with_instrument(self.settings.instrument)
            .with_volume(self.settings.volume)
    }

    /// Serialize as a `.btrk` container.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let tone_count = u16::try_from(self.tone_count())
            .map_err(|_| FormatError::TooManyEntries(self.tone_count()))?;
        let header = ContainerHeader {
            version: VERSION,
            ticks: self.settings.ticks,
            instrument: self.settings.instrument,
            volume: self.settings.volume,
            tone_count,
        };

        let mut out = Cursor::new(Vec::with_capacity(HEADER_SIZE + self.tones.len()));
        header.write_le(&mut out).map_err(map_binrw)?;
        let mut bytes = out.into_inner();
        bytes.extend_from_slice(&self.tones);
        Ok(bytes)
    }
}

/// Load a `.btrk` container.
///
/// The entry count in the header must match the data exactly.
pub fn load_track(data: &[u8]) -> Result<TrackFile, FormatError> {
    if !data.starts_with(MAGIC) {
        return Err(FormatError::InvalidHeader);
    }
    if data.len() < HEADER_SIZE {
        return Err(FormatError::UnexpectedEof);
    }

    let header = ContainerHeader::read_le(&mut Cursor::new(data)).map_err(map_binrw)?;

    if header.version != VERSION {
        return Err(FormatError::UnsupportedVersion(header.version));
    }
    if header.tone_count == 0 {
        return Err(FormatError::EmptyTrack);
    }

    let body = &data[HEADER_SIZE..];
    let expected = header.tone_count as usize * ENTRY_SIZE;
    if body.len() < expected {
        return Err(FormatError::UnexpectedEof);
    }
    if body.len() > expected {
        return Err(FormatError::TrailingData(body.len() - expected));
    }

    log::debug!(
        "loaded track: {} entries, ticks {}, instrument {}, volume {}",
        header.tone_count,
        header.ticks,
        header.instrument,
        header.volume
    );

    let settings = TrackSettings {
        ticks: header.ticks,
        instrument: header.instrument,
        volume: header.volume,
    };
    TrackFile::new(settings, body.to_vec())
}

/// Load headerless 3-byte entries with the given settings.
pub fn load_raw(data: &[u8], settings: TrackSettings) -> Result<TrackFile, FormatError> {
    let file = TrackFile::new(settings, data.to_vec())?;
    log::debug!("loaded raw track: {} entries", file.tone_count());
    Ok(file)
}

/// Load a container if `data` starts with the magic, otherwise raw entries.
pub fn load_any(data: &[u8], raw_settings: TrackSettings) -> Result<TrackFile, FormatError> {
    if data.starts_with(MAGIC) {
        load_track(data)
    } else {
        load_raw(data, raw_settings)
    }
}

fn map_binrw(err: binrw::Error) -> FormatError {
    match err {
        binrw::Error::BadMagic { .. } => FormatError::InvalidHeader,
        other => FormatError::Binary(other.to_string()),
    }
}
