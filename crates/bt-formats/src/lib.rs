//! Track loading for beeptrack.
//!
//! Loads `.btrk` containers and headerless entry dumps into [`TrackFile`]s,
//! checking that the entry count matches the data so playback never reads
//! past the buffer.

mod listing;
mod track_format;

pub use listing::{disassemble, EntryListing};
pub use track_format::{
    load_any, load_raw, load_track, TrackFile, TrackSettings, HEADER_SIZE, MAGIC, VERSION,
};

/// Error type for track loading.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Missing or wrong magic bytes
    #[error("not a track container (bad magic)")]
    InvalidHeader,
    /// Container version this loader does not know
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),
    /// Header or entries cut short
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// Bytes left over after the declared entries
    #[error("{0} trailing bytes after the last entry")]
    TrailingData(usize),
    /// Raw data that is not a whole number of entries
    #[error("{0} bytes is not a whole number of 3-byte entries")]
    Misaligned(usize),
    /// A track needs at least one entry
    #[error("track has no entries")]
    EmptyTrack,
    /// Too many entries for the container's 16-bit count
    #[error("{0} entries exceed the container limit of 65535")]
    TooManyEntries(usize),
    /// Other binary read/write failure
    #[error("binary format error: {0}")]
    Binary(String),
}
