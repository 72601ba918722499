//! Table validation errors.

/// Error returned when a lookup table cannot be used for playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableError {
    /// The table has no entries
    Empty,
    /// `index` holds a lower frequency than the entry before it
    NotMonotonic { index: usize },
    /// A channel or mode value does not fit in 2 bits
    OutOfRange { field: &'static str, value: u8 },
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::Empty => write!(f, "Table has no entries"),
            TableError::NotMonotonic { index } => {
                write!(f, "Note table decreases at index {}", index)
            }
            TableError::OutOfRange { field, value } => {
                write!(f, "Instrument {} {} is out of range (0-3)", field, value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}
