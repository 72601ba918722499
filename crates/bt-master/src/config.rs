//! Player configuration file.
//!
//! ```toml
//! tick_rate = 60
//!
//! [notes]
//! base_hz = 65.406
//! count = 60
//!
//! [[instruments]]
//! channel = 2
//!
//! [[instruments]]
//! channel = 0
//! mode = 2
//! ```

use bt_ir::{fill_equal_tempered, Instrument, InstrumentTable, NoteTable, TableError, Tables};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid table: {0}")]
    Table(#[from] TableError),
    #[error("tick_rate must be greater than zero")]
    InvalidTickRate,
    #[error("[notes] takes either `frequencies` or `base_hz` + `count`, not both")]
    NotesConflict,
    #[error("[notes] `count` needs a `base_hz`")]
    MissingBaseHz,
    #[error("{0} notes configured, at most {max} are addressable", max = MAX_NOTES)]
    TooManyNotes(usize),
}

/// Note indices are a byte, so entries past this are never played.
pub const MAX_NOTES: usize = 256;

/// Top-level player configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    /// Ticks per second for the real-time driver.
    /// Default: 60
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,

    /// Note table. Default: the 60-note reference tuning.
    #[serde(default)]
    pub notes: NotesSection,

    /// Instrument table. Default: the 9 reference instruments.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<InstrumentEntry>,
}

fn default_tick_rate() -> u32 {
    60
}

fn default_instruments() -> Vec<InstrumentEntry> {
    InstrumentTable::REFERENCE
        .as_slice()
        .iter()
        .map(|i| InstrumentEntry {
            channel: i.channel as u8,
            mode: i.mode as u8,
        })
        .collect()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            notes: NotesSection::default(),
            instruments: default_instruments(),
        }
    }
}

/// `[notes]`: explicit frequencies, or an equal-tempered scale.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotesSection {
    pub frequencies: Option<Vec<u16>>,
    pub base_hz: Option<f32>,
    pub count: Option<usize>,
}

/// One `[[instruments]]` entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentEntry {
    pub channel: u8,
    #[serde(default)]
    pub mode: u8,
}

impl PlayerConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the limits serde cannot express. Table contents are checked
    /// when building [`OwnedTables`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        let notes = self
            .notes
            .frequencies
            .as_ref()
            .map(Vec::len)
            .or(self.notes.count)
            .unwrap_or(0);
        if notes > MAX_NOTES {
            return Err(ConfigError::TooManyNotes(notes));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

/// Validated tables built from a [`PlayerConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedTables {
    notes: Vec<u16>,
    instruments: Vec<Instrument>,
}

impl OwnedTables {
    pub fn from_config(config: &PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let notes = match (&config.notes.frequencies, config.notes.base_hz, config.notes.count) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => return Err(ConfigError::NotesConflict),
            (Some(frequencies), None, None) => frequencies.clone(),
            (None, Some(base_hz), count) => {
                let mut table = vec![0u16; count.unwrap_or(NoteTable::REFERENCE.len())];
                fill_equal_tempered(&mut table, base_hz);
                table
            }
            (None, None, Some(_)) => return Err(ConfigError::MissingBaseHz),
            (None, None, None) => NoteTable::REFERENCE.as_slice().to_vec(),
        };
        NoteTable::new(&notes)?;

        let instruments = config
            .instruments
            .iter()
            .map(|e| Instrument::from_raw(e.channel, e.mode))
            .collect::<Result<Vec<_>, _>>()?;
        InstrumentTable::new(&instruments)?;

        Ok(Self { notes, instruments })
    }

    pub fn tables(&self) -> Tables<'_> {
        Tables::new(
            NoteTable::new(&self.notes).expect("note table validated at construction"),
            InstrumentTable::new(&self.instruments)
                .expect("instrument table validated at construction"),
        )
    }
}

impl Default for OwnedTables {
    fn default() -> Self {
        Self {
            notes: NoteTable::REFERENCE.as_slice().to_vec(),
            instruments: InstrumentTable::REFERENCE.as_slice().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_ir::{Channel, DutyMode};

    #[test]
    fn empty_config_uses_reference() {
        let config = PlayerConfig::from_toml("").unwrap();
        assert_eq!(config, PlayerConfig::default());

        let tables = OwnedTables::from_config(&config).unwrap();
        assert_eq!(tables.tables(), Tables::REFERENCE);
    }

    #[test]
    fn explicit_frequencies() {
        let config = PlayerConfig::from_toml(
            r#"
            tick_rate = 30

            [notes]
            frequencies = [220, 440, 880]

            [[instruments]]
            channel = 1
            mode = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.tick_rate, 30);

        let owned = OwnedTables::from_config(&config).unwrap();
        let tables = owned.tables();
        assert_eq!(tables.notes.as_slice(), &[220, 440, 880]);
        assert_eq!(
            tables.instruments.resolve(7),
            Instrument::new(Channel::Pulse2, DutyMode::ThreeQuarters)
        );
    }

    #[test]
    fn equal_tempered_notes() {
        let config = PlayerConfig::from_toml("[notes]\nbase_hz = 110.0\ncount = 13\n").unwrap();
        let owned = OwnedTables::from_config(&config).unwrap();
        let tables = owned.tables();
        assert_eq!(tables.notes.len(), 13);
        assert_eq!(tables.notes.get(12), Some(220));
    }

    #[test]
    fn zero_tick_rate_rejected() {
        assert!(matches!(
            PlayerConfig::from_toml("tick_rate = 0"),
            Err(ConfigError::InvalidTickRate)
        ));
    }

    #[test]
    fn zero_tick_rate_rejected_without_toml() {
        let config = PlayerConfig { tick_rate: 0, ..PlayerConfig::default() };
        assert!(matches!(
            OwnedTables::from_config(&config),
            Err(ConfigError::InvalidTickRate)
        ));
    }

    #[test]
    fn oversized_note_tables_rejected() {
        assert!(matches!(
            PlayerConfig::from_toml("[notes]\nbase_hz = 20.0\ncount = 10000000000\n"),
            Err(ConfigError::TooManyNotes(10_000_000_000))
        ));

        let config = PlayerConfig {
            notes: NotesSection { frequencies: Some(vec![100; 257]), ..NotesSection::default() },
            ..PlayerConfig::default()
        };
        assert!(matches!(
            OwnedTables::from_config(&config),
            Err(ConfigError::TooManyNotes(257))
        ));

        let config = PlayerConfig::from_toml("[notes]\nbase_hz = 20.0\ncount = 256\n").unwrap();
        assert_eq!(OwnedTables::from_config(&config).unwrap().tables().notes.len(), 256);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(matches!(PlayerConfig::from_toml("tempo = 5"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn decreasing_notes_rejected() {
        let config = PlayerConfig::from_toml("[notes]\nfrequencies = [300, 200]\n").unwrap();
        assert!(matches!(
            OwnedTables::from_config(&config),
            Err(ConfigError::Table(TableError::NotMonotonic { index: 1 }))
        ));
    }

    #[test]
    fn conflicting_notes_rejected() {
        let config =
            PlayerConfig::from_toml("[notes]\nfrequencies = [1]\nbase_hz = 100.0\n").unwrap();
        assert!(matches!(OwnedTables::from_config(&config), Err(ConfigError::NotesConflict)));

        let config = PlayerConfig::from_toml("[notes]\ncount = 12\n").unwrap();
        assert!(matches!(OwnedTables::from_config(&config), Err(ConfigError::MissingBaseHz)));
    }

    #[test]
    fn empty_instrument_list_rejected() {
        let config = PlayerConfig::from_toml("instruments = []").unwrap();
        assert!(matches!(
            OwnedTables::from_config(&config),
            Err(ConfigError::Table(TableError::Empty))
        ));
    }

    #[test]
    fn wide_channel_rejected() {
        let config = PlayerConfig::from_toml("[[instruments]]\nchannel = 4\n").unwrap();
        assert!(matches!(
            OwnedTables::from_config(&config),
            Err(ConfigError::Table(TableError::OutOfRange { field: "channel", value: 4 }))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = PlayerConfig::load(Path::new("/nonexistent/beeptrack.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("player.toml");
        std::fs::write(&path, "tick_rate = 120\n").unwrap();
        assert_eq!(PlayerConfig::load(&path).unwrap().tick_rate, 120);
    }
}
