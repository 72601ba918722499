//! Headless controller for beeptrack.
//!
//! Loads tracks and tables, then drives them either offline (collecting a
//! trace of host tone calls) or in real time at the configured tick rate.

mod config;
mod trace;

use bt_engine::Sequencer;
use bt_formats::{FormatError, TrackFile, TrackSettings};
use bt_ir::Tables;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

// Re-export common types so callers don't need bt-ir/bt-formats directly.
pub use bt_ir::ToneWords;
pub use config::{
    ConfigError, InstrumentEntry, NotesSection, OwnedTables, PlayerConfig, MAX_NOTES,
};
pub use trace::{trace_to_string, write_trace, TraceEvent, TRACE_HEADER};

/// Tracks played together, one per host channel.
pub const MAX_TRACKS: usize = 4;

/// Error type for controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{path}: {source}")]
    Format {
        path: PathBuf,
        source: FormatError,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("too many tracks ({0}), at most {max} play together", max = MAX_TRACKS)]
    TooManyTracks(usize),
}

/// Headless player: owns the loaded tracks and tables and drives playback.
pub struct Controller {
    config: PlayerConfig,
    tables: OwnedTables,
    files: Vec<TrackFile>,
}

impl Controller {
    /// Validate `config` and build its tables.
    pub fn new(config: PlayerConfig) -> Result<Self, ControllerError> {
        let tables = OwnedTables::from_config(&config)?;
        Ok(Self {
            config,
            tables,
            files: Vec::new(),
        })
    }

    // --- Track management ---

    pub fn add_track(&mut self, file: TrackFile) -> Result<usize, ControllerError> {
        if self.files.len() >= MAX_TRACKS {
            return Err(ControllerError::TooManyTracks(self.files.len() + 1));
        }
        self.files.push(file);
        Ok(self.files.len() - 1)
    }

    /// Load a container or raw track file. `raw_settings` apply to raw files only.
    pub fn add_file(
        &mut self,
        path: &Path,
        raw_settings: TrackSettings,
    ) -> Result<usize, ControllerError> {
        let data = std::fs::read(path).map_err(|source| ControllerError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = bt_formats::load_any(&data, raw_settings).map_err(|source| {
            ControllerError::Format {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::info!("{}: {} entries", path.display(), file.tone_count());
        self.add_track(file)
    }

    pub fn tracks(&self) -> &[TrackFile] {
        &self.files
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn tables(&self) -> Tables<'_> {
        self.tables.tables()
    }

    fn sequencer(&self) -> Sequencer<'_, MAX_TRACKS> {
        let mut seq = Sequencer::new(self.tables());
        for file in &self.files {
            // add_track caps files at MAX_TRACKS
            let _ = seq.add_track(file.track());
        }
        seq
    }

    // --- Offline tracing ---

    /// Step every track for `ticks` ticks and record each host call.
    pub fn trace(&self, ticks: u64) -> Vec<TraceEvent> {
        let mut seq = self.sequencer();
        let mut events = Vec::new();
        for tick in 0..ticks {
            seq.tick_with(|track, params| {
                events.push(TraceEvent {
                    tick,
                    track,
                    words: params.pack(),
                })
            });
        }
        events
    }

    // --- Real-time playback ---

    /// Drive playback at the configured tick rate, reporting each host call
    /// as it happens.
    ///
    /// Runs until `ticks` ticks have elapsed (forever when `None`) or `stop`
    /// is set. Returns the number of ticks played.
    pub fn run_realtime<F: FnMut(&TraceEvent)>(
        &self,
        ticks: Option<u64>,
        stop: &AtomicBool,
        mut on_event: F,
    ) -> u64 {
        let period = Duration::from_secs(1) / self.config.tick_rate;
        let mut seq = self.sequencer();
        let mut deadline = Instant::now();

        log::info!("playing {} tracks at {} Hz", seq.len(), self.config.tick_rate);

        while !stop.load(Ordering::Relaxed) && ticks.map_or(true, |t| seq.ticks_elapsed() < t) {
            let tick = seq.ticks_elapsed();
            seq.tick_with(|track, params| {
                on_event(&TraceEvent {
                    tick,
                    track,
                    words: params.pack(),
                })
            });

            deadline += period;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            } else if now - deadline > period * 4 {
                log::warn!("driver fell behind by {:?}, resyncing", now - deadline);
                deadline = now;
            }
        }

        seq.ticks_elapsed()
    }
}
