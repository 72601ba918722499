//! beeptrack CLI: inspect, trace and play tracks headlessly.
//!
//! Usage:
//!   bt-cli dump song.btrk
//!   bt-cli trace lead.btrk bass.btrk --ticks 600 --out trace.txt
//!   bt-cli play lead.bin --ticks-per-unit 4 --instrument 1

use anyhow::{Context, Result};
use bt_formats::TrackSettings;
use bt_master::{write_trace, Controller, PlayerConfig, TRACE_HEADER};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bt-cli")]
#[command(about = "Headless driver for byte-encoded beep tracks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a track's settings and entry listing
    Dump {
        /// Path to a .btrk container or raw entry file
        file: PathBuf,

        /// Player config (for the note table)
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        raw: RawArgs,
    },
    /// Step tracks offline and write every tone call
    Trace {
        /// Tracks to play together (at most 4)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number of ticks to run
        #[arg(long, default_value_t = 600)]
        ticks: u64,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the trace here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,

        #[command(flatten)]
        raw: RawArgs,
    },
    /// Step tracks in real time, printing each tone call as it happens
    Play {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Stop after this many ticks (default: play until interrupted)
        #[arg(long)]
        ticks: Option<u64>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        raw: RawArgs,
    },
}

/// Settings for headerless files. Containers carry their own.
#[derive(Args)]
struct RawArgs {
    /// Release ticks per duration unit
    #[arg(long, default_value_t = 1)]
    ticks_per_unit: u8,

    /// Instrument index
    #[arg(long, default_value_t = 0)]
    instrument: u8,

    #[arg(long, default_value_t = 100)]
    volume: u8,
}

impl RawArgs {
    fn settings(&self) -> TrackSettings {
        TrackSettings {
            ticks: self.ticks_per_unit,
            instrument: self.instrument,
            volume: self.volume,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { file, config, raw } => dump(&file, config.as_deref(), &raw),
        Commands::Trace {
            files,
            ticks,
            config,
            out,
            raw,
        } => trace(&files, ticks, config.as_deref(), out.as_deref(), &raw),
        Commands::Play {
            files,
            ticks,
            config,
            raw,
        } => play(&files, ticks, config.as_deref(), &raw),
    }
}

fn controller(files: &[PathBuf], config: Option<&Path>, raw: &RawArgs) -> Result<Controller> {
    let config = match config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };
    let mut ctrl = Controller::new(config)?;
    for path in files {
        ctrl.add_file(path, raw.settings())?;
    }
    Ok(ctrl)
}

fn dump(file: &Path, config: Option<&Path>, raw: &RawArgs) -> Result<()> {
    let ctrl = controller(&[file.to_path_buf()], config, raw)?;
    let Some(track) = ctrl.tracks().first() else {
        return Ok(());
    };

    println!("File:       {}", file.display());
    println!("Entries:    {}", track.tone_count());
    println!("Ticks/unit: {}", track.settings.ticks);
    println!("Instrument: {}", track.settings.instrument);
    println!("Volume:     {}", track.settings.volume);
    println!();

    for row in bt_formats::disassemble(track, &ctrl.tables().notes) {
        println!("{}", row);
    }
    Ok(())
}

fn trace(
    files: &[PathBuf],
    ticks: u64,
    config: Option<&Path>,
    out: Option<&Path>,
    raw: &RawArgs,
) -> Result<()> {
    let ctrl = controller(files, config, raw)?;
    let events = ctrl.trace(ticks);
    tracing::info!("{} tone calls in {} ticks", events.len(), ticks);

    match out {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            let mut w = BufWriter::new(file);
            write_trace(&mut w, &events)?;
            w.flush()?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_trace(&mut stdout.lock(), &events)?;
        }
    }
    Ok(())
}

fn play(files: &[PathBuf], ticks: Option<u64>, config: Option<&Path>, raw: &RawArgs) -> Result<()> {
    let ctrl = controller(files, config, raw)?;
    // Never set: Ctrl-C ends the process
    let stop = AtomicBool::new(false);

    println!("{}", TRACE_HEADER);
    let played = ctrl.run_realtime(ticks, &stop, |event| println!("{}", event));
    tracing::info!("played {} ticks", played);
    Ok(())
}
