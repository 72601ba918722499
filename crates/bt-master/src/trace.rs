//! Tone-call trace output.

use bt_ir::ToneWords;
use std::fmt;
use std::io::Write;

/// One host tone call, tagged with the tick and track that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub tick: u64,
    pub track: usize,
    pub words: ToneWords,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = &self.words;
        write!(
            f,
            "{:>8} {:>5}  0x{:08X} 0x{:08X} {:>3} 0x{:02X}",
            self.tick, self.track, w.frequency, w.envelope, w.volume, w.flags
        )
    }
}

/// Column header matching the [`TraceEvent`] display format.
pub const TRACE_HEADER: &str = "    tick track  frequency  envelope   vol flag";

pub fn write_trace(w: &mut impl Write, events: &[TraceEvent]) -> std::io::Result<()> {
    writeln!(w, "{}", TRACE_HEADER)?;
    for event in events {
        writeln!(w, "{}", event)?;
    }
    Ok(())
}

pub fn trace_to_string(events: &[TraceEvent]) -> String {
    let mut buf = Vec::new();
    write_trace(&mut buf, events).expect("Vec<u8> write cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
