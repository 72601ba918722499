//! The host tone primitive and a few sinks that stand in for it.

use bt_ir::{ToneParams, ToneWords};

/// The host's four-word tone call.
///
/// Fire-and-forget: the host returns nothing and the engine never waits on it.
/// Any `FnMut(u32, u32, u32, u32)` is a sink, so a platform `tone` import can
/// be passed straight through.
pub trait ToneSink {
    fn tone(&mut self, frequency: u32, envelope: u32, volume: u32, flags: u32);
}

impl<F> ToneSink for F
where
    F: FnMut(u32, u32, u32, u32),
{
    fn tone(&mut self, frequency: u32, envelope: u32, volume: u32, flags: u32) {
        self(frequency, envelope, volume, flags)
    }
}

/// Pack `params` and invoke the host exactly once.
pub fn play_tone<S: ToneSink + ?Sized>(params: &ToneParams, sink: &mut S) {
    let words = params.pack();
    sink.tone(words.frequency, words.envelope, words.volume, words.flags);
}

/// Discards every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl ToneSink for NullSink {
    fn tone(&mut self, _frequency: u32, _envelope: u32, _volume: u32, _flags: u32) {}
}

/// Captures up to `N` calls without allocating.
///
/// Calls past capacity are counted in [`RecordingSink::dropped`] rather than stored.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink<const N: usize> {
    calls: heapless::Vec<ToneWords, N>,
    dropped: usize,
}

impl<const N: usize> RecordingSink<N> {
    pub fn new() -> Self {
        Self {
            calls: heapless::Vec::new(),
            dropped: 0,
        }
    }

    pub fn calls(&self) -> &[ToneWords] {
        &self.calls
    }

    pub fn last(&self) -> Option<&ToneWords> {
        self.calls.last()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Number of calls that arrived while the buffer was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> ToneSink for RecordingSink<N> {
    fn tone(&mut self, frequency: u32, envelope: u32, volume: u32, flags: u32) {
        let words = ToneWords { frequency, envelope, volume, flags };
        if self.calls.push(words).is_err() {
            self.dropped += 1;
        }
    }
}
