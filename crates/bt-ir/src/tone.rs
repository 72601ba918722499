//! Tone parameters and the host's packed four-word call convention.
//!
//! The host primitive takes `(frequency, envelope, volume, flags)`:
//!
//! | word      | bits 24-31 | bits 16-23 | bits 8-15 | bits 0-7 |
//! |-----------|------------|------------|-----------|----------|
//! | frequency | freq2 (hi) | freq2 (lo) | freq1     | freq1    |
//! | envelope  | attack     | decay      | release   | sustain  |
//!
//! `flags` holds the channel in bits 0-1 and the mode in bits 2-3.
//! `volume` is passed through unchanged.

/// Shift of the second (slide target) frequency in the frequency word.
pub const FREQ2_SHIFT: u32 = 16;
/// Shift of the attack time in the envelope word.
pub const ATTACK_SHIFT: u32 = 24;
/// Shift of the decay time in the envelope word.
pub const DECAY_SHIFT: u32 = 16;
/// Shift of the release time in the envelope word (sustain sits at bit 0).
pub const RELEASE_SHIFT: u32 = 8;
/// Shift of the mode in the flags word (channel sits at bit 0).
pub const MODE_SHIFT: u32 = 2;

/// Logical fields of a single tone, before packing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToneParams {
    /// Start frequency
    pub freq1: u32,
    /// End frequency for slides (0 = flat tone)
    pub freq2: u32,
    /// Attack time in ticks
    pub attack: u32,
    /// Decay time in ticks
    pub decay: u32,
    /// Sustain time in ticks
    pub sustain: u32,
    /// Release time in ticks
    pub release: u32,
    /// Volume (0-100 on typical hosts)
    pub volume: u32,
    /// Channel (0-3)
    pub channel: u32,
    /// Duty mode (0-3), only meaningful on pulse channels
    pub mode: u32,
}

impl Default for ToneParams {
    /// An audible test tone: 500 Hz, 30 ticks of sustain, volume 100.
    fn default() -> Self {
        Self {
            freq1: 500,
            freq2: 0,
            attack: 0,
            decay: 0,
            sustain: 30,
            release: 0,
            volume: 100,
            channel: 0,
            mode: 0,
        }
    }
}

impl ToneParams {
    /// Pack the fields into the host's four words.
    ///
    /// Oversized fields are not rejected: high bits are shifted out or
    /// OR-merged into the neighbouring field, exactly as the host would see
    /// them.
    pub const fn pack(&self) -> ToneWords {
        ToneWords {
            frequency: self.freq1 | (self.freq2 << FREQ2_SHIFT),
            envelope: (self.attack << ATTACK_SHIFT)
                | (self.decay << DECAY_SHIFT)
                | self.sustain
                | (self.release << RELEASE_SHIFT),
            volume: self.volume,
            flags: self.channel | (self.mode << MODE_SHIFT),
        }
    }
}

/// The four packed words handed to the host tone primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ToneWords {
    pub frequency: u32,
    pub envelope: u32,
    pub volume: u32,
    pub flags: u32,
}
