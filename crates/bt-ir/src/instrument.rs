//! Instrument (channel + waveform mode) types.

use arrayvec::ArrayString;
use core::fmt::Write;

use crate::error::TableError;

/// Host synthesizer channel, stored in the low 2 bits of the flags word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    #[default]
    Pulse1 = 0,
    Pulse2 = 1,
    Triangle = 2,
    Noise = 3,
}

impl Channel {
    /// Decode a channel from the low 2 bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Channel::Pulse1,
            1 => Channel::Pulse2,
            2 => Channel::Triangle,
            _ => Channel::Noise,
        }
    }

    /// Pulse channels honour the duty mode; the host ignores it elsewhere.
    pub const fn is_pitched(self) -> bool {
        matches!(self, Channel::Pulse1 | Channel::Pulse2)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Channel::Pulse1 => "pulse1",
            Channel::Pulse2 => "pulse2",
            Channel::Triangle => "triangle",
            Channel::Noise => "noise",
        }
    }
}

/// Pulse duty cycle, stored in bits 2-3 of the flags word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DutyMode {
    /// 12.5%
    #[default]
    Eighth = 0,
    /// 25%
    Quarter = 1,
    /// 50% (square)
    Half = 2,
    /// 75%
    ThreeQuarters = 3,
}

impl DutyMode {
    /// Decode a duty mode from the low 2 bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => DutyMode::Eighth,
            1 => DutyMode::Quarter,
            2 => DutyMode::Half,
            _ => DutyMode::ThreeQuarters,
        }
    }

    pub const fn percent(self) -> &'static str {
        match self {
            DutyMode::Eighth => "12.5%",
            DutyMode::Quarter => "25%",
            DutyMode::Half => "50%",
            DutyMode::ThreeQuarters => "75%",
        }
    }
}

/// A (channel, mode) pair selecting the voice that renders a note.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Instrument {
    pub channel: Channel,
    pub mode: DutyMode,
}

impl Instrument {
    pub const fn new(channel: Channel, mode: DutyMode) -> Self {
        Self { channel, mode }
    }

    /// Build an instrument from raw values, rejecting anything wider than 2 bits.
    pub fn from_raw(channel: u8, mode: u8) -> Result<Self, TableError> {
        if channel > 3 {
            return Err(TableError::OutOfRange { field: "channel", value: channel });
        }
        if mode > 3 {
            return Err(TableError::OutOfRange { field: "mode", value: mode });
        }
        Ok(Self::new(Channel::from_bits(channel), DutyMode::from_bits(mode)))
    }

    /// Short human-readable label, e.g. `pulse1 50%`.
    pub fn label(&self) -> ArrayString<16> {
        let mut label = ArrayString::new();
        let _ = label.try_push_str(self.channel.name());
        if self.channel.is_pitched() {
            let _ = write!(label, " {}", self.mode.percent());
        }
        label
    }
}

const REFERENCE_INSTRUMENTS: [Instrument; 9] = [
    Instrument::new(Channel::Triangle, DutyMode::Eighth),
    Instrument::new(Channel::Pulse1, DutyMode::Half),
    Instrument::new(Channel::Pulse1, DutyMode::ThreeQuarters),
    Instrument::new(Channel::Pulse1, DutyMode::Quarter),
    Instrument::new(Channel::Pulse1, DutyMode::Eighth),
    Instrument::new(Channel::Pulse2, DutyMode::Half),
    Instrument::new(Channel::Pulse2, DutyMode::ThreeQuarters),
    Instrument::new(Channel::Pulse2, DutyMode::Quarter),
    Instrument::new(Channel::Pulse2, DutyMode::Eighth),
];

/// An ordered, non-empty set of instruments addressed modulo its length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrumentTable<'a> {
    instruments: &'a [Instrument],
}

impl InstrumentTable<'static> {
    /// The 9-instrument reference set.
    pub const REFERENCE: InstrumentTable<'static> = InstrumentTable {
        instruments: &REFERENCE_INSTRUMENTS,
    };
}

impl<'a> InstrumentTable<'a> {
    pub fn new(instruments: &'a [Instrument]) -> Result<Self, TableError> {
        if instruments.is_empty() {
            return Err(TableError::Empty);
        }
        Ok(Self { instruments })
    }

    /// Look up an instrument, wrapping the index around the table length.
    pub fn resolve(&self, index: u8) -> Instrument {
        self.instruments[index as usize % self.instruments.len()]
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    pub fn as_slice(&self) -> &'a [Instrument] {
        self.instruments
    }
}

impl Default for InstrumentTable<'static> {
    fn default() -> Self {
        Self::REFERENCE
    }
}
