//! Common capture mode encoding

use core::fmt;

/// Logic level of the captured input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Capture mode
///
/// Selects which edge opens a measurement. Backends are free to use their
/// own encoding through [`CaptureBackend::Mode`](crate::CaptureBackend::Mode);
/// this one covers the usual two-edge timer channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcuMode {
    /// Pulse is the high phase: rising edge starts, falling edge stops
    ActiveHigh,
    /// Pulse is the low phase: falling edge starts, rising edge stops
    ActiveLow,
}

impl IcuMode {
    /// Level the input settles to when a start edge occurs
    pub const fn start_level(self) -> Level {
        match self {
            IcuMode::ActiveHigh => Level::High,
            IcuMode::ActiveLow => Level::Low,
        }
    }

    /// Is a transition into `level` the edge that starts a cycle?
    pub const fn is_start_edge(self, level: Level) -> bool {
        matches!(
            (self, level),
            (IcuMode::ActiveHigh, Level::High) | (IcuMode::ActiveLow, Level::Low)
        )
    }
}

impl fmt::Display for IcuMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcuMode::ActiveHigh => write!(f, "ActiveHigh"),
            IcuMode::ActiveLow => write!(f, "ActiveLow"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IcuMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IcuMode::ActiveHigh => defmt::write!(fmt, "ActiveHigh"),
            IcuMode::ActiveLow => defmt::write!(fmt, "ActiveLow"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Level::Low => defmt::write!(fmt, "Low"),
            Level::High => defmt::write!(fmt, "High"),
        }
    }
}
