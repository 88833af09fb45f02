//! Channel state machine states

use core::fmt;

/// ICU channel state
///
/// The progression is `Uninit → Stop → Ready → Waiting → Active`; both
/// `Waiting` and `Active` fall back to `Ready` on `stop_capture` and to
/// `Stop` on `stop`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum IcuState {
    /// Not initialized
    #[default]
    Uninit = 0,
    /// Stopped
    Stop = 1,
    /// Ready
    Ready = 2,
    /// Waiting for the first capture edge
    Waiting = 3,
    /// First edge detected, measurements running
    Active = 4,
}

impl IcuState {
    /// Raw discriminant, one byte wide
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Convert a raw discriminant back into a state
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(IcuState::Uninit),
            1 => Some(IcuState::Stop),
            2 => Some(IcuState::Ready),
            3 => Some(IcuState::Waiting),
            4 => Some(IcuState::Active),
            _ => None,
        }
    }

    /// True when the driver holds a capture configuration in this state
    pub const fn is_started(self) -> bool {
        matches!(self, IcuState::Ready | IcuState::Waiting | IcuState::Active)
    }

    /// True while a capture cycle is armed
    pub const fn is_capturing(self) -> bool {
        matches!(self, IcuState::Waiting | IcuState::Active)
    }
}

impl fmt::Display for IcuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcuState::Uninit => write!(f, "Uninit"),
            IcuState::Stop => write!(f, "Stop"),
            IcuState::Ready => write!(f, "Ready"),
            IcuState::Waiting => write!(f, "Waiting"),
            IcuState::Active => write!(f, "Active"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IcuState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IcuState::Uninit => defmt::write!(fmt, "Uninit"),
            IcuState::Stop => defmt::write!(fmt, "Stop"),
            IcuState::Ready => defmt::write!(fmt, "Ready"),
            IcuState::Waiting => defmt::write!(fmt, "Waiting"),
            IcuState::Active => defmt::write!(fmt, "Active"),
        }
    }
}
