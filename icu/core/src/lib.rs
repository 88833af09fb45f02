#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # ICU Core
//!
//! Core types shared by the Input Capture Unit driver and its hardware
//! backends: the channel state machine states, the capture mode encoding,
//! the error type and the [`CaptureBackend`] trait a timer port implements.

use core::fmt;

pub mod backend;
pub mod mode;
pub mod states;

pub use backend::*;
pub use mode::*;
pub use states::*;

/// ICU HAL version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the ICU driver
pub type IcuResult<T, E> = Result<T, IcuError<E>>;

/// Driver operation that can be rejected by a state precondition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcuOp {
    Init,
    Start,
    Stop,
    StartCapture,
    WaitCapture,
    StopCapture,
    EnableNotifications,
    DisableNotifications,
}

impl IcuOp {
    /// Name of the operation as it appears in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            IcuOp::Init => "init",
            IcuOp::Start => "start",
            IcuOp::Stop => "stop",
            IcuOp::StartCapture => "start_capture",
            IcuOp::WaitCapture => "wait_capture",
            IcuOp::StopCapture => "stop_capture",
            IcuOp::EnableNotifications => "enable_notifications",
            IcuOp::DisableNotifications => "disable_notifications",
        }
    }
}

impl fmt::Display for IcuOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IcuOp {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.name());
    }
}

/// Error types for ICU driver operations
///
/// `E` is the backend's own error type; the driver forwards it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IcuError<E> {
    /// Operation called from a state that does not allow it
    InvalidState {
        op: IcuOp,
        state: IcuState,
    },
    /// The capture backend refused the request
    Backend(E),
}

impl<E> IcuError<E> {
    /// True when the error was raised by the driver rather than the backend
    pub fn is_precondition(&self) -> bool {
        !matches!(self, IcuError::Backend(_))
    }
}

impl<E> From<E> for IcuError<E> {
    fn from(err: E) -> Self {
        IcuError::Backend(err)
    }
}

impl<E: fmt::Debug> fmt::Display for IcuError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcuError::InvalidState { op, state } => {
                write!(f, "{} not allowed in state {}", op, state)
            }
            IcuError::Backend(err) => write!(f, "Capture backend error: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for IcuError<E> {}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for IcuError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            IcuError::InvalidState { op, state } => {
                defmt::write!(fmt, "InvalidState({}, {})", op, state)
            }
            IcuError::Backend(err) => defmt::write!(fmt, "Backend({})", err),
        }
    }
}
