#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # ICU Driver
//!
//! Portable Input Capture Unit driver. It owns the channel state machine,
//! enforces the legal transitions between application calls and decides when
//! the width, period and overflow callbacks fire from interrupt context.
//!
//! ## Operation classes
//! - Lifecycle: [`IcuDriver::init`], [`IcuDriver::start`], [`IcuDriver::stop`].
//! - Capture cycle, lock held: [`IcuDriver::start_capture`],
//!   [`IcuDriver::wait_capture`], [`IcuDriver::stop_capture`] and the
//!   notification toggles.
//! - Interrupt dispatch, called by the port's interrupt handler:
//!   [`IcuDriver::isr_invoke_width_cb`], [`IcuDriver::isr_invoke_period_cb`],
//!   [`IcuDriver::isr_invoke_overflow_cb`].
//!
//! [`SharedIcu`] wraps a driver for use from both contexts.

#[macro_use]
mod fmt;

pub mod config;
pub mod driver;
pub mod shared;

pub use config::{IcuCallback, IcuConfig};
pub use driver::IcuDriver;
pub use icu_core::*;
pub use shared::SharedIcu;

#[cfg(test)]
mod tests;
