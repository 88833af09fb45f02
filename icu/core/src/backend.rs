//! Capture backend abstraction
//!
//! A backend owns the timer registers of one capture channel. The driver calls
//! into it for every state transition and never looks at its fields.

use core::fmt::Debug;

/// Hardware-specific capture channel
pub trait CaptureBackend {
    /// Edge selection, in whatever encoding the timer wants
    type Mode: Copy;

    /// Tick count as latched by the capture registers
    type Count: Copy;

    /// Backend failure, forwarded to the caller untouched
    type Error: Debug;

    /// Power up the timer and program it for `mode`
    fn start(&mut self, mode: Self::Mode) -> Result<(), Self::Error>;

    /// Power down the timer; must be safe with a capture in flight
    fn stop(&mut self);

    /// Arm edge detection
    fn start_capture(&mut self) -> Result<(), Self::Error>;

    /// Disarm edge detection
    fn stop_capture(&mut self);

    /// Check for the first qualifying edge since `start_capture`
    ///
    /// Returns `WouldBlock` until the edge has been seen.
    fn poll_first_edge(&mut self) -> nb::Result<(), Self::Error>;

    /// Width of the latest pulse, start edge to stop edge
    fn width(&self) -> Self::Count;

    /// Width of the latest cycle, start edge to next start edge
    fn period(&self) -> Self::Count;

    /// Unmask the channel interrupt sources
    fn enable_notifications(&mut self);

    /// Mask the channel interrupt sources
    fn disable_notifications(&mut self);

    /// Are the channel interrupt sources currently unmasked?
    fn notifications_enabled(&self) -> bool;
}
