//! Interrupt-safe driver wrapper
//!
//! The application and the timer interrupt both reach the driver; this wrapper
//! keeps it in a `critical_section::Mutex` so every access runs with the
//! interrupt held off. The methods are the locking counterparts of the
//! [`IcuDriver`] operations.

use core::cell::RefCell;
use critical_section::Mutex;
use icu_core::{CaptureBackend, IcuResult, IcuState};

use crate::{IcuConfig, IcuDriver};

/// Driver shared between application and interrupt context
///
/// ```rust,ignore
/// static ICU1: SharedIcu<'static, Tim3Ch1> = SharedIcu::new(Tim3Ch1::new());
///
/// #[interrupt]
/// fn TIM3() {
///     ICU1.with(|icu| tim3_serve_interrupt(icu));
/// }
/// ```
///
/// Callbacks run inside the critical section with the driver already
/// borrowed: they must use the `&mut IcuDriver` they are handed, never the
/// `SharedIcu` itself.
pub struct SharedIcu<'a, B: CaptureBackend> {
    inner: Mutex<RefCell<IcuDriver<'a, B>>>,
}

impl<'a, B: CaptureBackend> SharedIcu<'a, B> {
    pub const fn new(backend: B) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(IcuDriver::new(backend))),
        }
    }

    /// Run `f` on the driver inside a critical section
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut IcuDriver<'a, B>) -> R,
    {
        critical_section::with(|cs| {
            let mut icu = self.inner.borrow_ref_mut(cs);
            f(&mut icu)
        })
    }

    pub fn state(&self) -> IcuState {
        self.with(|icu| icu.state())
    }

    pub fn init(&self) -> IcuResult<(), B::Error> {
        self.with(|icu| icu.init())
    }

    pub fn start(&self, config: &'a IcuConfig<B>) -> IcuResult<(), B::Error> {
        self.with(|icu| icu.start(config))
    }

    pub fn stop(&self) -> IcuResult<(), B::Error> {
        self.with(|icu| icu.stop())
    }

    pub fn start_capture(&self) -> IcuResult<(), B::Error> {
        self.with(|icu| icu.start_capture())
    }

    /// Wait for the first activation edge
    ///
    /// Valid only from `Waiting`. The lock is released between polls so the
    /// interrupt can run. If the interrupt path moves the channel to `Active`
    /// meanwhile, the wait is over. Never call from interrupt context.
    pub fn wait_capture(&self) -> IcuResult<(), B::Error> {
        let mut first = true;
        loop {
            let polled = self.with(|icu| {
                if !first && icu.state() == IcuState::Active {
                    Ok(())
                } else {
                    icu.poll_capture()
                }
            });
            first = false;
            match polled {
                Ok(()) => return Ok(()),
                Err(nb::Error::WouldBlock) => core::hint::spin_loop(),
                Err(nb::Error::Other(err)) => return Err(err),
            }
        }
    }

    pub fn stop_capture(&self) -> IcuResult<(), B::Error> {
        self.with(|icu| icu.stop_capture())
    }

    pub fn enable_notifications(&self) -> IcuResult<(), B::Error> {
        self.with(|icu| icu.enable_notifications())
    }

    pub fn disable_notifications(&self) -> IcuResult<(), B::Error> {
        self.with(|icu| icu.disable_notifications())
    }

    pub fn are_notifications_enabled(&self) -> bool {
        self.with(|icu| icu.are_notifications_enabled())
    }

    pub fn width(&self) -> B::Count {
        self.with(|icu| icu.width())
    }

    pub fn period(&self) -> B::Count {
        self.with(|icu| icu.period())
    }

    /// Width event entry point for the timer interrupt
    pub fn on_width(&self) {
        self.with(|icu| icu.isr_invoke_width_cb())
    }

    /// Period event entry point for the timer interrupt
    pub fn on_period(&self) {
        self.with(|icu| icu.isr_invoke_period_cb())
    }

    /// Overflow event entry point for the timer interrupt
    pub fn on_overflow(&self) {
        self.with(|icu| icu.isr_invoke_overflow_cb())
    }
}
