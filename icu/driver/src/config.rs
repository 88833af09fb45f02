//! Capture configuration

use icu_core::CaptureBackend;

use crate::IcuDriver;

/// ICU notification callback
///
/// Runs in interrupt context with the driver borrowed mutably, so it may read
/// the latched measurements or call the lock-held capture operations
/// (e.g. [`IcuDriver::stop_capture`]).
pub type IcuCallback<B> = fn(&mut IcuDriver<'_, B>);

/// Capture configuration
///
/// Owned by the application and borrowed by the driver between `start` and
/// `stop`. All builder methods are `const`, so a configuration can live in a
/// `static`:
///
/// ```rust,ignore
/// static ICU_CFG: IcuConfig<MyTimer> = IcuConfig::new(IcuMode::ActiveHigh)
///     .width_cb(on_width)
///     .period_cb(on_period);
/// ```
pub struct IcuConfig<B: CaptureBackend> {
    /// Edge selection handed to the backend on `start`
    pub mode: B::Mode,
    /// Called when a pulse width has been latched
    pub width_cb: Option<IcuCallback<B>>,
    /// Called when a full cycle has been latched
    pub period_cb: Option<IcuCallback<B>>,
    /// Called on counter overflow. Required whenever overflow
    /// notifications are unmasked.
    pub overflow_cb: Option<IcuCallback<B>>,
}

impl<B: CaptureBackend> IcuConfig<B> {
    /// Configuration with no callbacks installed
    pub const fn new(mode: B::Mode) -> Self {
        Self {
            mode,
            width_cb: None,
            period_cb: None,
            overflow_cb: None,
        }
    }

    pub const fn width_cb(self, cb: IcuCallback<B>) -> Self {
        Self {
            width_cb: Some(cb),
            ..self
        }
    }

    pub const fn period_cb(self, cb: IcuCallback<B>) -> Self {
        Self {
            period_cb: Some(cb),
            ..self
        }
    }

    pub const fn overflow_cb(self, cb: IcuCallback<B>) -> Self {
        Self {
            overflow_cb: Some(cb),
            ..self
        }
    }
}

impl<B: CaptureBackend> Clone for IcuConfig<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: CaptureBackend> Copy for IcuConfig<B> {}
