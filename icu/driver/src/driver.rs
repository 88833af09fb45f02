//! ICU driver state machine and interrupt dispatch

use icu_core::{CaptureBackend, IcuError, IcuOp, IcuResult, IcuState};

use crate::IcuConfig;

/// Input capture driver for one timer channel
///
/// `state` is the only field shared with the interrupt path. Every method that
/// changes it takes `&mut self`; when the driver is reached from both the
/// application and an interrupt handler, wrap it in
/// [`SharedIcu`](crate::SharedIcu) or call the capture-cycle operations with
/// the channel interrupt masked.
pub struct IcuDriver<'a, B: CaptureBackend> {
    state: IcuState,
    config: Option<&'a IcuConfig<B>>,
    backend: B,
}

impl<'a, B: CaptureBackend> IcuDriver<'a, B> {
    /// Create a driver in the `Uninit` state
    pub const fn new(backend: B) -> Self {
        Self {
            state: IcuState::Uninit,
            config: None,
            backend,
        }
    }

    pub fn state(&self) -> IcuState {
        self.state
    }

    /// Installed configuration, present only between `start` and `stop`
    pub fn config(&self) -> Option<&'a IcuConfig<B>> {
        self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Backend access for the port's interrupt service routine
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Reject `op` unless `allowed`.
    ///
    /// Traps in debug builds; release builds leave the driver untouched and
    /// report the violation.
    fn require(&self, op: IcuOp, allowed: bool) -> IcuResult<(), B::Error> {
        if allowed {
            return Ok(());
        }
        warn!("icu: {} rejected in state {}", op, self.state);
        if cfg!(debug_assertions) {
            panic!("icu: {} not allowed in state {}", op, self.state);
        }
        Err(IcuError::InvalidState {
            op,
            state: self.state,
        })
    }

    fn set_state(&mut self, next: IcuState) {
        trace!("icu: {} -> {}", self.state, next);
        self.state = next;
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Initialize the driver object
    pub fn init(&mut self) -> IcuResult<(), B::Error> {
        self.require(IcuOp::Init, self.state == IcuState::Uninit)?;
        self.config = None;
        self.set_state(IcuState::Stop);
        Ok(())
    }

    /// Configure and activate the timer
    ///
    /// `config` stays borrowed until [`stop`](Self::stop). If the backend
    /// refuses the mode the driver stays in `Stop`.
    pub fn start(&mut self, config: &'a IcuConfig<B>) -> IcuResult<(), B::Error> {
        self.require(IcuOp::Start, self.state == IcuState::Stop)?;
        debug!("icu: start");
        self.backend.start(config.mode)?;
        self.config = Some(config);
        self.set_state(IcuState::Ready);
        Ok(())
    }

    /// Deactivate the timer, also valid with a capture in flight
    pub fn stop(&mut self) -> IcuResult<(), B::Error> {
        self.require(IcuOp::Stop, self.state.is_started())?;
        debug!("icu: stop");
        self.backend.stop();
        self.config = None;
        self.set_state(IcuState::Stop);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Capture cycle (lock held)
    // ---------------------------------------------------------------------

    /// Arm edge detection
    pub fn start_capture(&mut self) -> IcuResult<(), B::Error> {
        self.require(IcuOp::StartCapture, self.state == IcuState::Ready)?;
        self.backend.start_capture()?;
        self.set_state(IcuState::Waiting);
        Ok(())
    }

    /// Non-blocking step of [`wait_capture`](Self::wait_capture)
    ///
    /// Moves to `Active` once the backend has seen the first edge.
    pub fn poll_capture(&mut self) -> nb::Result<(), IcuError<B::Error>> {
        self.require(IcuOp::WaitCapture, self.state == IcuState::Waiting)
            .map_err(nb::Error::Other)?;
        self.backend
            .poll_first_edge()
            .map_err(|err| err.map(IcuError::Backend))?;
        self.set_state(IcuState::Active);
        Ok(())
    }

    /// Busy-wait for the first cycle activation edge
    ///
    /// Only meaningful with notifications disabled; with notifications on,
    /// the first period event performs the same transition. Never call from
    /// interrupt context.
    pub fn wait_capture(&mut self) -> IcuResult<(), B::Error> {
        nb::block!(self.poll_capture())
    }

    /// Disarm edge detection
    pub fn stop_capture(&mut self) -> IcuResult<(), B::Error> {
        self.require(IcuOp::StopCapture, self.state.is_capturing())?;
        self.backend.stop_capture();
        self.set_state(IcuState::Ready);
        Ok(())
    }

    /// Unmask the channel interrupts; no effect if already unmasked
    pub fn enable_notifications(&mut self) -> IcuResult<(), B::Error> {
        self.require(IcuOp::EnableNotifications, self.state.is_started())?;
        if !self.backend.notifications_enabled() {
            self.backend.enable_notifications();
        }
        Ok(())
    }

    /// Mask the channel interrupts; no effect if already masked
    pub fn disable_notifications(&mut self) -> IcuResult<(), B::Error> {
        self.require(IcuOp::DisableNotifications, self.state.is_started())?;
        if self.backend.notifications_enabled() {
            self.backend.disable_notifications();
        }
        Ok(())
    }

    pub fn are_notifications_enabled(&self) -> bool {
        self.backend.notifications_enabled()
    }

    /// Ticks between the start edge and the stop edge of the latest pulse
    ///
    /// Not gated on state; before the first capture the value is whatever the
    /// backend latched last.
    #[inline]
    pub fn width(&self) -> B::Count {
        self.backend.width()
    }

    /// Ticks between two consecutive start edges
    #[inline]
    pub fn period(&self) -> B::Count {
        self.backend.period()
    }

    // ---------------------------------------------------------------------
    // Interrupt dispatch
    // ---------------------------------------------------------------------

    /// Width event.
    ///
    /// Fires `width_cb` unless the channel is still `Waiting`. The gate tests
    /// `period_cb`, not `width_cb`: a configuration without `period_cb` never
    /// sees width notifications. Pinned by
    /// `width_event_requires_period_callback`; keep it until the hardware
    /// backends confirm which callback should be tested.
    #[inline]
    pub fn isr_invoke_width_cb(&mut self) {
        let Some(config) = self.config else {
            warn!("icu: width event while stopped");
            return;
        };
        if self.state != IcuState::Waiting && config.period_cb.is_some() {
            if let Some(cb) = config.width_cb {
                cb(self);
            }
        }
    }

    /// Period event.
    ///
    /// Always leaves the channel `Active`. The event that completes the
    /// `Waiting -> Active` transition only establishes the first edge and is
    /// not reported.
    #[inline]
    pub fn isr_invoke_period_cb(&mut self) {
        let Some(config) = self.config else {
            warn!("icu: period event while stopped");
            return;
        };
        let previous = self.state;
        self.set_state(IcuState::Active);
        if previous != IcuState::Waiting {
            if let Some(cb) = config.period_cb {
                cb(self);
            }
        }
    }

    /// Counter overflow event, delivered regardless of state
    #[inline]
    pub fn isr_invoke_overflow_cb(&mut self) {
        let Some(config) = self.config else {
            warn!("icu: overflow event while stopped");
            return;
        };
        match config.overflow_cb {
            Some(cb) => cb(self),
            None => {
                warn!("icu: overflow event without overflow_cb");
                if cfg!(debug_assertions) {
                    panic!("icu: overflow notification without overflow callback");
                }
            }
        }
    }
}
