//! Simulated capture timer
//!
//! Models a timer channel pair in reset mode: the start edge latches the
//! period and clears the counter, the stop edge latches the width, and the
//! counter wrapping past `top` is an overflow.

use core::fmt;

use heapless::Deque;
use icu_driver::{CaptureBackend, IcuMode, Level};

/// Depth of the interrupt log kept by [`SimCapture`]
pub const EVENT_LOG_DEPTH: usize = 32;

/// Simulated timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    /// Highest counter value before the counter wraps to zero
    pub top: u32,
}

impl SimConfig {
    /// 16-bit timer
    pub const TIMER16: SimConfig = SimConfig { top: 0xFFFF };
    /// 32-bit timer
    pub const TIMER32: SimConfig = SimConfig { top: 0xFFFF_FFFF };
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::TIMER16
    }
}

/// Errors raised by the simulated timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// A counter that wraps at zero cannot measure anything
    InvalidTop,
    /// Capture operation on a timer that was never started
    NotRunning,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidTop => write!(f, "counter top must be non-zero"),
            SimError::NotRunning => write!(f, "timer not running"),
        }
    }
}

impl std::error::Error for SimError {}

/// Interrupt source raised by the simulated timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Stop edge, carries the latched width
    Width(u32),
    /// Start edge, carries the latched period
    Period(u32),
    /// Counter wrapped past `top`
    Overflow,
}

/// Simulated capture channel implementing [`CaptureBackend`]
pub struct SimCapture {
    config: SimConfig,
    mode: Option<IcuMode>,
    armed: bool,
    notify: bool,
    level: Level,
    counter: u32,
    first_edge: bool,
    polls: u32,
    width: u32,
    period: u32,
    log: Deque<SimEvent, EVENT_LOG_DEPTH>,
}

impl SimCapture {
    pub const fn new(config: SimConfig) -> Self {
        Self {
            config,
            mode: None,
            armed: false,
            notify: false,
            level: Level::Low,
            counter: 0,
            first_edge: false,
            polls: 0,
            width: 0,
            period: 0,
            log: Deque::new(),
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        self.config
    }

    /// Mode programmed by `start`, `None` while the timer is stopped
    pub fn mode(&self) -> Option<IcuMode> {
        self.mode
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// First-edge polls since the last `start_capture`
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// Current level of the captured input
    pub fn level(&self) -> Level {
        self.level
    }

    /// Interrupts delivered so far, oldest first
    pub fn events(&self) -> impl Iterator<Item = &SimEvent> + '_ {
        self.log.iter()
    }

    /// Drain the interrupt log
    pub fn take_events(&mut self) -> impl Iterator<Item = SimEvent> + '_ {
        core::iter::from_fn(move || self.log.pop_front())
    }

    /// Advance the counter by `ticks`, returning the number of wraps
    pub(crate) fn count(&mut self, ticks: u32) -> u32 {
        if !self.armed {
            return 0;
        }
        let modulus = u64::from(self.config.top) + 1;
        let total = u64::from(self.counter) + u64::from(ticks);
        // `modulus` is at least 2 once armed and the counter is below it, so
        // both results fit in u32
        self.counter = (total % modulus) as u32;
        (total / modulus) as u32
    }

    /// Apply an input transition to `level` and latch the capture registers
    ///
    /// Returns the interrupt source the edge raises, if any.
    pub(crate) fn latch(&mut self, level: Level) -> Option<SimEvent> {
        if level == self.level {
            return None;
        }
        self.level = level;
        let mode = self.mode?;
        if !self.armed {
            return None;
        }
        if mode.is_start_edge(level) {
            self.period = self.counter;
            self.counter = 0;
            self.first_edge = true;
            Some(SimEvent::Period(self.period))
        } else {
            self.width = self.counter;
            Some(SimEvent::Width(self.width))
        }
    }

    /// Record a delivered interrupt, dropping the oldest entry when full
    pub(crate) fn record(&mut self, event: SimEvent) {
        if self.log.is_full() {
            self.log.pop_front();
        }
        // Cannot fail, a slot was freed above
        let _ = self.log.push_back(event);
    }
}

impl Default for SimCapture {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl CaptureBackend for SimCapture {
    type Mode = IcuMode;
    type Count = u32;
    type Error = SimError;

    fn start(&mut self, mode: IcuMode) -> Result<(), SimError> {
        if self.config.top == 0 {
            return Err(SimError::InvalidTop);
        }
        self.mode = Some(mode);
        self.width = 0;
        self.period = 0;
        Ok(())
    }

    fn stop(&mut self) {
        self.mode = None;
        self.armed = false;
        self.notify = false;
        self.first_edge = false;
        self.counter = 0;
    }

    fn start_capture(&mut self) -> Result<(), SimError> {
        if self.mode.is_none() {
            return Err(SimError::NotRunning);
        }
        self.counter = 0;
        self.first_edge = false;
        self.polls = 0;
        self.armed = true;
        Ok(())
    }

    fn stop_capture(&mut self) {
        self.armed = false;
    }

    fn poll_first_edge(&mut self) -> nb::Result<(), SimError> {
        self.polls = self.polls.saturating_add(1);
        if !self.armed {
            return Err(nb::Error::Other(SimError::NotRunning));
        }
        if self.first_edge {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn period(&self) -> u32 {
        self.period
    }

    fn enable_notifications(&mut self) {
        self.notify = true;
    }

    fn disable_notifications(&mut self) {
        self.notify = false;
    }

    fn notifications_enabled(&self) -> bool {
        self.notify
    }
}
