//! Interrupt service routines of the simulated timer
//!
//! These play the role of the timer's interrupt vector: they update the
//! simulated registers and then call the driver's dispatch points. A source
//! is only delivered when notifications are unmasked and the matching
//! callback is configured, mirroring how a real port only enables the
//! interrupt sources it has a callback for.

use icu_driver::{IcuDriver, Level, SharedIcu};

use crate::capture::{SimCapture, SimEvent};

/// One transition of the captured input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Ticks elapsed since the previous edge
    pub after: u32,
    /// Level after the transition
    pub level: Level,
}

impl Edge {
    pub const fn new(after: u32, level: Level) -> Self {
        Self { after, level }
    }
}

fn source_enabled(icu: &IcuDriver<'_, SimCapture>, event: SimEvent) -> bool {
    if !icu.are_notifications_enabled() {
        return false;
    }
    let Some(config) = icu.config() else {
        return false;
    };
    match event {
        SimEvent::Width(_) => config.width_cb.is_some(),
        SimEvent::Period(_) => config.period_cb.is_some(),
        SimEvent::Overflow => config.overflow_cb.is_some(),
    }
}

fn deliver(icu: &mut IcuDriver<'_, SimCapture>, event: SimEvent) {
    if !source_enabled(icu, event) {
        return;
    }
    icu.backend_mut().record(event);
    match event {
        SimEvent::Width(_) => icu.isr_invoke_width_cb(),
        SimEvent::Period(_) => icu.isr_invoke_period_cb(),
        SimEvent::Overflow => icu.isr_invoke_overflow_cb(),
    }
}

/// Let `ticks` elapse on the counter, serving any overflow interrupts
pub fn advance(icu: &mut IcuDriver<'_, SimCapture>, ticks: u32) {
    let wraps = icu.backend_mut().count(ticks);
    for _ in 0..wraps {
        deliver(icu, SimEvent::Overflow);
    }
}

/// Drive the input to `level` and serve the resulting capture interrupt
pub fn serve_edge(icu: &mut IcuDriver<'_, SimCapture>, level: Level) {
    if let Some(event) = icu.backend_mut().latch(level) {
        deliver(icu, event);
    }
}

/// Play a sequence of edges into the driver
pub fn feed<I>(icu: &mut IcuDriver<'_, SimCapture>, edges: I)
where
    I: IntoIterator<Item = Edge>,
{
    for edge in edges {
        advance(icu, edge.after);
        serve_edge(icu, edge.level);
    }
}

/// Play a sequence of edges into a shared driver, one critical section per
/// edge so the application side can interleave
pub fn feed_shared<I>(icu: &SharedIcu<'_, SimCapture>, edges: I)
where
    I: IntoIterator<Item = Edge>,
{
    for edge in edges {
        icu.with(|drv| {
            advance(drv, edge.after);
            serve_edge(drv, edge.level);
        });
    }
}

/// Hold the calling timer thread until the application has polled for the
/// first edge at least once
///
/// `wait_capture` is only valid while the channel is `Waiting`; a timer thread
/// that starts feeding edges before the application's first poll could move
/// the channel to `Active` underneath it.
pub fn wait_until_polled(icu: &SharedIcu<'_, SimCapture>) {
    while icu.with(|drv| drv.backend().polls()) == 0 {
        std::thread::yield_now();
    }
}
