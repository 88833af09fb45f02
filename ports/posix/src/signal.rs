//! Simulated PWM source for loop-back measurements

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use icu_driver::Level;

use crate::isr::Edge;

/// PWM output whose waveform can be fed into a simulated capture channel
///
/// Duty resolution is one timer tick: `max_duty_cycle` equals the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimPwm {
    period: u16,
    duty: u16,
}

impl SimPwm {
    /// Output with a period of `period` ticks, initially idle low
    pub const fn new(period: u16) -> Self {
        Self { period, duty: 0 }
    }

    pub fn period(&self) -> u16 {
        self.period
    }

    /// Ticks the output spends high in each cycle
    pub fn high_ticks(&self) -> u16 {
        self.duty
    }

    /// Edges of the waveform, starting from a low output
    ///
    /// A constant output (0 % or 100 % duty) has no edges.
    pub fn edges(&self) -> Waveform {
        Waveform {
            high: u32::from(self.duty),
            low: u32::from(self.period - self.duty),
            next: Level::High,
        }
    }
}

impl ErrorType for SimPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.period
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty.min(self.period);
        Ok(())
    }
}

/// Endless edge sequence of a [`SimPwm`] output
#[derive(Debug, Clone)]
pub struct Waveform {
    high: u32,
    low: u32,
    next: Level,
}

impl Iterator for Waveform {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.high == 0 || self.low == 0 {
            return None;
        }
        let edge = match self.next {
            Level::High => Edge::new(self.low, Level::High),
            Level::Low => Edge::new(self.high, Level::Low),
        };
        self.next = match self.next {
            Level::High => Level::Low,
            Level::Low => Level::High,
        };
        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_alternates() {
        let mut pwm = SimPwm::new(100);
        pwm.set_duty_cycle_percent(25).unwrap();
        let edges: Vec<Edge> = pwm.edges().take(4).collect();
        assert_eq!(
            edges,
            vec![
                Edge::new(75, Level::High),
                Edge::new(25, Level::Low),
                Edge::new(75, Level::High),
                Edge::new(25, Level::Low),
            ]
        );
    }

    #[test]
    fn test_constant_output_has_no_edges() {
        let mut pwm = SimPwm::new(100);
        pwm.set_duty_cycle_fully_off().unwrap();
        assert_eq!(pwm.edges().next(), None);
        pwm.set_duty_cycle_fully_on().unwrap();
        assert_eq!(pwm.edges().next(), None);
    }

    #[test]
    fn test_duty_is_clamped() {
        let mut pwm = SimPwm::new(50);
        pwm.set_duty_cycle(80).unwrap();
        assert_eq!(pwm.high_ticks(), 50);
    }
}
