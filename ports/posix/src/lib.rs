//! POSIX host port of the ICU driver.
//!
//! There is no capture hardware on a host, so this crate provides a simulated
//! timer channel ([`SimCapture`]) together with the interrupt service routines
//! that drive it ([`isr`]) and a PWM source ([`SimPwm`]) to measure. It also
//! pulls in the `std` critical-section implementation so
//! [`SharedIcu`](icu_driver::SharedIcu) works from host threads.
//!
//! ```rust
//! use icu_driver::{IcuConfig, IcuDriver, IcuMode};
//! use icu_posix::{isr, SimCapture, SimConfig, SimPwm};
//! use embedded_hal::pwm::SetDutyCycle;
//!
//! let cfg = IcuConfig::new(IcuMode::ActiveHigh);
//! let mut icu = IcuDriver::new(SimCapture::new(SimConfig::TIMER16));
//! icu.init().unwrap();
//! icu.start(&cfg).unwrap();
//! icu.start_capture().unwrap();
//!
//! let mut pwm = SimPwm::new(1000);
//! pwm.set_duty_cycle_percent(30).unwrap();
//! isr::feed(&mut icu, pwm.edges().take(4));
//!
//! icu.wait_capture().unwrap();
//! assert_eq!(icu.width(), 300);
//! assert_eq!(icu.period(), 1000);
//! ```

pub mod capture;
pub mod isr;
pub mod signal;

pub use capture::{SimCapture, SimConfig, SimError, SimEvent, EVENT_LOG_DEPTH};
pub use isr::Edge;
pub use signal::{SimPwm, Waveform};
