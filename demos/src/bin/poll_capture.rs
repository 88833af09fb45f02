//! Polled capture
//!
//! Uses the driver without notifications: the edges are latched by the timer,
//! `wait_capture` polls for the first one and the application reads the
//! latched width and period directly.

use embedded_hal::pwm::SetDutyCycle;
use icu_driver::{IcuConfig, IcuDriver, IcuMode};
use icu_posix::{isr, SimCapture, SimConfig, SimPwm};

fn main() {
    println!("ICU polled capture demo");
    println!("=======================");

    let cfg = IcuConfig::new(IcuMode::ActiveLow);
    let mut icu = IcuDriver::new(SimCapture::new(SimConfig::TIMER32));

    if let Err(err) = icu.init().and_then(|_| icu.start(&cfg)) {
        eprintln!("start failed: {}", err);
        std::process::exit(1);
    }
    println!("Driver state: {}", icu.state());

    for period in [250u16, 1000, 4000] {
        let mut pwm = SimPwm::new(period);
        // Infallible
        let _ = pwm.set_duty_cycle_fraction(3, 4);

        if let Err(err) = icu.start_capture() {
            eprintln!("start_capture failed: {}", err);
            break;
        }
        isr::feed(&mut icu, pwm.edges().take(6));
        if let Err(err) = icu.wait_capture() {
            eprintln!("wait_capture failed: {}", err);
            break;
        }
        println!(
            "period {:>4}: low phase {:>4} ticks, cycle {:>4} ticks",
            period,
            icu.width(),
            icu.period()
        );
        let _ = icu.stop_capture();
    }

    let _ = icu.stop();
    println!("Driver state: {}", icu.state());
}
