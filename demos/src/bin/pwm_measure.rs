//! PWM measurement with notifications
//!
//! Sweeps the duty cycle of a simulated PWM output and measures it through the
//! ICU driver. A separate thread plays the timer interrupt, the main thread is
//! the application: it arms a capture, waits for the first edge and reads the
//! values the callbacks collected.

use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use embedded_hal::pwm::SetDutyCycle;
use icu_driver::{IcuConfig, IcuDriver, IcuMode, SharedIcu};
use icu_posix::{isr, SimCapture, SimConfig, SimPwm};

/// PWM period in timer ticks
const PWM_PERIOD: u16 = 1000;

/// Full cycles played per measurement
const CYCLES: usize = 8;

static LAST_WIDTH: AtomicU32 = AtomicU32::new(0);
static LAST_PERIOD: AtomicU32 = AtomicU32::new(0);
static PERIOD_COUNT: AtomicU32 = AtomicU32::new(0);

fn width_cb(icu: &mut IcuDriver<'_, SimCapture>) {
    LAST_WIDTH.store(icu.width(), Ordering::Relaxed);
}

fn period_cb(icu: &mut IcuDriver<'_, SimCapture>) {
    LAST_PERIOD.store(icu.period(), Ordering::Relaxed);
    PERIOD_COUNT.fetch_add(1, Ordering::Relaxed);
}

static ICU_CFG: IcuConfig<SimCapture> = IcuConfig::new(IcuMode::ActiveHigh)
    .width_cb(width_cb)
    .period_cb(period_cb);

static ICU1: SharedIcu<'static, SimCapture> = SharedIcu::new(SimCapture::new(SimConfig::TIMER16));

fn main() {
    println!("ICU PWM measurement demo");
    println!("========================");

    if let Err(err) = run() {
        eprintln!("demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), icu_driver::IcuError<icu_posix::SimError>> {
    ICU1.init()?;
    ICU1.start(&ICU_CFG)?;

    for percent in (10..=90).step_by(20) {
        PERIOD_COUNT.store(0, Ordering::Relaxed);
        ICU1.start_capture()?;
        ICU1.enable_notifications()?;

        let timer = thread::spawn(move || {
            let mut pwm = SimPwm::new(PWM_PERIOD);
            // Infallible
            let _ = pwm.set_duty_cycle_percent(percent);
            isr::wait_until_polled(&ICU1);
            isr::feed_shared(&ICU1, pwm.edges().take(CYCLES * 2));
        });

        ICU1.wait_capture()?;
        if timer.join().is_err() {
            eprintln!("timer thread panicked");
        }

        ICU1.disable_notifications()?;
        ICU1.stop_capture()?;

        let width = LAST_WIDTH.load(Ordering::Relaxed);
        let period = LAST_PERIOD.load(Ordering::Relaxed);
        let measured = if period == 0 { 0 } else { width * 100 / period };
        println!(
            "set {:>2}%  width {:>4}  period {:>4}  measured {:>2}%  ({} periods reported)",
            percent,
            width,
            period,
            measured,
            PERIOD_COUNT.load(Ordering::Relaxed)
        );
    }

    ICU1.stop()?;
    println!("Final state: {}", ICU1.state());
    Ok(())
}
