//! State machine transition tests

use icu_core::{IcuError, IcuMode, IcuState};

use super::mock::{on_period, on_width, stopped_driver, BackendRefused, MockBackend};
use crate::{IcuConfig, IcuDriver};

#[test]
fn new_driver_is_uninit() {
    let icu: IcuDriver<'_, MockBackend> = IcuDriver::new(MockBackend::new());
    assert_eq!(icu.state(), IcuState::Uninit);
    assert!(icu.config().is_none());
}

#[test]
fn init_moves_to_stop() {
    let icu = stopped_driver();
    assert_eq!(icu.state(), IcuState::Stop);
    assert!(icu.config().is_none());
}

#[test]
fn start_stores_config_and_programs_mode() {
    let cfg = IcuConfig::new(IcuMode::ActiveLow);
    let mut icu = stopped_driver();

    icu.start(&cfg).unwrap();

    assert_eq!(icu.state(), IcuState::Ready);
    assert!(icu.config().is_some());
    assert_eq!(icu.backend().mode, Some(IcuMode::ActiveLow));
    assert_eq!(icu.backend().starts, 1);
}

#[test]
fn start_refused_by_backend_stays_stopped() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.backend_mut().refuse_start = true;

    assert_eq!(icu.start(&cfg), Err(IcuError::Backend(BackendRefused)));
    assert_eq!(icu.state(), IcuState::Stop);
    assert!(icu.config().is_none());
}

#[test]
fn capture_cycle_follows_table() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();

    icu.start_capture().unwrap();
    assert_eq!(icu.state(), IcuState::Waiting);

    icu.wait_capture().unwrap();
    assert_eq!(icu.state(), IcuState::Active);

    icu.stop_capture().unwrap();
    assert_eq!(icu.state(), IcuState::Ready);

    // Waiting -> Ready without ever seeing an edge
    icu.start_capture().unwrap();
    icu.stop_capture().unwrap();
    assert_eq!(icu.state(), IcuState::Ready);

    assert_eq!(icu.backend().capture_starts, 2);
    assert_eq!(icu.backend().capture_stops, 2);
}

#[test]
fn wait_capture_polls_until_first_edge() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.backend_mut().edge_after_polls = 3;
    icu.start(&cfg).unwrap();
    icu.start_capture().unwrap();

    assert_eq!(icu.poll_capture(), Err(nb::Error::WouldBlock));
    assert_eq!(icu.state(), IcuState::Waiting);

    icu.wait_capture().unwrap();
    assert_eq!(icu.state(), IcuState::Active);
    assert_eq!(icu.backend().polls, 4);
}

#[test]
fn stop_is_valid_from_every_started_state() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);

    let mut ready = stopped_driver();
    ready.start(&cfg).unwrap();
    ready.stop().unwrap();
    assert_eq!(ready.state(), IcuState::Stop);

    let mut waiting = stopped_driver();
    waiting.start(&cfg).unwrap();
    waiting.start_capture().unwrap();
    waiting.stop().unwrap();
    assert_eq!(waiting.state(), IcuState::Stop);

    let mut active = stopped_driver();
    active.start(&cfg).unwrap();
    active.start_capture().unwrap();
    active.isr_invoke_period_cb();
    assert_eq!(active.state(), IcuState::Active);
    active.stop().unwrap();
    assert_eq!(active.state(), IcuState::Stop);
    assert!(active.config().is_none());
}

#[test]
fn start_stop_round_trip_clears_config() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh)
        .width_cb(on_width)
        .period_cb(on_period);
    let mut icu = stopped_driver();

    for cycles in 0..3 {
        icu.start(&cfg).unwrap();
        for _ in 0..cycles {
            icu.start_capture().unwrap();
            icu.isr_invoke_period_cb();
            icu.stop_capture().unwrap();
        }
        icu.stop().unwrap();
        assert_eq!(icu.state(), IcuState::Stop);
        assert!(icu.config().is_none());
    }
    assert_eq!(icu.backend().starts, 3);
    assert_eq!(icu.backend().stops, 3);
}

#[test]
fn enable_notifications_twice_unmasks_once() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();

    icu.enable_notifications().unwrap();
    icu.enable_notifications().unwrap();
    assert!(icu.are_notifications_enabled());
    assert_eq!(icu.backend().unmasks, 1);

    icu.disable_notifications().unwrap();
    icu.disable_notifications().unwrap();
    assert!(!icu.are_notifications_enabled());
    assert_eq!(icu.backend().masks, 1);
}

#[test]
fn notifications_toggle_while_capturing() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();
    icu.start_capture().unwrap();
    icu.enable_notifications().unwrap();
    icu.isr_invoke_period_cb();
    icu.disable_notifications().unwrap();
    assert_eq!(icu.state(), IcuState::Active);
    assert_eq!((icu.backend().unmasks, icu.backend().masks), (1, 1));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "init not allowed in state Stop")]
fn init_twice_traps() {
    let mut icu = stopped_driver();
    let _ = icu.init();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "start not allowed in state Uninit")]
fn start_before_init_traps() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = IcuDriver::new(MockBackend::new());
    let _ = icu.start(&cfg);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "start not allowed in state Ready")]
fn start_twice_traps() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();
    let _ = icu.start(&cfg);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "stop not allowed in state Stop")]
fn stop_while_stopped_traps() {
    let mut icu = stopped_driver();
    let _ = icu.stop();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "start_capture not allowed in state Stop")]
fn start_capture_before_start_traps() {
    let mut icu = stopped_driver();
    let _ = icu.start_capture();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "start_capture not allowed in state Waiting")]
fn start_capture_twice_traps() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();
    icu.start_capture().unwrap();
    let _ = icu.start_capture();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "wait_capture not allowed in state Ready")]
fn wait_capture_without_start_capture_traps() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();
    let _ = icu.wait_capture();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "stop_capture not allowed in state Ready")]
fn stop_capture_while_ready_traps() {
    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();
    let _ = icu.stop_capture();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "enable_notifications not allowed in state Stop")]
fn enable_notifications_before_start_traps() {
    let mut icu = stopped_driver();
    let _ = icu.enable_notifications();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "disable_notifications not allowed in state Uninit")]
fn disable_notifications_before_init_traps() {
    let mut icu = IcuDriver::new(MockBackend::new());
    let _ = icu.disable_notifications();
}

#[cfg(not(debug_assertions))]
fn rejected(op: icu_core::IcuOp, state: IcuState) -> Result<(), IcuError<BackendRefused>> {
    Err(IcuError::InvalidState { op, state })
}

#[test]
#[cfg(not(debug_assertions))]
fn invalid_calls_leave_stopped_driver_untouched() {
    use icu_core::IcuOp;

    let mut icu = stopped_driver();

    assert_eq!(icu.init(), rejected(IcuOp::Init, IcuState::Stop));
    assert_eq!(icu.stop(), rejected(IcuOp::Stop, IcuState::Stop));
    assert_eq!(icu.start_capture(), rejected(IcuOp::StartCapture, IcuState::Stop));
    assert_eq!(icu.wait_capture(), rejected(IcuOp::WaitCapture, IcuState::Stop));
    assert_eq!(icu.stop_capture(), rejected(IcuOp::StopCapture, IcuState::Stop));
    assert_eq!(
        icu.enable_notifications(),
        rejected(IcuOp::EnableNotifications, IcuState::Stop)
    );
    assert_eq!(
        icu.disable_notifications(),
        rejected(IcuOp::DisableNotifications, IcuState::Stop)
    );

    assert_eq!(icu.state(), IcuState::Stop);
    assert!(icu.config().is_none());
    let b = icu.backend();
    assert_eq!((b.starts, b.stops), (0, 0));
    assert_eq!((b.capture_starts, b.capture_stops), (0, 0));
    assert_eq!((b.unmasks, b.masks, b.polls), (0, 0, 0));
}

#[test]
#[cfg(not(debug_assertions))]
fn invalid_calls_leave_started_driver_untouched() {
    use icu_core::IcuOp;

    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let other = IcuConfig::new(IcuMode::ActiveLow);
    let mut icu = stopped_driver();
    icu.start(&cfg).unwrap();

    assert_eq!(icu.start(&other), rejected(IcuOp::Start, IcuState::Ready));
    assert_eq!(icu.state(), IcuState::Ready);
    assert_eq!(icu.config().map(|c| c.mode), Some(IcuMode::ActiveHigh));
    assert_eq!(icu.backend().mode, Some(IcuMode::ActiveHigh));
    assert_eq!(icu.backend().starts, 1);

    assert_eq!(icu.wait_capture(), rejected(IcuOp::WaitCapture, IcuState::Ready));
    assert_eq!(icu.stop_capture(), rejected(IcuOp::StopCapture, IcuState::Ready));
    assert_eq!(icu.backend().polls, 0);
    assert_eq!(icu.backend().capture_stops, 0);

    icu.start_capture().unwrap();
    assert_eq!(icu.start_capture(), rejected(IcuOp::StartCapture, IcuState::Waiting));
    assert_eq!(icu.state(), IcuState::Waiting);
    assert_eq!(icu.backend().capture_starts, 1);
}

#[test]
#[cfg(not(debug_assertions))]
fn invalid_calls_before_init_are_rejected() {
    use icu_core::IcuOp;

    let cfg = IcuConfig::new(IcuMode::ActiveHigh);
    let mut icu = IcuDriver::new(MockBackend::new());

    assert_eq!(icu.start(&cfg), rejected(IcuOp::Start, IcuState::Uninit));
    assert_eq!(
        icu.disable_notifications(),
        rejected(IcuOp::DisableNotifications, IcuState::Uninit)
    );
    assert_eq!(icu.state(), IcuState::Uninit);
    assert!(icu.config().is_none());
    assert_eq!(icu.backend().starts, 0);
    assert_eq!(icu.backend().masks, 0);
}
