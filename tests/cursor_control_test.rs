//! Tests for pointer output

use virtual_mouse::{
    cursor_control::{CursorController, FailSafe, NullSink, PointerSink},
    gesture::mapping::ScreenSize,
    Error,
};

#[test]
fn test_fail_safe_only_blocks_corners() {
    let guard = FailSafe::new(ScreenSize::new(1920, 1080));

    for (x, y) in [(0.0, 0.0), (1919.0, 0.0), (0.0, 1079.0), (1919.0, 1079.0), (-50.0, -50.0), (2400.0, 1300.0)] {
        assert!(matches!(guard.check(x, y), Err(Error::FailSafe(_, _))), "({x}, {y}) should trip");
    }
    for (x, y) in [(960.0, 540.0), (0.0, 540.0), (960.0, 1079.0), (1.0, 1.0)] {
        assert!(guard.check(x, y).is_ok(), "({x}, {y}) should pass");
    }
}

#[test]
fn test_fail_safe_rejects_non_finite() {
    let guard = FailSafe::new(ScreenSize::new(1920, 1080));
    assert!(matches!(guard.check(f64::NAN, 10.0), Err(Error::InvalidInput(_))));
}

#[test]
fn test_null_sink_accepts_everything() {
    let mut sink = NullSink::new(ScreenSize::new(1280, 720));
    assert!(sink.move_to(f64::MAX, f64::MIN).is_ok());
    assert!(sink.click().is_ok());
    assert_eq!(sink.screen_size(), ScreenSize::new(1280, 720));
}

#[test]
#[ignore = "Requires X11 display"]
fn test_x11_move_and_click() {
    let mut controller = CursorController::new().expect("Failed to create cursor controller");
    let ScreenSize { width, height } = controller.screen_size();

    controller
        .move_to(f64::from(width) / 2.0, f64::from(height) / 2.0)
        .expect("move failed");
    assert!(controller.click().is_ok());

    // Off-screen targets are clamped rather than rejected
    assert!(controller.move_to(-100.0, 1e6).is_ok());
}

#[test]
#[ignore = "Requires X11 display"]
fn test_x11_fail_safe() {
    let mut controller = CursorController::new()
        .expect("Failed to create cursor controller")
        .with_fail_safe(true);
    assert!(matches!(controller.move_to(0.0, 0.0), Err(Error::FailSafe(0, 0))));
}
