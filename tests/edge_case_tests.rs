//! Edge case tests for mapping, smoothing and classification


use std::time::{Duration, Instant};
use test_helpers::{create_test_hand, create_test_interpreter};
use virtual_mouse::{
    gesture::{
        distance::find_distance,
        fingers::fingers_up,
        mapping::{ActiveRegion, ScreenSize},
        GestureConfig, GestureInterpreter, GestureState, Mode,
    },
    landmarks::LandmarkSet,
};

#[test]
fn test_fingertip_far_outside_frame_extrapolates() {
    let interpreter = create_test_interpreter(1.0);
    let mut state = GestureState::default();
    let hand = create_test_hand([0, 1, 0, 0, 0], (-1000, -1000), (0, 0));

    let target = interpreter.process(Some(&hand), &mut state, Instant::now()).target.unwrap();
    assert!(target.x > 1920.0, "mirrored x extrapolates past the right edge");
    assert!(target.y < 0.0);
    assert!(target.x.is_finite() && target.y.is_finite());
}

#[test]
fn test_minimal_margin() {
    let region = ActiveRegion::new(640, 480, 1).unwrap();
    let screen = ScreenSize::new(1920, 1080);
    assert_eq!(region.map_to_screen(1, 1, screen), (0.0, 0.0));
    assert_eq!(region.map_to_screen(639, 479, screen), (1920.0, 1080.0));
}

#[test]
fn test_large_smoothing_barely_moves() {
    let interpreter = GestureInterpreter::new(GestureConfig {
        region: ActiveRegion::new(640, 480, 100).unwrap(),
        screen: ScreenSize::new(1920, 1080),
        smoothing: 1e6,
        click_distance: 40.0,
        click_delay: Duration::from_millis(100),
    })
    .unwrap();
    let mut state = GestureState::default();
    let hand = create_test_hand([0, 1, 0, 0, 0], (540, 380), (0, 0));

    interpreter.process(Some(&hand), &mut state, Instant::now());
    assert!(state.pointer.loc_x < 0.01);
    assert!(state.pointer.loc_y < 0.01);
}

#[test]
fn test_click_distance_is_strict() {
    let interpreter = create_test_interpreter(7.0);
    let mut state = GestureState::default();

    let exactly = create_test_hand([0, 1, 1, 0, 0], (300, 200), (340, 200));
    let outcome = interpreter.process(Some(&exactly), &mut state, Instant::now());
    assert_eq!(outcome.mode(), Mode::Click);
    assert!(!outcome.pinched, "40px is not below the 40px threshold");

    let under = create_test_hand([0, 1, 1, 0, 0], (300, 200), (339, 200));
    assert!(interpreter.process(Some(&under), &mut state, Instant::now()).clicked);
}

#[test]
fn test_zero_click_delay_allows_every_pinch() {
    let mut config = *create_test_interpreter(7.0).config();
    config.click_delay = Duration::ZERO;
    let interpreter = GestureInterpreter::new(config).unwrap();
    let mut state = GestureState::default();
    let pinch = create_test_hand([0, 1, 1, 0, 0], (300, 200), (305, 200));
    let now = Instant::now();

    let clicks = (0..5)
        .filter(|_| interpreter.process(Some(&pinch), &mut state, now).clicked)
        .count();
    assert_eq!(clicks, 5);
}

#[test]
fn test_extreme_coordinates_do_not_panic() {
    let points = vec![(i32::MAX / 4, i32::MIN / 4); 21];
    let set = LandmarkSet::from_points(&points).unwrap();
    assert_eq!(fingers_up(&set).unwrap().count_up(), 0);

    let span = find_distance(&set, 8, 12).unwrap();
    assert_eq!(span.length, 0.0);

    let interpreter = create_test_interpreter(7.0);
    let mut state = GestureState::default();
    let outcome = interpreter.process(Some(&set), &mut state, Instant::now());
    assert_eq!(outcome.mode(), Mode::Idle);
}

#[test]
fn test_empty_landmark_set() {
    let interpreter = create_test_interpreter(7.0);
    let mut state = GestureState::default();
    let outcome = interpreter.process(Some(&LandmarkSet::default()), &mut state, Instant::now());
    assert_eq!(outcome.fingers, None);
    assert_eq!(outcome.index_tip, None);
    assert_eq!(outcome.mode(), Mode::Idle);
}
