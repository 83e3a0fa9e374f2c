use drawerpose_drawer::{DrawerConfig, Side, SnapPointSpec, TransitionState};
use drawerpose_foundation::{ElementMarker, Orientation, ScrollState};
use drawerpose_testing::prelude::*;
use drawerpose_testing::robot_assertions::{
    assert_approx_eq, assert_drag_consistent, assert_resting_at,
};

const SIZE: f32 = 400.0;

fn thirds() -> DrawerConfig {
    DrawerConfig::new().with_snap_points([
        SnapPointSpec::CLOSED,
        SnapPointSpec::Fraction(0.5),
        SnapPointSpec::OPEN,
    ])
}

fn opened(config: DrawerConfig) -> DrawerRobot {
    let mut robot = DrawerRobot::new(config, SIZE).expect("valid drawer");
    robot.open_and_settle();
    robot
}

#[test]
fn slow_release_at_three_eighths_open_snaps_to_half() {
    let mut robot = opened(thirds());
    assert_resting_at(robot.drawer(), 0.0, "opened");

    robot.press(100.0, None);
    robot.drag_by(250.0, 25, 16);
    assert_approx_eq(robot.drawer().open_percentage(), 0.375, 1e-4, "before release");

    // Let the velocity window go stale so the release carries no momentum.
    robot.advance_millis(500);
    robot.release();
    assert_eq!(robot.drawer().transition_state(), TransitionState::Snapping);

    robot.settle();
    assert_resting_at(robot.drawer(), 200.0, "settled");
    assert_eq!(
        robot.drawer().active_snap_point(),
        Some(SnapPointSpec::Fraction(0.5))
    );
    assert_approx_eq(robot.drawer().open_percentage(), 0.5, 1e-4, "settled");
}

fn skippable(allow_skipping: bool) -> DrawerConfig {
    DrawerConfig::new()
        .with_snap_points([
            SnapPointSpec::Fraction(0.1),
            SnapPointSpec::Fraction(0.5),
            SnapPointSpec::OPEN,
        ])
        .with_default_snap_point(SnapPointSpec::Fraction(0.1))
        .with_allow_skipping_snap_points(allow_skipping)
}

#[test]
fn fast_flick_skips_intermediate_points_when_allowed() {
    let mut robot = opened(skippable(true));
    assert_resting_at(robot.drawer(), 360.0, "opened at 0.1");

    robot.flick(300.0, -200.0);
    robot.settle();

    assert_resting_at(robot.drawer(), 0.0, "flicked open");
    assert_eq!(robot.drawer().active_snap_point(), Some(SnapPointSpec::OPEN));
}

#[test]
fn fast_flick_moves_one_point_without_skipping() {
    let mut robot = opened(skippable(false));

    robot.flick(300.0, -200.0);
    robot.settle();

    assert_resting_at(robot.drawer(), 200.0, "stopped at the neighbour");
    assert_eq!(
        robot.drawer().active_snap_point(),
        Some(SnapPointSpec::Fraction(0.5))
    );
}

#[test]
fn flick_toward_closed_dismisses() {
    let config = DrawerConfig::new().with_snap_points([SnapPointSpec::CLOSED, SnapPointSpec::OPEN]);
    let mut robot = opened(config);

    robot.flick(100.0, 200.0);
    assert!(robot.drawer().is_open(), "still open while snapping away");
    robot.settle();

    let drawer = robot.drawer();
    assert!(!drawer.is_open());
    assert_eq!(drawer.active_snap_point(), None);
    assert_approx_eq(drawer.translate(), SIZE, 0.5, "closed");
    assert_eq!(
        robot.host().calls(),
        vec![HostCall::OpenChange(false), HostCall::ScrollLock(false)]
    );
}

#[test]
fn horizontal_drawer_follows_the_x_axis() {
    let config = thirds().with_side(Side::Left);
    let mut robot = opened(config);

    robot.press(300.0, None);
    robot.drag_by(120.0, 6, 16);
    let geometry = robot.drawer().geometry();
    assert_eq!(geometry.side, Side::Left);
    assert_approx_eq(geometry.translate, 120.0, 1e-3, "dragged");
    assert_approx_eq(geometry.translation().x, -120.0, 1e-3, "slides left");
    assert_eq!(geometry.translation().y, 0.0);
    robot.release();
}

#[test]
fn nested_scrollable_consumes_movement_until_exhausted() {
    let mut tree = FakeElementTree::new();
    let content = tree.root(ElementMarker::DrawerContent);
    let list = tree.child(content);
    let list_scroll = ScrollState::with_range(50.0, 300.0);
    tree.make_scrollable(list, Orientation::Vertical, list_scroll.clone());
    let row = tree.child(list);

    let mut robot = opened(thirds());
    robot.press(100.0, Some(tree.hit(row)));
    assert!(!robot.drawer().is_dragging());

    robot.drag_by(50.0, 5, 16);
    assert_eq!(list_scroll.value(), 0.0);
    assert_eq!(robot.drawer().translate(), 0.0);
    assert!(!robot.drawer().is_dragging());

    // Within the threshold the drawer still holds still.
    robot.drag_by(10.0, 1, 16);
    assert_eq!(robot.drawer().translate(), 0.0);
    assert!(!robot.drawer().is_dragging());

    robot.drag_by(10.0, 1, 16);
    assert!(robot.drawer().is_dragging());
    assert_approx_eq(robot.drawer().translate(), 10.0, 1e-3, "handed off");
    assert_drag_consistent(robot.drawer(), "after handoff");

    robot.drag_by(40.0, 4, 16);
    assert_approx_eq(robot.drawer().translate(), 50.0, 1e-3, "dragging");
    robot.release();
    robot.settle();
}

#[test]
fn scrollable_is_ignored_when_drawer_is_not_fully_open() {
    let mut tree = FakeElementTree::new();
    let content = tree.root(ElementMarker::DrawerContent);
    let list = tree.child(content);
    let list_scroll = ScrollState::with_range(50.0, 300.0);
    tree.make_scrollable(list, Orientation::Vertical, list_scroll.clone());

    let config = thirds().with_default_snap_point(SnapPointSpec::Fraction(0.5));
    let mut robot = opened(config);
    robot.press(100.0, Some(tree.hit(list)));
    assert!(robot.drawer().is_dragging());

    robot.drag_by(30.0, 3, 16);
    assert_eq!(list_scroll.value(), 50.0);
    assert_approx_eq(robot.drawer().translate(), 230.0, 1e-3, "drawer moved");
    robot.release();
}

#[test]
fn no_drag_subtree_never_starts_a_drag() {
    let mut tree = FakeElementTree::new();
    let content = tree.root(ElementMarker::DrawerContent);
    let toolbar = tree.child(content);
    tree.mark(toolbar, ElementMarker::NoDrag);
    let button = tree.child(toolbar);

    let mut robot = opened(thirds());
    let down = robot.press(100.0, Some(tree.hit(button)));
    assert!(!down.is_consumed());

    robot.drag_by(150.0, 10, 16);
    let up = robot.release();
    assert!(!up.is_consumed());
    assert_resting_at(robot.drawer(), 0.0, "untouched");
    assert!(!robot.has_pending_frames());
}

#[test]
fn cancel_mid_drag_snaps_then_goes_idle() {
    let mut robot = opened(thirds());
    robot.press(100.0, None);
    robot.drag_by(90.0, 9, 16);
    assert!(robot.drawer().is_dragging());
    assert_drag_consistent(robot.drawer(), "mid drag");

    robot.cancel();
    assert!(!robot.drawer().is_dragging());
    assert_eq!(robot.drawer().transition_state(), TransitionState::Snapping);
    assert_drag_consistent(robot.drawer(), "after cancel");

    robot.settle();
    assert_eq!(robot.drawer().transition_state(), TransitionState::Idle);
    assert!(robot.drawer().is_open());
}

#[test]
fn dragging_flag_tracks_the_session_throughout_a_gesture() {
    let mut robot = opened(thirds());
    assert_drag_consistent(robot.drawer(), "idle");

    robot.press(100.0, None);
    for _ in 0..10 {
        robot.drag_by(12.0, 1, 16);
        assert!(robot.drawer().is_dragging());
        assert!(robot.drawer().is_transitioning());
        assert_drag_consistent(robot.drawer(), "moving");
    }
    robot.release();
    assert_drag_consistent(robot.drawer(), "released");

    while robot.has_pending_frames() {
        robot.advance_frame();
        assert!(!robot.drawer().is_dragging());
        assert_drag_consistent(robot.drawer(), "snapping");
    }
    assert!(!robot.drawer().is_transitioning());
}

#[test]
fn press_during_snap_takes_over_from_the_animation() {
    let mut robot = opened(thirds());
    robot.swipe(100.0, 150.0, 15, 16);
    robot.pump_frames(3);
    assert_eq!(robot.drawer().transition_state(), TransitionState::Snapping);
    let mid_flight = robot.drawer().translate();

    robot.press(250.0, None);
    assert!(robot.drawer().is_dragging());
    assert_eq!(robot.drawer().transition_state(), TransitionState::Idle);
    assert_eq!(robot.drawer().translate(), mid_flight);

    robot.pump_frames(5);
    assert_eq!(robot.drawer().translate(), mid_flight);
    robot.release();
    robot.settle();
}
