#![allow(clippy::float_cmp)]

use super::*;

const TIMING: Timing = Timing { move_speed: 3.0, fade_ms: 400 };

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn expect_leg(step: Option<Step>) -> LegStart {
    match step {
        Some(Step::Leg(start)) => start,
        other => panic!("expected a leg, got {other:?}"),
    }
}

// =============================================================
// axis_duration_ms
// =============================================================

#[test]
fn duration_is_floor_of_distance_times_twelve_over_speed() {
    assert_eq!(axis_duration_ms(100.0, 3.0), 400);
    assert_eq!(axis_duration_ms(-100.0, 3.0), 400);
    assert_eq!(axis_duration_ms(10.0, 7.0), 17);
    assert_eq!(axis_duration_ms(0.0, 3.0), 0);
}

#[test]
fn duration_with_bad_speed_uses_default() {
    assert_eq!(axis_duration_ms(30.0, 0.0), axis_duration_ms(30.0, DEFAULT_MOVE_SPEED));
    assert_eq!(axis_duration_ms(30.0, -1.0), 120);
}

// =============================================================
// Leg sequencing
// =============================================================

#[test]
fn plain_destination_moves_horizontal_then_vertical() {
    let mut m = Motion::new(p(0.0, 0.0));
    let h = m.begin(Destination::point(p(30.0, -60.0)), p(30.0, -60.0), 0, TIMING);
    assert_eq!(h.leg, Leg::Horizontal);
    assert_eq!(h.to, p(30.0, 0.0));
    assert_eq!(h.duration_ms, 120);
    assert_eq!(h.clip, Some(Clip::WalkRight));
    assert!(m.is_animating());

    let v = expect_leg(m.finish_leg(120, TIMING));
    assert_eq!(v.leg, Leg::Vertical);
    assert_eq!(v.to, p(30.0, -60.0));
    assert_eq!(v.duration_ms, 240);
    assert_eq!(v.clip, Some(Clip::WalkUp));
    assert_eq!(m.position(), p(30.0, 0.0));

    assert_eq!(m.finish_leg(360, TIMING), Some(Step::Arrived(None)));
    assert!(!m.is_animating());
    assert_eq!(m.position(), p(30.0, -60.0));
    assert!(m.is_visible());
}

#[test]
fn delay_comes_first_and_fade_comes_last() {
    let mut m = Motion::new(p(10.0, 10.0));
    let dest = Destination::point(p(0.0, 10.0))
        .with_delay(250)
        .disappearing()
        .on_arrive(Arrival::HandOff);

    let first = m.begin(dest, p(0.0, 10.0), 0, TIMING);
    assert_eq!(first.leg, Leg::Delay);
    assert_eq!(first.duration_ms, 250);
    assert_eq!(first.to, p(10.0, 10.0));

    let h = expect_leg(m.finish_leg(250, TIMING));
    assert_eq!(h.leg, Leg::Horizontal);
    assert_eq!(h.clip, Some(Clip::WalkLeft));

    let v = expect_leg(m.finish_leg(290, TIMING));
    assert_eq!(v.leg, Leg::Vertical);
    assert_eq!(v.clip, None);
    assert_eq!(v.duration_ms, 0);

    let fade = expect_leg(m.finish_leg(290, TIMING));
    assert_eq!(fade.leg, Leg::FadeOut);
    assert_eq!(fade.duration_ms, 400);

    assert_eq!(m.finish_leg(690, TIMING), Some(Step::Arrived(Some(Arrival::HandOff))));
    assert!(!m.is_visible());
}

#[test]
fn finish_leg_when_idle_is_none() {
    let mut m = Motion::new(p(0.0, 0.0));
    assert_eq!(m.finish_leg(0, TIMING), None);
}

#[test]
fn begin_makes_hidden_entity_visible_again() {
    let mut m = Motion::new(p(0.0, 0.0));
    m.begin(Destination::point(p(0.0, 0.0)).disappearing(), p(0.0, 0.0), 0, TIMING);
    m.finish_leg(0, TIMING);
    m.finish_leg(0, TIMING);
    m.finish_leg(400, TIMING);
    assert!(!m.is_visible());

    m.begin(Destination::point(p(5.0, 0.0)), p(5.0, 0.0), 400, TIMING);
    assert!(m.is_visible());
}

// =============================================================
// Queue
// =============================================================

#[test]
fn queue_is_fifo() {
    let mut m = Motion::new(p(0.0, 0.0));
    m.enqueue(Destination::point(p(1.0, 0.0)));
    m.enqueue(Destination::point(p(2.0, 0.0)));
    assert_eq!(m.queued(), 2);
    assert_eq!(m.take_next().map(|d| d.target), Some(Target::Point(p(1.0, 0.0))));
    assert_eq!(m.take_next().map(|d| d.target), Some(Target::Point(p(2.0, 0.0))));
    assert!(m.take_next().is_none());
}

#[test]
fn clear_queue_keeps_in_flight() {
    let mut m = Motion::new(p(0.0, 0.0));
    m.begin(Destination::point(p(9.0, 0.0)), p(9.0, 0.0), 0, TIMING);
    m.enqueue(Destination::point(p(1.0, 0.0)));
    m.clear_queue();
    assert_eq!(m.queued(), 0);
    assert!(m.is_animating());
}

// =============================================================
// Cancellation and interpolation
// =============================================================

#[test]
fn position_at_interpolates_current_leg() {
    let mut m = Motion::new(p(0.0, 0.0));
    m.begin(Destination::point(p(300.0, 0.0)), p(300.0, 0.0), 1000, TIMING);
    assert_eq!(m.position_at(1000), p(0.0, 0.0));
    assert_eq!(m.position_at(1600), p(150.0, 0.0));
    assert_eq!(m.position_at(5000), p(300.0, 0.0));
}

#[test]
fn cancel_snaps_to_interpolated_position_and_bumps_generation() {
    let mut m = Motion::new(p(0.0, 0.0));
    m.begin(Destination::point(p(300.0, 0.0)), p(300.0, 0.0), 0, TIMING);
    let before = m.generation();

    assert!(m.cancel(600));
    assert!(!m.is_animating());
    assert_eq!(m.position(), p(150.0, 0.0));
    assert_eq!(m.generation(), before + 1);
    assert_eq!(m.finish_leg(1200, TIMING), None);
}

#[test]
fn cancel_when_idle_still_invalidates() {
    let mut m = Motion::new(p(0.0, 0.0));
    assert!(!m.cancel(0));
    assert_eq!(m.generation(), 1);
}

#[test]
fn initial_position_survives_moves() {
    let mut m = Motion::new(p(4.0, 4.0));
    m.set_position(p(50.0, 50.0));
    assert_eq!(m.initial(), p(4.0, 4.0));
    assert_eq!(m.position(), p(50.0, 50.0));
}
