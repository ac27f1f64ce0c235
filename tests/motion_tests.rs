// Host-side tests for eased pad motion and cooperative task handles.

#![allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use common::engine::motion::*;
use common::engine::position::Position;
use common::engine::task::TaskSlot;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn ease_out_cubic_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_relative_eq!(ease_out_cubic(0.5), 0.875, epsilon = 1e-6);
    assert_eq!(ease_out_cubic(-1.0), 0.0);
    assert_eq!(ease_out_cubic(2.0), 1.0);
    let mut prev = 0.0;
    for i in 0..=100 {
        let e = ease_out_cubic(i as f32 / 100.0);
        assert!(e >= prev);
        prev = e;
    }
}

#[test]
fn default_duration_is_600ms() {
    assert_eq!(MotionController::default().duration(), ms(600));
}

#[test]
fn glide_reaches_the_target_exactly_and_clears() {
    let mut m = MotionController::new(ms(600));
    let t0 = Instant::now();
    let from = Position::new(0.0, 0.0);
    let to = Position::new(80.0, 40.0);
    m.start(from, to, t0);
    assert!(m.is_active());
    assert_eq!(m.target(), Some(to));

    let mid = m.tick(t0 + ms(300)).expect("mid step");
    assert!(!mid.finished);
    assert_relative_eq!(mid.progress, 0.5, epsilon = 1e-3);
    assert_relative_eq!(mid.position.x, 70.0, epsilon = 0.1);
    assert_relative_eq!(mid.position.y, 35.0, epsilon = 0.1);

    let last = m.tick(t0 + ms(600)).expect("final step");
    assert!(last.finished);
    assert_eq!(last.progress, 1.0);
    assert_eq!(last.position, to);
    assert!(!m.is_active());
    assert!(m.tick(t0 + ms(700)).is_none());
}

#[test]
fn progress_never_moves_backwards() {
    let mut m = MotionController::new(ms(600));
    let t0 = Instant::now();
    m.start(Position::new(0.0, 0.0), Position::new(100.0, 100.0), t0);
    let a = m.tick(t0 + ms(400)).expect("step");
    let b = m.tick(t0 + ms(100)).expect("step");
    assert!(b.progress >= a.progress);
    assert_eq!(b.position, a.position);
}

#[test]
fn intermediate_positions_stay_between_endpoints() {
    let mut m = MotionController::new(ms(600));
    let t0 = Instant::now();
    let from = Position::new(90.0, 10.0);
    let to = Position::new(10.0, 60.0);
    m.start(from, to, t0);
    for step in 1..60 {
        let s = m.tick(t0 + ms(step * 10)).expect("step");
        assert!(s.position.x <= 90.0 + 1e-3 && s.position.x >= 10.0 - 1e-3);
        assert!(s.position.y >= 10.0 - 1e-3 && s.position.y <= 60.0 + 1e-3);
    }
}

#[test]
fn starting_again_replaces_the_running_glide() {
    let mut m = MotionController::new(ms(600));
    let t0 = Instant::now();
    m.start(Position::new(0.0, 0.0), Position::new(100.0, 0.0), t0);
    m.tick(t0 + ms(200));
    let t1 = t0 + ms(250);
    m.start(Position::new(40.0, 0.0), Position::CENTER, t1);
    assert_eq!(m.target(), Some(Position::CENTER));

    let s = m.tick(t1).expect("fresh motion");
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.position, Position::new(40.0, 0.0));
    let done = m.tick(t1 + ms(600)).expect("done");
    assert_eq!(done.position, Position::CENTER);
}

#[test]
fn cancel_stops_without_writing() {
    let mut m = MotionController::new(ms(600));
    let t0 = Instant::now();
    m.start(Position::CENTER, Position::new(0.0, 0.0), t0);
    assert!(m.cancel());
    assert!(!m.cancel());
    assert!(m.tick(t0 + ms(100)).is_none());
}

#[test]
fn zero_duration_finishes_on_first_tick() {
    let mut m = MotionController::new(Duration::ZERO);
    let t0 = Instant::now();
    m.start(Position::CENTER, Position::new(5.0, 5.0), t0);
    let s = m.tick(t0).expect("step");
    assert!(s.finished);
    assert_eq!(s.position, Position::new(5.0, 5.0));
}

#[test]
fn targets_are_clamped() {
    let mut m = MotionController::default();
    m.start(Position::CENTER, Position::new(150.0, -3.0), Instant::now());
    assert_eq!(m.target(), Some(Position::new(100.0, 0.0)));
}

#[test]
fn requests_pick_their_targets() {
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(MotionRequest::Reset.target(&mut rng), Position::CENTER);
    for _ in 0..200 {
        let p = MotionRequest::Random.target(&mut rng);
        assert!((0.0..=100.0).contains(&p.x));
        assert!((0.0..=100.0).contains(&p.y));
    }
}

#[test]
fn random_positions_cover_the_pad() {
    let mut rng = StdRng::seed_from_u64(42);
    let points: Vec<Position> = (0..500).map(|_| random_position(&mut rng)).collect();
    assert!(points.iter().any(|p| p.x < 25.0));
    assert!(points.iter().any(|p| p.x > 75.0));
    assert!(points.iter().any(|p| p.y < 25.0));
    assert!(points.iter().any(|p| p.y > 75.0));
}

// ---------------- Task handles ----------------

#[test]
fn cancelled_token_goes_stale() {
    let slot = TaskSlot::new();
    let token = slot.spawn();
    assert!(token.is_live());
    assert!(slot.is_running());
    assert!(slot.cancel());
    assert!(!token.is_live());
    assert!(!slot.is_running());
    assert!(!slot.cancel());
}

#[test]
fn respawn_invalidates_the_previous_token() {
    let slot = TaskSlot::new();
    let first = slot.spawn();
    let second = slot.spawn();
    assert!(!first.is_live());
    assert!(second.is_live());

    // A stale task finishing must not clear its successor.
    first.finish();
    assert!(second.is_live());
    assert!(slot.is_running());

    second.finish();
    assert!(!second.is_live());
    assert!(!slot.is_running());
}

#[test]
fn cloned_tokens_share_liveness() {
    let slot = TaskSlot::new();
    let token = slot.spawn();
    let copy = token.clone();
    copy.finish();
    assert!(!token.is_live());
    assert!(!slot.is_running());
}
