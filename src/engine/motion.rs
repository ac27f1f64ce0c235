use super::constants::{MOTION_DURATION_MS, PAD_MAX, PAD_MIN};
use super::position::Position;
use instant::Instant;
use rand::Rng;
use std::time::Duration;

/// Gesture that starts an eased glide across the pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionRequest {
    /// Glide to a uniformly random point.
    Random,
    /// Glide back to the pad center.
    Reset,
}

impl MotionRequest {
    pub fn target<R: Rng + ?Sized>(self, rng: &mut R) -> Position {
        match self {
            MotionRequest::Random => random_position(rng),
            MotionRequest::Reset => Position::CENTER,
        }
    }
}

pub fn random_position<R: Rng + ?Sized>(rng: &mut R) -> Position {
    Position::new(
        rng.gen_range(PAD_MIN..=PAD_MAX),
        rng.gen_range(PAD_MIN..=PAD_MAX),
    )
}

#[inline]
pub fn ease_out_cubic(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[derive(Clone, Copy, Debug)]
struct Motion {
    from: Position,
    to: Position,
    started: Instant,
    progress: f32,
}

/// Result of advancing a motion by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionStep {
    pub position: Position,
    pub progress: f32,
    pub finished: bool,
}

/// Holds at most one in-flight glide. Starting a new one replaces (cancels)
/// the old one, so two motions can never interleave their writes.
#[derive(Clone, Debug)]
pub struct MotionController {
    duration: Duration,
    active: Option<Motion>,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(Duration::from_millis(MOTION_DURATION_MS))
    }
}

impl MotionController {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn target(&self) -> Option<Position> {
        self.active.map(|m| m.to)
    }

    pub fn start(&mut self, from: Position, to: Position, now: Instant) {
        if self.cancel() {
            log::debug!("[motion] replaced in-flight motion");
        }
        let to = to.clamped();
        log::debug!(
            "[motion] start ({:.1},{:.1}) -> ({:.1},{:.1})",
            from.x,
            from.y,
            to.x,
            to.y
        );
        self.active = Some(Motion {
            from: from.clamped(),
            to,
            started: now,
            progress: 0.0,
        });
    }

    /// Drop the in-flight motion, if any. Returns true if one was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Advance to `now`. Progress never moves backwards even if the clock
    /// does. The final step lands exactly on the target and clears the motion.
    pub fn tick(&mut self, now: Instant) -> Option<MotionStep> {
        let motion = self.active.as_mut()?;
        let elapsed = if now > motion.started {
            now.duration_since(motion.started)
        } else {
            Duration::ZERO
        };
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        };
        motion.progress = motion.progress.max(raw);
        let progress = motion.progress;

        if progress >= 1.0 {
            let to = motion.to;
            self.active = None;
            log::debug!("[motion] finished at ({:.1},{:.1})", to.x, to.y);
            return Some(MotionStep {
                position: to,
                progress: 1.0,
                finished: true,
            });
        }

        let eased = ease_out_cubic(progress);
        Some(MotionStep {
            position: motion.from.lerp(motion.to, eased),
            progress,
            finished: false,
        })
    }
}
