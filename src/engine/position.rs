use super::constants::{PAD_CENTER, PAD_MAX, PAD_MIN};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pad coordinate in percent: `x` runs left to right, `y` top to bottom.
///
/// Every derived value (filter parameters, color, readout) is a function of
/// this pair, so it is the only thing worth persisting between sessions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Default for Position {
    fn default() -> Self {
        Self::CENTER
    }
}

impl Position {
    pub const CENTER: Position = Position {
        x: PAD_CENTER,
        y: PAD_CENTER,
    };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into the pad range. Non-finite values collapse to the
    /// nearest sensible point (NaN goes to the center of that axis).
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_axis(self.x),
            y: clamp_axis(self.y),
        }
    }

    /// Position in `[0, 1]²`, clamped.
    #[inline]
    pub fn normalized(self) -> Vec2 {
        let p = self.clamped();
        Vec2::new(p.x / PAD_MAX, p.y / PAD_MAX)
    }

    /// Linear interpolation towards `to`; `t` is not clamped.
    #[inline]
    pub fn lerp(self, to: Position, t: f32) -> Position {
        Position {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

#[inline]
fn clamp_axis(v: f32) -> f32 {
    if v.is_nan() {
        PAD_CENTER
    } else {
        v.clamp(PAD_MIN, PAD_MAX)
    }
}
