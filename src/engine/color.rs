use super::constants::*;
use super::mapper::round_half_up;
use super::position::Position;
use glam::Vec2;

/// Canonical noise colors, in tie-break priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoiseColor {
    Brown,
    Pink,
    White,
    Blue,
    Violet,
}

impl NoiseColor {
    pub const VALUES: [NoiseColor; 5] = [
        NoiseColor::Brown,
        NoiseColor::Pink,
        NoiseColor::White,
        NoiseColor::Blue,
        NoiseColor::Violet,
    ];

    pub const COUNT: usize = Self::VALUES.len();

    #[inline]
    pub fn index(self) -> usize {
        match self {
            NoiseColor::Brown => 0,
            NoiseColor::Pink => 1,
            NoiseColor::White => 2,
            NoiseColor::Blue => 3,
            NoiseColor::Violet => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NoiseColor::Brown => "Brown",
            NoiseColor::Pink => "Pink",
            NoiseColor::White => "White",
            NoiseColor::Blue => "Blue",
            NoiseColor::Violet => "Violet",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            NoiseColor::Brown => BROWN_RGB,
            NoiseColor::Pink => PINK_RGB,
            NoiseColor::White => WHITE_RGB,
            NoiseColor::Blue => BLUE_RGB,
            NoiseColor::Violet => VIOLET_RGB,
        }
    }

    /// Anchor in normalized pad space. White has none; it sits on the center band.
    pub fn anchor(self) -> Option<Vec2> {
        let a = match self {
            NoiseColor::Brown => BROWN_ANCHOR,
            NoiseColor::Pink => PINK_ANCHOR,
            NoiseColor::White => return None,
            NoiseColor::Blue => BLUE_ANCHOR,
            NoiseColor::Violet => VIOLET_ANCHOR,
        };
        Some(Vec2::new(a[0], a[1]))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorBlend {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub dominant: NoiseColor,
}

impl ColorBlend {
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A strategy for turning a pad position into per-color weights.
///
/// Only [`RadialColorModel`] is live. An older quadrant-multiplicative model
/// (left/right/top/bottom side factors multiplied per color) produced hard
/// creases along the pad's center lines and is not carried as a second
/// implementation.
pub trait ColorModel {
    /// Raw, unnormalized weights indexed by [`NoiseColor::index`].
    fn raw_weights(&self, position: Position) -> [f32; NoiseColor::COUNT];

    /// Weights renormalized to sum to 1. A zero sum yields equal weights.
    fn weights(&self, position: Position) -> [f32; NoiseColor::COUNT] {
        normalize_weights(self.raw_weights(position))
    }

    fn compute(&self, position: Position) -> ColorBlend {
        let w = self.weights(position);
        let mut channels = [0.0f32; 3];
        for color in NoiseColor::VALUES {
            let rgb = color.rgb();
            for (acc, c) in channels.iter_mut().zip(rgb) {
                *acc += w[color.index()] * c as f32;
            }
        }
        let [r, g, b] = channels.map(|c| round_half_up(c).clamp(0.0, 255.0) as u8);
        ColorBlend {
            r,
            g,
            b,
            dominant: dominant_color(&w),
        }
    }
}

/// Inverse-distance falloff around four anchors plus a white center band.
#[derive(Clone, Copy, Debug)]
pub struct RadialColorModel {
    pub radius: f32,
    pub exponent: f32,
    pub anchor_gain: f32,
    pub white_gain: f32,
}

impl Default for RadialColorModel {
    fn default() -> Self {
        Self {
            radius: COLOR_ANCHOR_RADIUS,
            exponent: COLOR_ANCHOR_EXPONENT,
            anchor_gain: COLOR_ANCHOR_GAIN,
            white_gain: COLOR_WHITE_GAIN,
        }
    }
}

impl RadialColorModel {
    fn anchor_weight(&self, p: Vec2, anchor: Vec2) -> f32 {
        let falloff = (1.0 - p.distance(anchor) / self.radius).max(0.0);
        falloff.powf(self.exponent) * self.anchor_gain
    }

    fn white_weight(&self, p: Vec2) -> f32 {
        let middle_x = center_band(p.x);
        let middle_y = center_band(p.y);
        (middle_x * middle_y).sqrt() * self.white_gain
    }
}

impl ColorModel for RadialColorModel {
    fn raw_weights(&self, position: Position) -> [f32; NoiseColor::COUNT] {
        let p = position.normalized();
        NoiseColor::VALUES.map(|color| match color.anchor() {
            Some(anchor) => self.anchor_weight(p, anchor),
            None => self.white_weight(p),
        })
    }
}

/// Color blend for a pad position using the default radial model.
pub fn compute_color(position: Position) -> ColorBlend {
    RadialColorModel::default().compute(position)
}

// 1 at the center of the axis, 0 at either edge.
#[inline]
fn center_band(v: f32) -> f32 {
    (1.0 - (2.0 * v - 1.0).abs()).clamp(0.0, 1.0)
}

pub fn normalize_weights(raw: [f32; NoiseColor::COUNT]) -> [f32; NoiseColor::COUNT] {
    let total: f32 = raw.iter().sum();
    if total > 0.0 && total.is_finite() {
        raw.map(|w| w / total)
    } else {
        [1.0 / NoiseColor::COUNT as f32; NoiseColor::COUNT]
    }
}

/// Highest weight wins; ties go to the earlier color in [`NoiseColor::VALUES`].
pub fn dominant_color(weights: &[f32; NoiseColor::COUNT]) -> NoiseColor {
    let mut best = NoiseColor::Brown;
    let mut best_w = f32::NEG_INFINITY;
    for color in NoiseColor::VALUES {
        let w = weights[color.index()];
        if w > best_w {
            best_w = w;
            best = color;
        }
    }
    best
}
