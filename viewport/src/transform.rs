//! Pan/zoom transform state and coordinate conversions.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE};

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the rendering surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space centre, the pivot for keyboard zoom.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Inclusive scale range every transform is clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: MIN_SCALE, max: MAX_SCALE }
    }
}

impl ScaleBounds {
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(&self, scale: f64) -> bool {
        (self.min..=self.max).contains(&scale)
    }
}

/// Pan/zoom applied to the content group.
///
/// `translate_x` / `translate_y` are in screen pixels.
/// `scale` is a factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { translate_x: 0.0, translate_y: 0.0, scale: 1.0 };

    #[must_use]
    pub fn new(translate_x: f64, translate_y: f64, scale: f64) -> Self {
        Self { translate_x, translate_y, scale }
    }

    /// The identity transform, regardless of the current value.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::IDENTITY
    }

    /// Pan by a screen-space delta. The delta is not divided by scale.
    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self { translate_x: self.translate_x + dx, translate_y: self.translate_y + dy, ..self }
    }

    /// Scale by `factor` around a screen-space pivot, clamped to `bounds`.
    ///
    /// The logical point under `pivot` is the same before and after. When the
    /// clamp kicks in, the clamped ratio is used for the translate as well, so a
    /// request past a bound leaves the transform unchanged. An overflowed
    /// factor (`inf`, or `0` from underflow) lands on the matching bound; NaN
    /// and negative factors are ignored.
    #[must_use]
    pub fn scale_at(self, pivot: Point, factor: f64, bounds: &ScaleBounds) -> Self {
        if factor.is_nan() || factor < 0.0 {
            return self;
        }
        let new_scale = bounds.clamp(self.scale * factor);
        let ratio = new_scale / self.scale;
        Self {
            translate_x: pivot.x - (pivot.x - self.translate_x) * ratio,
            translate_y: pivot.y - (pivot.y - self.translate_y) * ratio,
            scale: new_scale,
        }
    }

    /// Convert a screen-space point to logical (content) coordinates.
    #[must_use]
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert a logical point to screen coordinates.
    #[must_use]
    pub fn logical_to_screen(&self, logical: Point) -> Point {
        Point {
            x: logical.x * self.scale + self.translate_x,
            y: logical.y * self.scale + self.translate_y,
        }
    }

    /// Component-wise linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            translate_x: self.translate_x + (other.translate_x - self.translate_x) * t,
            translate_y: self.translate_y + (other.translate_y - self.translate_y) * t,
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }
}

/// SVG `transform` attribute value.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate({},{}) scale({})", self.translate_x, self.translate_y, self.scale)
    }
}
