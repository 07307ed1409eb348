// extensions/easing.rs
//
// Timing curves for one-shot animations.
// Pure math, no dependency on transforms or tasks.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Half-cosine ease-in/ease-out: zero velocity at both endpoints.
    CosineInOut,
}

impl Easing {
    /// Map the controller's "ease in and out" flag to a curve.
    pub fn from_flag(ease: bool) -> Self {
        if ease {
            Easing::CosineInOut
        } else {
            Easing::Linear
        }
    }

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CosineInOut => 0.5 * (1.0 - (PI * t).cos()),
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}
