// extensions/tween.rs
//
// One-shot animation of a single scalar of position or rotation.
// The task owns a snapshot of the vector it started from and produces the
// full vector on every step, so the other two components never drift.
//
// Usage:
//   let mut task = AnimationTask::create(&host, Property::Position, Dimension::X, 5.0, 2.0, Easing::Linear)?;
//   let outcome = task.step(dt)?;
//   task.apply(&mut host, outcome.vector);
//   if outcome.complete { /* drop the task */ }

use glam::Vec3;

use super::easing::{ease, Easing};
use crate::api::types::{Dimension, MotionKey, Property};
use crate::core::transform::TransformHost;
use crate::errors::{MotionError, Result};

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Vector to write back to the animated property.
    pub vector: Vec3,
    /// True exactly once, on the step that reached the target.
    pub complete: bool,
}

/// A single in-flight animation.
#[derive(Debug, Clone)]
pub struct AnimationTask {
    property: Property,
    dimension: Dimension,
    start_vector: Vec3,
    target_value: f32,
    duration: f32,
    easing: Easing,
    elapsed: f32,
    complete: bool,
}

impl AnimationTask {
    /// Snapshot the host's current vector and set up an animation that moves
    /// `dimension` by `delta` over `duration` seconds.
    ///
    /// `delta` must be strictly positive and `duration` strictly positive.
    /// The host is not modified.
    pub fn create<H: TransformHost + ?Sized>(
        host: &H,
        property: Property,
        dimension: Dimension,
        delta: f32,
        duration: f32,
        easing: Easing,
    ) -> Result<Self> {
        // Negative deltas are rejected too; direction is not supported here.
        if delta <= 0.0 || !delta.is_finite() {
            return Err(MotionError::invalid(format!(
                "animation delta must be greater than zero (got {delta})"
            )));
        }
        if duration <= 0.0 || !duration.is_finite() {
            return Err(MotionError::invalid(format!(
                "animation duration must be greater than zero (got {duration})"
            )));
        }

        let start_vector = match property {
            Property::Position => host.local_position(),
            Property::Rotation => host.local_rotation(),
        };
        let target_value = dimension.component(start_vector) + delta;

        Ok(Self {
            property,
            dimension,
            start_vector,
            target_value,
            duration,
            easing,
            elapsed: 0.0,
            complete: false,
        })
    }

    /// Advance by `dt` seconds and return the updated vector.
    ///
    /// Fails if the task already completed or `dt` is negative; both are
    /// driver bugs and leave the task untouched.
    pub fn step(&mut self, dt: f32) -> Result<StepOutcome> {
        if self.complete {
            return Err(MotionError::CompletedTask);
        }
        if dt < 0.0 || dt.is_nan() {
            return Err(MotionError::NegativeDeltaTime(dt));
        }

        let value = if self.elapsed + dt >= self.duration {
            // Snap to the exact target instead of trusting accumulated floats
            self.elapsed = self.duration;
            self.complete = true;
            self.target_value
        } else {
            self.elapsed += dt;
            ease(
                self.start_value(),
                self.target_value,
                self.elapsed / self.duration,
                self.easing,
            )
        };

        Ok(StepOutcome {
            vector: self.dimension.with_component(self.start_vector, value),
            complete: self.complete,
        })
    }

    /// Write a stepped vector back to the animated property of `host`.
    ///
    /// Only the animated component is written. The other two are re-read
    /// from the host, so motion applied to them since `create` is kept.
    pub fn apply<H: TransformHost + ?Sized>(&self, host: &mut H, vector: Vec3) {
        let value = self.dimension.component(vector);
        match self.property {
            Property::Position => {
                let live = host.local_position();
                host.set_local_position(self.dimension.with_component(live, value));
            }
            Property::Rotation => {
                let live = host.local_rotation();
                host.set_local_rotation(self.dimension.with_component(live, value));
            }
        }
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The (property, dimension) pair this task occupies.
    pub fn key(&self) -> MotionKey {
        (self.property, self.dimension)
    }

    pub fn start_vector(&self) -> Vec3 {
        self.start_vector
    }

    pub fn start_value(&self) -> f32 {
        self.dimension.component(self.start_vector)
    }

    pub fn target_value(&self) -> f32 {
        self.target_value
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
