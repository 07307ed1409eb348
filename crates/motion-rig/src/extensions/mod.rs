// extensions/mod.rs
//
// Motion engines. Each one only talks to the object through `TransformHost`,
// so they can be driven without a controller.

pub mod accumulator;
pub mod easing;
pub mod tween;

pub use accumulator::{clamp_permits, Accumulator, AccumulatorConfig, TriggerMode};
pub use easing::{ease, lerp, Easing};
pub use tween::{AnimationTask, StepOutcome};
