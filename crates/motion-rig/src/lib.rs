pub mod api;
pub mod core;
pub mod errors;
pub mod extensions;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::controller::{
    AnimationRequest, ControllerConfig, TickReport, TransformController,
    MAX_ANIMATION_DURATION, MIN_ANIMATION_DURATION,
};
pub use api::types::{ActionId, Dimension, MotionEvent, MotionKey, Property};
pub use crate::core::transform::{LocalTransform, TransformHost};
pub use errors::{MotionError, Result};
pub use input::binding::ActionBinding;
pub use input::queue::{TriggerEvent, TriggerPhase, TriggerQueue};

pub use extensions::{
    clamp_permits, ease, lerp, Accumulator, AccumulatorConfig, AnimationTask, Easing,
    StepOutcome, TriggerMode,
};
