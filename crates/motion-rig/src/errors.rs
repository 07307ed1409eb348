//! Error types.
//!
//! Two families live in [`MotionError`]:
//! - configuration errors, which are reported and leave the requested
//!   animation or accumulator un-started;
//! - state errors, which mean the driver broke the stepping contract
//!   (a finished task was stepped, or time ran backwards).
//!
//! A clamp blocking accumulation or a request ignored because its dimension
//! is busy is not an error; those surface as `false` or `None`.

use thiserror::Error;

/// Errors raised by the animation and accumulation engines.
#[derive(Error, Debug)]
pub enum MotionError {
    /// A request or config was rejected before anything started.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `step` was called on a task that already reported completion.
    #[error("Animation task is already complete")]
    CompletedTask,

    /// A negative elapsed time was supplied to a step or tick.
    #[error("Delta time cannot be negative (got {0})")]
    NegativeDeltaTime(f32),

    /// A JSON config could not be parsed.
    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_json::Error),
}

impl MotionError {
    /// Whether this error is a driver bug rather than a rejected config.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::CompletedTask | Self::NegativeDeltaTime(_))
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Alias for `std::result::Result<T, MotionError>`.
pub type Result<T> = std::result::Result<T, MotionError>;
