pub mod binding;
pub mod queue;

pub use binding::ActionBinding;
pub use queue::{TriggerEvent, TriggerPhase, TriggerQueue};
