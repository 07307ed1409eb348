//! Action bindings: listen for one input action at one stage.

use serde::{Deserialize, Serialize};

use crate::api::types::ActionId;
use crate::input::queue::{TriggerEvent, TriggerPhase};

/// Selects which events of an action a listener reacts to.
///
/// `Performed` fires once per press. `Started` and `Cancelled` together
/// describe a hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionBinding {
    pub action: ActionId,
    #[serde(default)]
    pub stage: TriggerPhase,
}

impl ActionBinding {
    /// Listen for `action` at the default `Performed` stage.
    pub fn new(action: ActionId) -> Self {
        Self {
            action,
            stage: TriggerPhase::Performed,
        }
    }

    pub fn with_stage(mut self, stage: TriggerPhase) -> Self {
        self.stage = stage;
        self
    }

    pub fn matches(&self, event: &TriggerEvent) -> bool {
        event.action == self.action && event.phase == self.stage
    }
}
