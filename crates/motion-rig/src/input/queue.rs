use serde::{Deserialize, Serialize};

use crate::api::types::ActionId;

/// Lifecycle stage of an input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriggerPhase {
    /// The control was pressed (start of a hold).
    Started,
    /// The action fired. Most bindings listen for this.
    #[default]
    Performed,
    /// The control was released or the action was interrupted.
    Cancelled,
}

/// A single input-action callback, flattened into a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub action: ActionId,
    pub phase: TriggerPhase,
    /// Scalar read from the control (axis value, button pressure, ...).
    pub value: f32,
}

impl TriggerEvent {
    pub fn started(action: ActionId, value: f32) -> Self {
        Self { action, phase: TriggerPhase::Started, value }
    }

    pub fn performed(action: ActionId, value: f32) -> Self {
        Self { action, phase: TriggerPhase::Performed, value }
    }

    pub fn cancelled(action: ActionId) -> Self {
        Self { action, phase: TriggerPhase::Cancelled, value: 0.0 }
    }
}

/// A queue of trigger events.
/// The host's input layer pushes events as they arrive; controllers drain
/// them once per frame.
pub struct TriggerQueue {
    events: Vec<TriggerEvent>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: TriggerEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<TriggerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &TriggerEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for TriggerQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = TriggerQueue::new();
        q.push(TriggerEvent::started(ActionId(1), 0.5));
        q.push(TriggerEvent::cancelled(ActionId(1)));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].phase, TriggerPhase::Cancelled);
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = TriggerQueue::default();
        q.push(TriggerEvent::performed(ActionId(3), 1.0));
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn default_phase_is_performed() {
        assert_eq!(TriggerPhase::default(), TriggerPhase::Performed);
    }
}
