//! Dialogue state machine with thread-safe transitions.
//!
//! Enforces valid state transitions for the guided-entry dialogue:
//! - Idle -> AwaitingType (activate voice entry)
//! - AwaitingType -> AwaitingReference (type captured)
//! - AwaitingReference -> AwaitingTime (reference captured or skipped)
//! - AwaitingTime -> AwaitingDescription (time captured)
//! - AwaitingDescription -> Idle (description captured, dialogue complete)
//! - any non-Idle -> Idle (deactivate / fatal recognizer error)

use std::fmt;
use std::sync::{Arc, Mutex};

use tally_core::error::TallyError;

/// The dialogue step the session is currently waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueState {
    /// No dialogue in progress. Ready to start.
    Idle,
    /// Waiting for the operator to name a contribution type.
    AwaitingType,
    /// Waiting for a reference (or "skip").
    AwaitingReference,
    /// Waiting for the number of minutes spent.
    AwaitingTime,
    /// Waiting for a free-form description.
    AwaitingDescription,
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogueState::Idle => write!(f, "Idle"),
            DialogueState::AwaitingType => write!(f, "AwaitingType"),
            DialogueState::AwaitingReference => write!(f, "AwaitingReference"),
            DialogueState::AwaitingTime => write!(f, "AwaitingTime"),
            DialogueState::AwaitingDescription => write!(f, "AwaitingDescription"),
        }
    }
}

impl DialogueState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &DialogueState) -> bool {
        match (self, target) {
            // Forward path
            (DialogueState::Idle, DialogueState::AwaitingType)
            | (DialogueState::AwaitingType, DialogueState::AwaitingReference)
            | (DialogueState::AwaitingReference, DialogueState::AwaitingTime)
            | (DialogueState::AwaitingTime, DialogueState::AwaitingDescription)
            | (DialogueState::AwaitingDescription, DialogueState::Idle) => true,
            // Cancel transitions
            (from, DialogueState::Idle) => *from != DialogueState::Idle,
            _ => false,
        }
    }
}

/// Thread-safe state machine for dialogue state transitions.
///
/// Wraps `DialogueState` in an `Arc<Mutex<>>` to allow safe concurrent access.
/// All transitions are validated before being applied, returning an error
/// if the requested transition is not permitted.
#[derive(Debug, Clone)]
pub struct StateMachine {
    state: Arc<Mutex<DialogueState>>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DialogueState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> DialogueState {
        *self.state.lock().expect("state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    ///
    /// Returns `Ok(())` if the transition is valid, or a `TallyError::Dialogue`
    /// if the transition is not allowed from the current state.
    pub fn transition(&self, target: DialogueState) -> Result<(), TallyError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Dialogue state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(TallyError::Dialogue(format!(
                "Invalid state transition: {} -> {}",
                *state, target
            )))
        }
    }

    /// Force the state machine back to Idle (deactivation and error recovery).
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        if *state != DialogueState::Idle {
            tracing::debug!("Dialogue state machine reset to Idle from {}", *state);
            *state = DialogueState::Idle;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(DialogueState::Idle.to_string(), "Idle");
        assert_eq!(DialogueState::AwaitingType.to_string(), "AwaitingType");
        assert_eq!(
            DialogueState::AwaitingReference.to_string(),
            "AwaitingReference"
        );
        assert_eq!(DialogueState::AwaitingTime.to_string(), "AwaitingTime");
        assert_eq!(
            DialogueState::AwaitingDescription.to_string(),
            "AwaitingDescription"
        );
    }

    #[test]
    fn test_valid_transitions() {
        // Forward path
        assert!(DialogueState::Idle.can_transition_to(&DialogueState::AwaitingType));
        assert!(DialogueState::AwaitingType.can_transition_to(&DialogueState::AwaitingReference));
        assert!(DialogueState::AwaitingReference.can_transition_to(&DialogueState::AwaitingTime));
        assert!(DialogueState::AwaitingTime.can_transition_to(&DialogueState::AwaitingDescription));
        assert!(DialogueState::AwaitingDescription.can_transition_to(&DialogueState::Idle));

        // Cancel transitions
        assert!(DialogueState::AwaitingType.can_transition_to(&DialogueState::Idle));
        assert!(DialogueState::AwaitingReference.can_transition_to(&DialogueState::Idle));
        assert!(DialogueState::AwaitingTime.can_transition_to(&DialogueState::Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        // Cannot skip steps
        assert!(!DialogueState::Idle.can_transition_to(&DialogueState::AwaitingReference));
        assert!(!DialogueState::Idle.can_transition_to(&DialogueState::AwaitingTime));
        assert!(!DialogueState::AwaitingType.can_transition_to(&DialogueState::AwaitingTime));
        assert!(
            !DialogueState::AwaitingType.can_transition_to(&DialogueState::AwaitingDescription)
        );

        // Cannot go backwards
        assert!(!DialogueState::AwaitingTime.can_transition_to(&DialogueState::AwaitingReference));
        assert!(
            !DialogueState::AwaitingDescription.can_transition_to(&DialogueState::AwaitingTime)
        );

        // Cannot transition to self
        assert!(!DialogueState::Idle.can_transition_to(&DialogueState::Idle));
        assert!(!DialogueState::AwaitingType.can_transition_to(&DialogueState::AwaitingType));
        assert!(!DialogueState::AwaitingTime.can_transition_to(&DialogueState::AwaitingTime));
    }

    #[test]
    fn test_state_machine_happy_path() {
        let sm = StateMachine::new();
        assert_eq!(sm.current(), DialogueState::Idle);

        sm.transition(DialogueState::AwaitingType).unwrap();
        sm.transition(DialogueState::AwaitingReference).unwrap();
        sm.transition(DialogueState::AwaitingTime).unwrap();
        sm.transition(DialogueState::AwaitingDescription).unwrap();
        sm.transition(DialogueState::Idle).unwrap();
        assert_eq!(sm.current(), DialogueState::Idle);
    }

    #[test]
    fn test_state_machine_cancel_mid_dialogue() {
        let sm = StateMachine::new();
        sm.transition(DialogueState::AwaitingType).unwrap();
        sm.transition(DialogueState::AwaitingReference).unwrap();
        sm.transition(DialogueState::Idle).unwrap();
        assert_eq!(sm.current(), DialogueState::Idle);
    }

    #[test]
    fn test_state_machine_invalid_transition() {
        let sm = StateMachine::new();
        let result = sm.transition(DialogueState::AwaitingTime);
        assert!(result.is_err());
        assert_eq!(sm.current(), DialogueState::Idle);
    }

    #[test]
    fn test_state_machine_reset() {
        let sm = StateMachine::new();
        sm.transition(DialogueState::AwaitingType).unwrap();
        sm.transition(DialogueState::AwaitingReference).unwrap();
        sm.reset();
        assert_eq!(sm.current(), DialogueState::Idle);
    }

    #[test]
    fn test_state_machine_reset_when_idle_is_noop() {
        let sm = StateMachine::new();
        sm.reset();
        assert_eq!(sm.current(), DialogueState::Idle);
    }

    #[test]
    fn test_state_machine_clone_is_shared() {
        let sm1 = StateMachine::new();
        let sm2 = sm1.clone();

        sm1.transition(DialogueState::AwaitingType).unwrap();
        assert_eq!(sm2.current(), DialogueState::AwaitingType);
    }

    #[test]
    fn test_state_machine_transition_error_message() {
        let sm = StateMachine::new();
        let result = sm.transition(DialogueState::AwaitingDescription);
        match result {
            Err(TallyError::Dialogue(msg)) => {
                assert!(msg.contains("Idle"));
                assert!(msg.contains("AwaitingDescription"));
            }
            _ => panic!("Expected Dialogue error variant"),
        }
    }
}
