//! Tally Dialogue crate - the voice-guided entry dialogue.
//!
//! Provides the `DictationSession` that drives a four-step guided dialogue
//! (contribution type, reference, time spent, description) through a strict
//! state machine: Idle -> AwaitingType -> AwaitingReference -> AwaitingTime
//! -> AwaitingDescription -> Idle. Recognized utterances are interpreted per
//! step and written to the entry form through the `FieldSink` port; spoken
//! prompts guide the operator between steps. Thread-safe state management is
//! handled via `Arc<Mutex<>>`.

pub mod catalog;
pub mod minutes;
pub mod ports;
pub mod session;
pub mod state;

pub use catalog::{match_contribution_type, CONTRIBUTION_TYPES};
pub use minutes::{extract_minutes, round_to_step, MAX_MINUTES, MIN_MINUTES};
pub use ports::{FieldSink, MemoryFieldSink, MemoryNotifier, Notifier};
pub use session::{ActivationError, DictationSession};
pub use state::DialogueState;
