//! The voice dictation session driving the guided-entry dialogue.
//!
//! One session instance exists per application; it owns the dialogue state
//! machine, utterance interpretation, and the prompt/retry policy. The
//! platform adapter delivers recognition callbacks (`on_utterance`,
//! `on_recognizer_ended`, `on_recognizer_error`) and the session drives the
//! entry form through its `FieldSink` and the operator through the
//! synthesizer and `Notifier`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use tally_core::error::TallyError;
use tally_core::types::{AppScreen, FieldName, Notice};
use tally_speech::{RecognizerErrorKind, SpeechRecognizer, SpeechSynthesizer};

use crate::catalog::match_contribution_type;
use crate::minutes::{extract_minutes, in_range, round_to_step};
use crate::ports::{FieldSink, Notifier};
use crate::state::{DialogueState, StateMachine};

/// Default delay before re-arming the recognizer after a pass ends.
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_millis(500);

const PROMPT_TYPE: &str = "What type of contribution?";
const PROMPT_REFERENCE: &str = "What is the reference? Say skip if none";
const PROMPT_TIME: &str = "How many minutes did you spend?";
const PROMPT_DESCRIPTION: &str = "Please describe your contribution";
const PROMPT_COMPLETE: &str = "Entry complete. Click save to submit";
const REPROMPT_TYPE: &str = "Type not recognized. Please try again";
const REPROMPT_TIME: &str = "Please say a number between 5 and 480 minutes";

/// Why a session could not be activated.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// The platform exposes no speech-recognition capability.
    #[error("voice recognition is not supported on this platform")]
    Unsupported,
    /// Voice entry was requested outside the entry-creation screen.
    #[error("voice entry requires the new-entry screen (current: {screen})")]
    WrongScreen { screen: AppScreen },
    /// A dialogue is already in progress.
    #[error("a dictation session is already active")]
    AlreadyActive,
    /// The recognizer refused to arm.
    #[error("could not start voice recognition: {0}")]
    Recognizer(String),
}

impl From<ActivationError> for TallyError {
    fn from(err: ActivationError) -> Self {
        TallyError::Dialogue(err.to_string())
    }
}

struct SessionInner {
    id: Uuid,
    state: StateMachine,
    listening: AtomicBool,
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sink: Arc<dyn FieldSink>,
    notifier: Arc<dyn Notifier>,
    restart_delay: Duration,
    activated_at: Mutex<Option<DateTime<Utc>>>,
}

/// The dialogue manager for one voice-guided entry pass.
///
/// Cloneable handle over shared state; all mutation happens through the
/// platform callback stream, never concurrently, so the interior locking
/// only guards against callbacks arriving on different threads.
#[derive(Clone)]
pub struct DictationSession {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for DictationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictationSession")
            .field("id", &self.inner.id)
            .field("state", &self.inner.state.current())
            .field("listening", &self.is_listening())
            .finish()
    }
}

impl DictationSession {
    /// Create a session wired to its four collaborators, with the default
    /// recognizer restart delay.
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        sink: Arc<dyn FieldSink>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_restart_delay(recognizer, synthesizer, sink, notifier, DEFAULT_RESTART_DELAY)
    }

    /// Create a session with an explicit recognizer restart delay
    /// (see `on_recognizer_ended`).
    pub fn with_restart_delay(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        sink: Arc<dyn FieldSink>,
        notifier: Arc<dyn Notifier>,
        restart_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id: Uuid::new_v4(),
                state: StateMachine::new(),
                listening: AtomicBool::new(false),
                recognizer,
                synthesizer,
                sink,
                notifier,
                restart_delay,
                activated_at: Mutex::new(None),
            }),
        }
    }

    /// The dialogue step currently awaited.
    pub fn state(&self) -> DialogueState {
        self.inner.state.current()
    }

    /// Whether the recognizer is currently armed for this session.
    pub fn is_listening(&self) -> bool {
        self.inner.listening.load(Ordering::SeqCst)
    }

    /// Start a dialogue pass.
    ///
    /// Fails without starting when the recognition capability is absent,
    /// when `screen` is not the entry-creation screen, when a dialogue is
    /// already active, or when the recognizer refuses to arm. On success the
    /// session enters `AwaitingType`, arms the recognizer, and speaks the
    /// opening prompt.
    pub fn activate(&self, screen: AppScreen) -> Result<(), ActivationError> {
        if !self.inner.recognizer.is_available() {
            self.inner.notifier.notify(Notice::error(
                "Not Supported",
                "Voice recognition is not supported on this platform",
            ));
            return Err(ActivationError::Unsupported);
        }

        if screen != AppScreen::NewEntry {
            self.inner.notifier.notify(Notice::error(
                "Navigation Required",
                "Please go to the New Entry page first",
            ));
            return Err(ActivationError::WrongScreen { screen });
        }

        if self
            .inner
            .state
            .transition(DialogueState::AwaitingType)
            .is_err()
        {
            return Err(ActivationError::AlreadyActive);
        }

        if let Err(e) = self.inner.recognizer.start() {
            self.inner.state.reset();
            self.inner.notifier.notify(Notice::error(
                "Error",
                "Could not start voice recognition",
            ));
            return Err(ActivationError::Recognizer(e.to_string()));
        }

        self.inner.listening.store(true, Ordering::SeqCst);
        *self
            .inner
            .activated_at
            .lock()
            .expect("activated_at mutex poisoned") = Some(Utc::now());

        tracing::info!(session_id = %self.inner.id, "Voice session activated");
        self.inner.notifier.notify(Notice::info(
            "Voice Activated",
            "Listening... What type of contribution?",
        ));
        self.inner.synthesizer.speak(PROMPT_TYPE);
        Ok(())
    }

    /// End the dialogue pass. Idempotent and always safe, including when
    /// already idle; stops the recognizer without waiting for in-flight
    /// recognition to flush.
    pub fn deactivate(&self) {
        self.inner.recognizer.stop();
        let was_listening = self.inner.listening.swap(false, Ordering::SeqCst);
        let state = self.inner.state.current();
        if was_listening || state != DialogueState::Idle {
            tracing::info!(session_id = %self.inner.id, from = %state, "Voice session deactivated");
        }
        self.inner.state.reset();
    }

    /// Interpret one finalized recognition result.
    ///
    /// Never fails: unrecognized or out-of-range input re-prompts and keeps
    /// the current step; utterances arriving while idle are dropped.
    pub fn on_utterance(&self, transcript: &str) {
        let transcript = transcript.trim();
        let state = self.inner.state.current();
        tracing::debug!(session_id = %self.inner.id, %state, transcript, "Utterance received");

        match state {
            DialogueState::Idle => {}
            DialogueState::AwaitingType => self.capture_type(transcript),
            DialogueState::AwaitingReference => self.capture_reference(transcript),
            DialogueState::AwaitingTime => self.capture_time(transcript),
            DialogueState::AwaitingDescription => self.capture_description(transcript),
        }
    }

    /// A recognition pass ended (result delivered, silence, or error).
    ///
    /// While the dialogue is still in progress and listening has not been
    /// explicitly stopped, the recognizer is re-armed after `restart_delay`;
    /// the delay keeps the tail of an utterance from being swallowed and
    /// avoids platform rate limits. The timer re-checks the session before
    /// re-arming, so no overlapping pass is ever started.
    ///
    /// Must be called within a Tokio runtime.
    pub fn on_recognizer_ended(&self) {
        if !self.is_listening() || self.inner.state.current() == DialogueState::Idle {
            return;
        }

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.restart_delay).await;
            if inner.listening.load(Ordering::SeqCst)
                && inner.state.current() != DialogueState::Idle
            {
                if let Err(e) = inner.recognizer.start() {
                    tracing::warn!(session_id = %inner.id, error = %e, "Recognizer restart failed");
                }
            }
        });
    }

    /// A recognition pass reported an error.
    ///
    /// Transient kinds (`no-speech`, `aborted`) are swallowed; the
    /// restart-on-end path recovers from them. Anything else surfaces one
    /// operator notice and tears the session down.
    pub fn on_recognizer_error(&self, kind: RecognizerErrorKind) {
        if kind.is_transient() {
            tracing::debug!(session_id = %self.inner.id, %kind, "Transient recognizer error ignored");
            return;
        }

        tracing::warn!(session_id = %self.inner.id, %kind, "Fatal recognizer error");
        self.inner
            .notifier
            .notify(Notice::error("Voice Error", &format!("Error: {kind}")));
        self.deactivate();
    }

    fn capture_type(&self, transcript: &str) {
        let Some(label) = match_contribution_type(transcript) else {
            self.inner.synthesizer.speak(REPROMPT_TYPE);
            return;
        };

        self.inner.sink.set_field(FieldName::ContributionType, label);
        self.inner.notifier.notify(Notice::info("Type Captured", label));
        self.transition(DialogueState::AwaitingReference);
        self.inner.synthesizer.speak(PROMPT_REFERENCE);
    }

    fn capture_reference(&self, transcript: &str) {
        // "skip" anywhere in the utterance bypasses capture; the reference
        // is the one optional step.
        if !transcript.to_lowercase().contains("skip") {
            self.inner.sink.set_field(FieldName::Reference, transcript);
            self.inner
                .notifier
                .notify(Notice::info("Reference Captured", transcript));
        }
        self.transition(DialogueState::AwaitingTime);
        self.inner.synthesizer.speak(PROMPT_TIME);
    }

    fn capture_time(&self, transcript: &str) {
        // Range applies to the value as spoken; rounding happens after.
        let minutes = extract_minutes(transcript).filter(|m| in_range(*m));
        let Some(minutes) = minutes else {
            self.inner.synthesizer.speak(REPROMPT_TIME);
            return;
        };

        let rounded = round_to_step(minutes);
        self.inner
            .sink
            .set_field(FieldName::TimeSpent, &rounded.to_string());
        self.inner
            .notifier
            .notify(Notice::info("Time Captured", &format!("{rounded} minutes")));
        self.transition(DialogueState::AwaitingDescription);
        self.inner.synthesizer.speak(PROMPT_DESCRIPTION);
    }

    fn capture_description(&self, transcript: &str) {
        self.inner.sink.set_field(FieldName::Description, transcript);
        self.inner.notifier.notify(Notice::info(
            "Description Captured",
            "Entry complete! Click save to submit.",
        ));

        self.transition(DialogueState::Idle);
        self.inner.listening.store(false, Ordering::SeqCst);
        self.inner.recognizer.stop();

        let elapsed_secs = self
            .inner
            .activated_at
            .lock()
            .expect("activated_at mutex poisoned")
            .take()
            .map(|t| (Utc::now() - t).num_milliseconds() as f64 / 1000.0);
        tracing::info!(session_id = %self.inner.id, ?elapsed_secs, "Voice entry complete");

        self.inner.synthesizer.speak(PROMPT_COMPLETE);
    }

    fn transition(&self, target: DialogueState) {
        // Step handlers only request transitions that are valid from the
        // state they were dispatched on.
        if let Err(e) = self.inner.state.transition(target) {
            tracing::error!(session_id = %self.inner.id, error = %e, "Dialogue transition refused");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
