//! Tally Speech crate - recognizer and synthesizer adapter traits.
//!
//! Provides trait-based abstractions over the platform's speech capabilities,
//! the recognizer error-kind taxonomy, and mock implementations for testing
//! without real speech hardware. The recognizer contract is one-shot: each
//! `start` arms a single recognition pass that ends after one result, on
//! silence, or on error; the platform delivers those events to whoever owns
//! the adapter.

pub mod console;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use tally_core::error::TallyError;

// =============================================================================
// Errors
// =============================================================================

/// Error raised by a speech adapter itself (not by the recognition pipeline).
#[derive(Debug, Error)]
#[error("Speech adapter error: {0}")]
pub struct SpeechError(pub String);

impl From<SpeechError> for TallyError {
    fn from(err: SpeechError) -> Self {
        TallyError::Speech(err.0)
    }
}

/// Error tag delivered by the recognition pipeline during a pass.
///
/// Mirrors the platform's error vocabulary. Only `NoSpeech` and `Aborted`
/// are transient: a pass that ends with one of those is expected noise and
/// the end-of-pass restart path recovers from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerErrorKind {
    /// No speech was detected before the silence timeout.
    NoSpeech,
    /// The pass was aborted (typically by a stop while listening).
    Aborted,
    /// Audio capture failed (no microphone, device busy).
    AudioCapture,
    /// The operator denied the microphone permission.
    NotAllowed,
    /// The recognition service could not be reached.
    Network,
    /// The recognition service refused the request.
    ServiceNotAllowed,
    /// Any other platform-specific error tag.
    Other(String),
}

impl RecognizerErrorKind {
    /// Whether this error is recoverable by simply re-arming the recognizer.
    pub fn is_transient(&self) -> bool {
        matches!(self, RecognizerErrorKind::NoSpeech | RecognizerErrorKind::Aborted)
    }

    /// The platform's tag string for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            RecognizerErrorKind::NoSpeech => "no-speech",
            RecognizerErrorKind::Aborted => "aborted",
            RecognizerErrorKind::AudioCapture => "audio-capture",
            RecognizerErrorKind::NotAllowed => "not-allowed",
            RecognizerErrorKind::Network => "network",
            RecognizerErrorKind::ServiceNotAllowed => "service-not-allowed",
            RecognizerErrorKind::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for RecognizerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Traits
// =============================================================================

/// One-shot speech recognizer.
///
/// Implementations wrap a platform recognition capability configured for
/// non-continuous, non-interim recognition in a fixed locale. `start` arms
/// a single pass; the platform reports the result, end-of-pass, and errors
/// through its own callback surface.
pub trait SpeechRecognizer: Send + Sync {
    /// Whether the platform exposes a recognition capability at all.
    fn is_available(&self) -> bool;

    /// Arm one recognition pass.
    fn start(&self) -> Result<(), SpeechError>;

    /// Stop the current pass, if any. Safe to call when not armed.
    fn stop(&self);
}

/// Fire-and-forget speech synthesizer.
///
/// `speak` queues the prompt and returns immediately; completion is never
/// observed by callers.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str);
}

// =============================================================================
// Mocks
// =============================================================================

/// Mock recognizer for testing arming and restart contracts.
///
/// Records every `start`/`stop` call and can be configured to report the
/// capability as unavailable or to fail on `start`.
#[derive(Debug, Default)]
pub struct MockRecognizer {
    unavailable: bool,
    fail_start: bool,
    starts: AtomicUsize,
    stops: AtomicUsize,
    armed: AtomicBool,
}

impl MockRecognizer {
    /// Create a mock recognizer that reports the capability as present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock recognizer that reports no recognition capability.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Create a mock recognizer whose `start` always fails.
    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Number of times `start` was called.
    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    /// Number of times `stop` was called.
    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Whether the most recent call was a successful `start`.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn is_available(&self) -> bool {
        !self.unavailable
    }

    fn start(&self) -> Result<(), SpeechError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        if self.fail_start {
            return Err(SpeechError("mock start failure".to_string()));
        }
        self.armed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.armed.store(false, Ordering::SeqCst);
    }
}

/// Mock synthesizer that records every prompt in order.
#[derive(Debug, Default)]
pub struct MockSynthesizer {
    spoken: Mutex<Vec<String>>,
}

impl MockSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All prompts spoken so far, oldest first.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().expect("spoken mutex poisoned").clone()
    }

    /// The most recent prompt, if any.
    pub fn last_spoken(&self) -> Option<String> {
        self.spoken
            .lock()
            .expect("spoken mutex poisoned")
            .last()
            .cloned()
    }
}

impl SpeechSynthesizer for MockSynthesizer {
    fn speak(&self, text: &str) {
        self.spoken
            .lock()
            .expect("spoken mutex poisoned")
            .push(text.to_string());
    }
}

// =============================================================================
// Tests
// =============================================================================
