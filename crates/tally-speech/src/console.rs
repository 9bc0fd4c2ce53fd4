//! Console-backed speech adapters for the terminal front end.
//!
//! The terminal stands in for the platform speech stack: typed lines are
//! "utterances" and spoken prompts are printed. The recognizer here only
//! tracks armed state; the line-reading loop lives in the application,
//! which delivers each line to the session exactly as a platform would
//! deliver a recognition result.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{SpeechError, SpeechRecognizer, SpeechSynthesizer};

/// Recognizer adapter for terminal input.
///
/// Always available; `start` and `stop` just toggle the armed flag that the
/// application's read loop consults before treating a line as an utterance.
#[derive(Debug, Default)]
pub struct ConsoleRecognizer {
    armed: AtomicBool,
}

impl ConsoleRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a recognition pass is currently armed.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}

impl SpeechRecognizer for ConsoleRecognizer {
    fn is_available(&self) -> bool {
        true
    }

    fn start(&self) -> Result<(), SpeechError> {
        self.armed.store(true, Ordering::SeqCst);
        tracing::debug!("Console recognizer armed");
        Ok(())
    }

    fn stop(&self) {
        self.armed.store(false, Ordering::SeqCst);
        tracing::debug!("Console recognizer stopped");
    }
}

/// Synthesizer adapter that prints prompts to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

impl ConsoleSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        // Ignore a broken pipe; prompts are fire-and-forget.
        let _ = writeln!(stdout, "(voice) {}", text);
        let _ = stdout.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_recognizer_toggles_armed() {
        let rec = ConsoleRecognizer::new();
        assert!(rec.is_available());
        assert!(!rec.is_armed());

        rec.start().unwrap();
        assert!(rec.is_armed());

        rec.stop();
        assert!(!rec.is_armed());
    }

    #[test]
    fn test_console_recognizer_stop_when_idle_is_safe() {
        let rec = ConsoleRecognizer::new();
        rec.stop();
        assert!(!rec.is_armed());
    }
}
