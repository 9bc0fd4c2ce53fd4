//! Outbound ports of the dialogue session.
//!
//! The session writes captured values through `FieldSink` and surfaces
//! operator feedback through `Notifier`. Both are explicit dependencies
//! injected at construction so the session can be exercised against
//! in-memory doubles. Memory implementations live here for tests and for
//! embedders that want to observe the dialogue without a real form.

use std::sync::Mutex;

use tally_core::types::{FieldName, Notice};

/// Write-only view of the entry-creation form.
///
/// Writes are side effects with no feedback; the form is treated as
/// always available.
pub trait FieldSink: Send + Sync {
    fn set_field(&self, field: FieldName, value: &str);
}

/// Fire-and-forget operator notification channel (toasts).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// In-memory `FieldSink` recording every write in order.
#[derive(Debug, Default)]
pub struct MemoryFieldSink {
    writes: Mutex<Vec<(FieldName, String)>>,
}

impl MemoryFieldSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, oldest first.
    pub fn writes(&self) -> Vec<(FieldName, String)> {
        self.writes.lock().expect("writes mutex poisoned").clone()
    }

    /// The most recent value written to `field`, if any.
    pub fn value_of(&self, field: FieldName) -> Option<String> {
        self.writes
            .lock()
            .expect("writes mutex poisoned")
            .iter()
            .rev()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.clone())
    }
}

impl FieldSink for MemoryFieldSink {
    fn set_field(&self, field: FieldName, value: &str) {
        self.writes
            .lock()
            .expect("writes mutex poisoned")
            .push((field, value.to_string()));
    }
}

/// In-memory `Notifier` recording every notice in order.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notices mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("notices mutex poisoned")
            .push(notice);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::types::Severity;

    #[test]
    fn test_memory_sink_records_writes_in_order() {
        let sink = MemoryFieldSink::new();
        sink.set_field(FieldName::ContributionType, "Student Mentoring");
        sink.set_field(FieldName::TimeSpent, "30");

        let writes = sink.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[0],
            (FieldName::ContributionType, "Student Mentoring".to_string())
        );
        assert_eq!(writes[1], (FieldName::TimeSpent, "30".to_string()));
    }

    #[test]
    fn test_memory_sink_value_of_returns_latest() {
        let sink = MemoryFieldSink::new();
        assert_eq!(sink.value_of(FieldName::Reference), None);

        sink.set_field(FieldName::Reference, "first");
        sink.set_field(FieldName::Reference, "second");
        assert_eq!(sink.value_of(FieldName::Reference), Some("second".to_string()));
    }

    #[test]
    fn test_memory_notifier_records_notices() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notice::info("Type Captured", "Student Mentoring"));
        notifier.notify(Notice::error("Voice Error", "Error: network"));

        let notices = notifier.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].severity, Severity::Info);
        assert_eq!(notices[1].title, "Voice Error");
    }
}
