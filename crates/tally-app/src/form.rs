//! The terminal stand-in for the entry-creation form.
//!
//! `EntryForm` is the `FieldSink` the dialogue session writes into: a draft
//! entry dated today that accumulates captured values and assembles a
//! validated `ContributionEntry` once the dialogue completes. The
//! `ConsoleNotifier` prints toast notices to stderr so they interleave
//! cleanly with prompts on stdout.

use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use tally_core::error::{Result, TallyError};
use tally_core::types::{ContributionEntry, FieldName, Notice, Severity};
use tally_dialogue::{FieldSink, Notifier};

#[derive(Debug, Default, Clone)]
struct Draft {
    contribution_type: String,
    reference: String,
    time_spent: String,
    description: String,
}

/// In-memory entry form accepting dialogue field writes.
#[derive(Debug)]
pub struct EntryForm {
    date: NaiveDate,
    draft: Mutex<Draft>,
}

impl EntryForm {
    /// Create an empty form dated `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            draft: Mutex::new(Draft::default()),
        }
    }

    /// Assemble the completed entry from the draft.
    ///
    /// Fails if required fields are missing or the captured time does not
    /// parse; an empty reference becomes `None`.
    pub fn to_entry(&self) -> Result<ContributionEntry> {
        let draft = self.draft.lock().expect("draft mutex poisoned").clone();

        let time_spent_minutes: u32 = draft
            .time_spent
            .parse()
            .map_err(|_| TallyError::Entry(format!("Invalid time value: {:?}", draft.time_spent)))?;

        let reference = if draft.reference.trim().is_empty() {
            None
        } else {
            Some(draft.reference)
        };

        let entry = ContributionEntry {
            id: Uuid::new_v4(),
            date: self.date,
            contribution_type: draft.contribution_type,
            reference,
            time_spent_minutes,
            description: draft.description,
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl FieldSink for EntryForm {
    fn set_field(&self, field: FieldName, value: &str) {
        let mut draft = self.draft.lock().expect("draft mutex poisoned");
        match field {
            FieldName::ContributionType => draft.contribution_type = value.to_string(),
            FieldName::Reference => draft.reference = value.to_string(),
            FieldName::TimeSpent => draft.time_spent = value.to_string(),
            FieldName::Description => draft.description = value.to_string(),
        }
        tracing::debug!(field = %field, value, "Form field updated");
    }
}

/// Notifier that prints toast notices to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let tag = match notice.severity {
            Severity::Info => "info",
            Severity::Error => "error",
        };
        eprintln!("[{}] {}: {}", tag, notice.title, notice.body);
    }
}
