use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TallyError};

// =============================================================================
// Enums
// =============================================================================

/// The application screen the operator is currently on.
///
/// Voice entry is only legal on the `NewEntry` screen; every other screen
/// rejects activation with a navigation notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppScreen {
    Landing,
    Dashboard,
    NewEntry,
    History,
}

impl std::fmt::Display for AppScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppScreen::Landing => write!(f, "landing"),
            AppScreen::Dashboard => write!(f, "dashboard"),
            AppScreen::NewEntry => write!(f, "new-entry"),
            AppScreen::History => write!(f, "history"),
        }
    }
}

/// A named field on the entry-creation form.
///
/// The dialogue session writes captured values through a `FieldSink` keyed
/// by this enum; `as_str` returns the form's own field keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldName {
    ContributionType,
    Reference,
    TimeSpent,
    Description,
}

impl FieldName {
    /// The field key used by the entry form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::ContributionType => "contributionType",
            FieldName::Reference => "reference",
            FieldName::TimeSpent => "timeSpent",
            FieldName::Description => "description",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an operator-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Error,
}

// =============================================================================
// Structs
// =============================================================================

/// A toast-style notice surfaced to the operator.
///
/// Fire-and-forget: producers emit notices through a `Notifier` and never
/// learn whether (or how) they were displayed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            severity: Severity::Info,
        }
    }

    pub fn error(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            severity: Severity::Error,
        }
    }
}

/// One logged unit of academic work.
///
/// This is the payload the entry form assembles and the surrounding
/// application would submit; serialized field names match the form keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub contribution_type: String,
    pub reference: Option<String>,
    #[serde(rename = "timeSpent")]
    pub time_spent_minutes: u32,
    pub description: String,
}

impl ContributionEntry {
    /// Validate the entry against the form rules.
    ///
    /// Type and description must be non-empty, time must lie in 5..=480
    /// and be a multiple of five.
    pub fn validate(&self) -> Result<()> {
        if self.contribution_type.trim().is_empty() {
            return Err(TallyError::Entry("Contribution type is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(TallyError::Entry("Description is required".to_string()));
        }
        if self.time_spent_minutes < 5 || self.time_spent_minutes > 480 {
            return Err(TallyError::Entry(
                "Time must be between 5-480 minutes".to_string(),
            ));
        }
        if self.time_spent_minutes % 5 != 0 {
            return Err(TallyError::Entry(
                "Time must be a multiple of 5".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ContributionEntry {
        ContributionEntry {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            contribution_type: "Student Mentoring".to_string(),
            reference: Some("Final year project group".to_string()),
            time_spent_minutes: 30,
            description: "Helped debug their capstone system".to_string(),
        }
    }

    #[test]
    fn test_screen_display() {
        assert_eq!(AppScreen::NewEntry.to_string(), "new-entry");
        assert_eq!(AppScreen::Dashboard.to_string(), "dashboard");
    }

    #[test]
    fn test_field_name_keys() {
        assert_eq!(FieldName::ContributionType.as_str(), "contributionType");
        assert_eq!(FieldName::Reference.as_str(), "reference");
        assert_eq!(FieldName::TimeSpent.as_str(), "timeSpent");
        assert_eq!(FieldName::Description.as_str(), "description");
    }

    #[test]
    fn test_notice_constructors() {
        let info = Notice::info("Time Captured", "30 minutes");
        assert_eq!(info.severity, Severity::Info);
        assert_eq!(info.title, "Time Captured");

        let err = Notice::error("Voice Error", "Error: network");
        assert_eq!(err.severity, Severity::Error);
    }

    #[test]
    fn test_entry_validates() {
        assert!(sample_entry().validate().is_ok());
    }

    #[test]
    fn test_entry_requires_type_and_description() {
        let mut entry = sample_entry();
        entry.contribution_type = "  ".to_string();
        assert!(entry.validate().is_err());

        let mut entry = sample_entry();
        entry.description = String::new();
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_entry_time_bounds() {
        let mut entry = sample_entry();
        entry.time_spent_minutes = 4;
        assert!(entry.validate().is_err());

        entry.time_spent_minutes = 5;
        assert!(entry.validate().is_ok());

        entry.time_spent_minutes = 480;
        assert!(entry.validate().is_ok());

        entry.time_spent_minutes = 485;
        assert!(entry.validate().is_err());
    }

    #[test]
    fn test_entry_time_multiple_of_five() {
        let mut entry = sample_entry();
        entry.time_spent_minutes = 37;
        let err = entry.validate().unwrap_err();
        assert!(err.to_string().contains("multiple of 5"));
    }

    #[test]
    fn test_entry_serializes_with_form_keys() {
        let entry = sample_entry();
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("contributionType").is_some());
        assert_eq!(json["timeSpent"], 30);
        assert_eq!(json["description"], "Helped debug their capstone system");
    }

    #[test]
    fn test_entry_roundtrip_reference_none() {
        let mut entry = sample_entry();
        entry.reference = None;
        let json = serde_json::to_string(&entry).unwrap();
        let back: ContributionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_screen_serde_kebab_case() {
        let screen: AppScreen = serde_json::from_str("\"new-entry\"").unwrap();
        assert_eq!(screen, AppScreen::NewEntry);
    }
}
