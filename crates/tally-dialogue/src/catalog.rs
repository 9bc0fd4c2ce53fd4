//! The fixed catalog of contribution types and spoken-input matching.
//!
//! The catalog backs both the selectable type input on the entry form and
//! the type-capture step of the voice dialogue. Order is significant:
//! matching is first-match-wins over the declared order, so a transcript
//! touching several labels resolves to the earliest one. That tie-break is
//! part of the observable behavior and must not be "improved" to best-match.

/// Canonical contribution type labels, in declared order.
pub const CONTRIBUTION_TYPES: [&str; 16] = [
    "Student Mentoring",
    "Project Guidance",
    "Internship Support",
    "Research Paper Review",
    "Competition Preparation",
    "Workshop/Seminar",
    "Academic Event Organization",
    "Career Guidance",
    "Course Material Development",
    "Industry Collaboration",
    "Committee Work",
    "Curriculum Development",
    "Lab Setup & Maintenance",
    "Student Counseling",
    "Placement Activities",
    "Other",
];

/// Match a spoken transcript against the contribution type catalog.
///
/// The transcript is lower-cased; each label is split on whitespace and `/`
/// into lower-cased keyword tokens; a label matches if any of its tokens
/// occurs as a substring of the transcript. The first matching label in
/// declared order wins. Returns `None` if no label matches.
pub fn match_contribution_type(transcript: &str) -> Option<&'static str> {
    let lower = transcript.to_lowercase();
    CONTRIBUTION_TYPES.iter().copied().find(|label| {
        label
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '/')
            .filter(|token| !token.is_empty())
            .any(|token| lower.contains(token))
    })
}

// =============================================================================
// Tests
// =============================================================================
