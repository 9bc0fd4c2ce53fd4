//! Spoken-minute extraction for the time-capture step.
//!
//! A fixed word table maps common spoken phrases to minute values; table
//! declaration order is significant because matching is by substring
//! containment and the first containing entry wins ("twenty five" therefore
//! resolves through "five" — that is the inherited behavior, not a bug to
//! fix here). Transcripts with no table hit fall back to the first run of
//! decimal digits.

/// Lowest accepted minute value.
pub const MIN_MINUTES: u32 = 5;

/// Highest accepted minute value (a full working day).
pub const MAX_MINUTES: u32 = 480;

/// Spoken number phrases and their minute values, in declared order.
pub const NUMBER_WORDS: [(&str, u32); 18] = [
    ("five", 5),
    ("ten", 10),
    ("fifteen", 15),
    ("twenty", 20),
    ("twenty five", 25),
    ("thirty", 30),
    ("thirty five", 35),
    ("forty", 40),
    ("forty five", 45),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
    ("hundred", 100),
    ("one twenty", 120),
    ("two hours", 120),
    ("three hours", 180),
];

/// Extract a minute count from a spoken transcript.
///
/// The first `NUMBER_WORDS` phrase (in declared order) occurring as a
/// substring of the lower-cased transcript wins. If no phrase matches, the
/// first contiguous run of decimal digits in the raw transcript is parsed.
/// Returns `None` when neither yields a number; range checking is the
/// caller's concern.
pub fn extract_minutes(transcript: &str) -> Option<u32> {
    let lower = transcript.to_lowercase();
    for (phrase, minutes) in NUMBER_WORDS {
        if lower.contains(phrase) {
            return Some(minutes);
        }
    }

    let start = transcript.find(|c: char| c.is_ascii_digit())?;
    let digits: String = transcript[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Round a minute count to the nearest multiple of five, halves up.
pub fn round_to_step(minutes: u32) -> u32 {
    (minutes + 2) / 5 * 5
}

/// Whether a raw extracted minute count is acceptable.
///
/// The bound applies to the value as spoken, before rounding.
pub fn in_range(minutes: u32) -> bool {
    (MIN_MINUTES..=MAX_MINUTES).contains(&minutes)
}

// =============================================================================
// Tests
// =============================================================================
