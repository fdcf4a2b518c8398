//! Ordered validation rules for candidate handles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::normalize;
use crate::reserved::is_reserved;

/// Minimum allowed handle length in characters.
pub const HANDLE_MIN: usize = 3;
/// Maximum allowed handle length in characters.
pub const HANDLE_MAX: usize = 20;

/// A single rule failure.
///
/// Rules are checked in a fixed order and the first failure wins, so a
/// candidate that is both too short and full of punctuation reports only the
/// length problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// Candidate has fewer than [`HANDLE_MIN`] characters.
    #[error("handle must be at least {min} characters")]
    TooShort {
        /// The enforced minimum, [`HANDLE_MIN`].
        min: usize,
    },
    /// Candidate has more than [`HANDLE_MAX`] characters.
    #[error("handle must be at most {max} characters")]
    TooLong {
        /// The enforced maximum, [`HANDLE_MAX`].
        max: usize,
    },
    /// Candidate contains a character outside `[A-Za-z0-9_-]`.
    #[error("handle may only contain letters, numbers, underscores, or hyphens")]
    InvalidCharacters,
    /// Candidate case-folds to a reserved platform word.
    #[error("this handle is reserved")]
    Reserved,
}

/// Outcome of validating a candidate handle.
///
/// ## Invariants
/// - a valid result carries neither an error nor a suggestion
/// - an invalid result always carries an error message, plus a single-shot
///   remediation suggestion where one exists
///
/// Suggestions are heuristic: they are not re-validated and may themselves
/// collide or break a rule. Callers surface them as hints, not guarantees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

impl ValidationResult {
    const fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
            suggestion: None,
        }
    }

    fn invalid(violation: &Violation, suggestion: String) -> Self {
        Self {
            is_valid: false,
            error: Some(violation.to_string()),
            suggestion: Some(suggestion),
        }
    }

    /// Whether the candidate passed every rule.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Human-readable reason for rejection, absent on success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Remediated candidate, absent on success.
    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}

/// Evaluate `candidate` against the handle rules.
///
/// # Errors
/// Returns the first [`Violation`] the candidate trips, in rule order:
/// length lower bound, length upper bound, character set, reserved word.
pub fn check(candidate: &str) -> Result<(), Violation> {
    let length = candidate.chars().count();
    if length < HANDLE_MIN {
        return Err(Violation::TooShort { min: HANDLE_MIN });
    }
    if length > HANDLE_MAX {
        return Err(Violation::TooLong { max: HANDLE_MAX });
    }
    if !candidate.chars().all(is_allowed_char) {
        return Err(Violation::InvalidCharacters);
    }
    if is_reserved(&normalize(candidate)) {
        return Err(Violation::Reserved);
    }
    Ok(())
}

/// Validate `candidate` and attach a remediation hint on failure.
#[must_use]
pub fn validate(candidate: &str) -> ValidationResult {
    match check(candidate) {
        Ok(()) => ValidationResult::valid(),
        Err(violation) => {
            let suggestion = remediate(candidate, &violation);
            ValidationResult::invalid(&violation, suggestion)
        }
    }
}

pub(crate) fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn remediate(candidate: &str, violation: &Violation) -> String {
    match violation {
        Violation::TooShort { .. } => format!("{candidate}123"),
        Violation::TooLong { .. } => candidate.chars().take(HANDLE_MAX).collect(),
        Violation::InvalidCharacters => candidate.chars().filter(|ch| is_allowed_char(*ch)).collect(),
        Violation::Reserved => format!("{candidate}_user"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc")]
    #[case("wizard-master")]
    #[case("Under_Score")]
    #[case("a2345678901234567890")]
    fn accepts_well_formed_handles(#[case] candidate: &str) {
        let result = validate(candidate);
        assert!(result.is_valid());
        assert!(result.error().is_none());
        assert!(result.suggestion().is_none());
    }

    #[test]
    fn rejects_short_candidate_with_numeric_suffix_hint() {
        let result = validate("ab");
        assert!(!result.is_valid());
        let error = result.error().expect("error message");
        assert!(error.contains("at least 3 characters"), "got: {error}");
        assert_eq!(result.suggestion(), Some("ab123"));
    }

    #[test]
    fn rejects_long_candidate_with_truncation_hint() {
        let candidate = "x".repeat(HANDLE_MAX + 5);
        let result = validate(&candidate);
        assert!(!result.is_valid());
        assert!(result.error().expect("error").contains("at most 20 characters"));
        assert_eq!(result.suggestion(), Some("x".repeat(HANDLE_MAX).as_str()));
    }

    #[rstest]
    #[case("spell caster", "spellcaster")]
    #[case("mage!*", "mage")]
    #[case("fire@ball.io", "fireballio")]
    fn rejects_bad_characters_and_strips_them(#[case] candidate: &str, #[case] stripped: &str) {
        let result = validate(candidate);
        assert!(!result.is_valid());
        let error = result.error().expect("error message");
        assert!(error.contains("letters"), "got: {error}");
        assert_eq!(result.suggestion(), Some(stripped));
    }

    #[rstest]
    #[case("admin")]
    #[case("ADMIN")]
    #[case("Wizard")]
    fn rejects_reserved_words_case_insensitively(#[case] candidate: &str) {
        let result = validate(candidate);
        assert!(!result.is_valid());
        assert!(result.error().expect("error").contains("reserved"));
        assert_eq!(result.suggestion(), Some(format!("{candidate}_user").as_str()));
    }

    #[test]
    fn length_failure_masks_character_failure() {
        let result = validate("a!");
        assert!(result.error().expect("error").contains("at least 3 characters"));
        assert_eq!(result.suggestion(), Some("a!123"));
    }

    #[test]
    fn stripping_may_leave_an_empty_hint() {
        let result = validate("!!!");
        assert!(!result.is_valid());
        assert_eq!(result.suggestion(), Some(""));
    }

    #[test]
    fn serialises_camel_case_and_omits_absent_fields() {
        let valid = serde_json::to_value(validate("abc")).expect("serialise");
        assert_eq!(valid, serde_json::json!({ "isValid": true }));

        let invalid = serde_json::to_value(validate("ab")).expect("serialise");
        assert_eq!(
            invalid,
            serde_json::json!({
                "isValid": false,
                "error": "handle must be at least 3 characters",
                "suggestion": "ab123",
            })
        );
    }
}
