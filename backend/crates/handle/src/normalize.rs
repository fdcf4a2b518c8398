//! Case folding applied before uniqueness comparison.

/// Lowercase `candidate` for case-insensitive comparison.
///
/// The uniqueness index stores keys in this form while the submitted casing
/// is preserved for display. Idempotent: folding a folded handle is a no-op.
///
/// # Examples
/// ```
/// assert_eq!(handle::normalize("JohnDoe"), "johndoe");
/// ```
#[must_use]
pub fn normalize(candidate: &str) -> String {
    candidate.to_lowercase()
}
