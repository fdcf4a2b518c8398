//! Handle availability and reservation use-cases.
//!
//! The pure rules live in the `handle` crate; this service owns what those
//! rules cannot know: whether a handle is taken, and which suggested
//! alternatives a caller could actually claim.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{InsertError, ProfileRepository};
use crate::domain::{Error, Handle, Profile};

/// Alternatives offered by default when a handle is taken.
pub const DEFAULT_ALTERNATIVES: usize = 3;
/// Upper bound on the alternatives a caller may request.
pub const MAX_ALTERNATIVES: usize = 10;

/// Extra raw suggestions requested so availability filtering can still fill
/// the asked-for count.
const OVERSAMPLE: usize = 5;

/// Outcome of a handle availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleCheck {
    candidate: String,
    validation: handle::ValidationResult,
    available: Option<bool>,
    alternatives: Vec<String>,
}

impl HandleCheck {
    /// The candidate as submitted.
    #[must_use]
    pub fn candidate(&self) -> &str {
        self.candidate.as_str()
    }

    /// Rule verdict for the candidate.
    #[must_use]
    pub const fn validation(&self) -> &handle::ValidationResult {
        &self.validation
    }

    /// Whether the handle is free to claim; absent when the candidate never
    /// reached the index because it failed validation.
    #[must_use]
    pub const fn available(&self) -> Option<bool> {
        self.available
    }

    /// Claimable alternatives, populated only for taken handles.
    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        self.alternatives.as_slice()
    }
}

/// Use-cases for checking, suggesting, and reserving handles.
#[derive(Clone)]
pub struct HandleService {
    profiles: Arc<dyn ProfileRepository>,
}

impl HandleService {
    /// Build the service over a profile repository.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Validate `candidate` and, when it passes, report availability.
    ///
    /// Taken handles come back with up to [`DEFAULT_ALTERNATIVES`] claimable
    /// alternatives so the caller can offer a way forward.
    ///
    /// # Errors
    /// Only repository failures surface as errors; a rejected or taken
    /// candidate is a normal result.
    pub async fn check(&self, candidate: &str) -> Result<HandleCheck, Error> {
        let validation = handle::validate(candidate);
        if !validation.is_valid() {
            return Ok(HandleCheck {
                candidate: candidate.to_owned(),
                validation,
                available: None,
                alternatives: Vec::new(),
            });
        }

        let taken = self
            .profiles
            .find_by_handle(&handle::normalize(candidate))
            .await?
            .is_some();
        let alternatives = if taken {
            self.available_alternatives(candidate, DEFAULT_ALTERNATIVES)
                .await?
        } else {
            Vec::new()
        };

        Ok(HandleCheck {
            candidate: candidate.to_owned(),
            validation,
            available: Some(!taken),
            alternatives,
        })
    }

    /// Suggest up to `count` claimable handles derived from `base`.
    ///
    /// `count` is clamped to [`MAX_ALTERNATIVES`]. Fewer (or zero) entries
    /// come back when the base is too long or the neighbourhood is crowded.
    ///
    /// # Errors
    /// Fails only when the repository does.
    pub async fn suggest(&self, base: &str, count: usize) -> Result<Vec<String>, Error> {
        self.available_alternatives(base, count.min(MAX_ALTERNATIVES))
            .await
    }

    /// Validate `candidate` and reserve it as a new profile's handle.
    ///
    /// # Errors
    /// - `invalid_request` with a remediation suggestion in the details when
    ///   the candidate breaks a handle rule;
    /// - `conflict` with claimable alternatives in the details when the
    ///   handle is already taken;
    /// - whatever the repository reports otherwise.
    pub async fn register(&self, candidate: &str) -> Result<Profile, Error> {
        let Ok(handle) = Handle::new(candidate) else {
            return Err(invalid_handle_error(candidate));
        };

        match self.profiles.insert(Profile::register(handle)).await {
            Ok(profile) => Ok(profile),
            Err(InsertError::HandleTaken) => {
                let alternatives = self
                    .available_alternatives(candidate, DEFAULT_ALTERNATIVES)
                    .await?;
                Err(Error::conflict("handle is already taken").with_details(json!({
                    "field": "handle",
                    "code": "handle_taken",
                    "alternatives": alternatives,
                })))
            }
            Err(InsertError::Repository(error)) => Err(error),
        }
    }

    async fn available_alternatives(
        &self,
        base: &str,
        count: usize,
    ) -> Result<Vec<String>, Error> {
        let mut available = Vec::new();
        for candidate in handle::suggestions(base, count.saturating_add(OVERSAMPLE)) {
            if available.len() == count {
                break;
            }
            // Heuristic suggestions are not guaranteed to pass the rules.
            if handle::check(&candidate).is_err() {
                continue;
            }
            if self
                .profiles
                .find_by_handle(&handle::normalize(&candidate))
                .await?
                .is_none()
            {
                available.push(candidate);
            }
        }
        Ok(available)
    }
}

fn invalid_handle_error(candidate: &str) -> Error {
    let validation = handle::validate(candidate);
    let message = validation.error().unwrap_or("handle is invalid").to_owned();
    let details = validation.suggestion().map_or_else(
        || json!({ "field": "handle", "code": "invalid_handle" }),
        |suggestion| {
            json!({
                "field": "handle",
                "code": "invalid_handle",
                "suggestion": suggestion,
            })
        },
    );
    Error::invalid_request(message).with_details(details)
}
