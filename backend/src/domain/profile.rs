//! Profile identity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by [`Profile::try_from_parts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// The profile id was empty.
    EmptyId,
    /// The profile id was not a canonical UUID.
    InvalidId,
    /// The handle broke one of the handle rules.
    InvalidHandle(handle::Violation),
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "profile id must not be empty"),
            Self::InvalidId => write!(f, "profile id must be a valid UUID"),
            Self::InvalidHandle(violation) => write!(f, "{violation}"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

impl From<handle::Violation> for ProfileValidationError {
    fn from(value: handle::Violation) -> Self {
        Self::InvalidHandle(value)
    }
}

/// Stable profile identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Validate and construct a [`ProfileId`] from borrowed input.
    ///
    /// # Errors
    /// Rejects empty strings and anything `Uuid` cannot parse.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        let id = id.as_ref();
        if id.is_empty() {
            return Err(ProfileValidationError::EmptyId);
        }
        let parsed = Uuid::parse_str(id).map_err(|_| ProfileValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Generate a new random [`ProfileId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ProfileId {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A handle that satisfied the handle rules at construction.
///
/// The submitted casing is preserved for display; [`Handle::normalized`]
/// yields the lowercase key every uniqueness comparison must use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validate and construct a [`Handle`] from owned input.
    ///
    /// # Errors
    /// Returns the first [`handle::Violation`] the candidate trips.
    pub fn new(candidate: impl Into<String>) -> Result<Self, handle::Violation> {
        let candidate = candidate.into();
        handle::check(&candidate)?;
        Ok(Self(candidate))
    }

    /// Lowercase key used by the uniqueness index.
    #[must_use]
    pub fn normalized(&self) -> String {
        handle::normalize(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

impl TryFrom<String> for Handle {
    type Error = handle::Violation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A registered wizard profile.
///
/// ## Invariants
/// - `handle` passed the handle rules when the profile was created.
/// - `id` is unique across the platform; `handle` is unique after
///   normalization (enforced by the repository, not this type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ProfileDto", into = "ProfileDto")]
pub struct Profile {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: ProfileId,
    #[schema(value_type = String, example = "GandalfTheGrey")]
    handle: Handle,
    #[schema(value_type = String, format = DateTime, example = "2025-06-01T12:00:00Z")]
    created_at: DateTime<Utc>,
}

impl Profile {
    /// Build a [`Profile`] from validated components.
    #[must_use]
    pub const fn new(id: ProfileId, handle: Handle, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            handle,
            created_at,
        }
    }

    /// Mint a fresh profile for `handle`, stamped with the current time.
    #[must_use]
    pub fn register(handle: Handle) -> Self {
        Self::new(ProfileId::random(), handle, Utc::now())
    }

    /// Fallible constructor from raw string parts.
    ///
    /// # Errors
    /// Returns a [`ProfileValidationError`] when either part fails its rules.
    pub fn try_from_parts(
        id: impl AsRef<str>,
        handle: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ProfileValidationError> {
        let id = ProfileId::new(id)?;
        let handle = Handle::new(handle)?;
        Ok(Self::new(id, handle, created_at))
    }

    /// Stable profile identifier.
    #[must_use]
    pub const fn id(&self) -> &ProfileId {
        &self.id
    }

    /// The profile's handle in its submitted casing.
    #[must_use]
    pub const fn handle(&self) -> &Handle {
        &self.handle
    }

    /// When the profile was registered.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileDto {
    id: String,
    handle: String,
    created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileDto {
    fn from(value: Profile) -> Self {
        let Profile {
            id,
            handle,
            created_at,
        } = value;
        Self {
            id: id.to_string(),
            handle: handle.into(),
            created_at,
        }
    }
}

impl TryFrom<ProfileDto> for Profile {
    type Error = ProfileValidationError;

    fn try_from(value: ProfileDto) -> Result<Self, Self::Error> {
        Profile::try_from_parts(value.id, value.handle, value.created_at)
    }
}

#[cfg(test)]
mod tests;
