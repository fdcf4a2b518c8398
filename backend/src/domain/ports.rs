//! Driving ports for profile persistence.
//!
//! Inbound adapters and domain services depend on these traits instead of a
//! concrete store, so the uniqueness index can be swapped without touching
//! use-case code. The process-local adapter lives in `outbound::memory`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Error, Profile, ProfileId};

/// Failures raised when reserving a handle.
#[derive(Debug, Error)]
pub enum InsertError {
    /// Another profile already owns the normalized handle key.
    #[error("handle is already taken")]
    HandleTaken,
    /// The adapter itself failed.
    #[error(transparent)]
    Repository(#[from] Error),
}

/// Uniqueness index and profile store.
///
/// Keys are normalized handles; implementations must treat the
/// check-then-insert window atomically so one reservation wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Look up a profile by its normalized handle key.
    async fn find_by_handle(&self, normalized: &str) -> Result<Option<Profile>, Error>;

    /// Reserve the profile's handle and persist the profile.
    async fn insert(&self, profile: Profile) -> Result<Profile, InsertError>;

    /// Fetch a profile by id.
    async fn get(&self, id: &ProfileId) -> Result<Option<Profile>, Error>;
}
