//! In-memory uniqueness index for profiles.
//!
//! The platform keeps no external database, so this process-local map *is*
//! the production index, not a test double. Keys are normalized handles;
//! values keep the submitted casing.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{InsertError, ProfileRepository};
use crate::domain::{Error, Profile, ProfileId};

/// Process-local profile store keyed by normalized handle.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileRepository {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Profile>> {
        self.profiles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Profile>> {
        self.profiles.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_handle(&self, normalized: &str) -> Result<Option<Profile>, Error> {
        Ok(self.read().get(normalized).cloned())
    }

    async fn insert(&self, profile: Profile) -> Result<Profile, InsertError> {
        // The key check and insert share one write guard, so concurrent
        // reservations of the same handle resolve to a single winner.
        let mut profiles = self.write();
        let key = profile.handle().normalized();
        if profiles.contains_key(&key) {
            return Err(InsertError::HandleTaken);
        }
        profiles.insert(key, profile.clone());
        Ok(profile)
    }

    async fn get(&self, id: &ProfileId) -> Result<Option<Profile>, Error> {
        // Id lookups scan; the map is keyed for the hot path, handle checks.
        Ok(self
            .read()
            .values()
            .find(|profile| profile.id() == id)
            .cloned())
    }
}
