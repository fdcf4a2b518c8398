//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` so they depend only on
//! domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::HandleService;
use crate::domain::ports::ProfileRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Handle use-cases: check, suggest, register.
    pub handles: HandleService,
    /// Profile lookups for session-scoped endpoints.
    pub profiles: Arc<dyn ProfileRepository>,
}

impl HttpState {
    /// Bundle the handle service and the repository it runs against.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            handles: HandleService::new(Arc::clone(&profiles)),
            profiles,
        }
    }
}
