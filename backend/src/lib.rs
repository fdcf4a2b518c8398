//! Backend library modules.
//!
//! The Duelground handle service: validation, suggestion, and reservation
//! of profile handles, exposed over a session-authenticated REST API. The
//! pure handle rules live in the `handle` crate under `crates/handle`;
//! everything here is the surrounding profile-management machinery.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-correlation middleware, re-exported for app assembly.
pub use middleware::trace::Trace;
