//! Profile API handlers.
//!
//! ```text
//! POST /api/v1/profiles {"handle":"GandalfTheGrey"}
//! GET /api/v1/profiles/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Profile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /api/v1/profiles`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfileRequest {
    /// Handle the new profile wants to claim.
    pub handle: String,
}

/// Register a profile by reserving its handle.
///
/// The new profile's id is persisted into the session cookie so the client
/// is immediately "logged in" as that profile.
#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    request_body = RegisterProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = Profile,
         headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Handle breaks a rule", body = ApiError),
        (status = 409, description = "Handle already taken", body = ApiError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["profiles"],
    operation_id = "registerProfile",
    security([])
)]
#[post("/profiles")]
pub async fn register_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterProfileRequest>,
) -> ApiResult<HttpResponse> {
    let profile = state.handles.register(&payload.handle).await?;
    session.persist_profile(profile.id())?;
    Ok(HttpResponse::Created().json(profile))
}

/// Fetch the profile bound to the current session.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/me",
    responses(
        (status = 200, description = "Current profile", body = Profile),
        (status = 401, description = "No registered profile in the session",
         body = ApiError),
        (status = 404, description = "Session references a purged profile",
         body = ApiError),
        (status = 500, description = "Internal server error")
    ),
    tags = ["profiles"],
    operation_id = "currentProfile"
)]
#[get("/profiles/me")]
pub async fn current_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Profile>> {
    let id = session.require_profile_id()?;
    let profile = state
        .profiles
        .get(&id)
        .await?
        .ok_or_else(|| Error::not_found("profile no longer exists"))?;
    Ok(web::Json(profile))
}
