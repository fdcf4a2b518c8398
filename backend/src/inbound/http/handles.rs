//! Handle API handlers.
//!
//! ```text
//! POST /api/v1/handles/check {"candidate":"wizard-master"}
//! GET /api/v1/handles/suggestions?base=mage&count=3
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::HandleCheck;
use crate::domain::handles::DEFAULT_ALTERNATIVES;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Check request body for `POST /api/v1/handles/check`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckHandleRequest {
    /// Candidate handle as typed by the user.
    pub candidate: String,
}

/// Verdict returned by the handle check endpoint.
///
/// Validation failures are ordinary 200 responses: the user can fix them,
/// so they are data, not API errors.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandleCheckResponse {
    /// Candidate as submitted.
    pub candidate: String,
    /// Whether the candidate passed the handle rules.
    pub is_valid: bool,
    /// Reason for rejection, absent for valid candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Single-shot remediation hint, absent for valid candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Whether the handle is free to claim; absent when validation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// Claimable alternatives, present only for taken handles.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub alternatives: Vec<String>,
}

impl From<HandleCheck> for HandleCheckResponse {
    fn from(value: HandleCheck) -> Self {
        Self {
            candidate: value.candidate().to_owned(),
            is_valid: value.validation().is_valid(),
            error: value.validation().error().map(str::to_owned),
            suggestion: value.validation().suggestion().map(str::to_owned),
            available: value.available(),
            alternatives: value.alternatives().to_vec(),
        }
    }
}

/// Validate a candidate handle and report availability.
#[utoipa::path(
    post,
    path = "/api/v1/handles/check",
    request_body = CheckHandleRequest,
    responses(
        (status = 200, description = "Check verdict", body = HandleCheckResponse),
        (status = 500, description = "Internal server error")
    ),
    tags = ["handles"],
    operation_id = "checkHandle",
    security([])
)]
#[post("/handles/check")]
pub async fn check_handle(
    state: web::Data<HttpState>,
    payload: web::Json<CheckHandleRequest>,
) -> ApiResult<web::Json<HandleCheckResponse>> {
    let check = state.handles.check(&payload.candidate).await?;
    Ok(web::Json(check.into()))
}

/// Query parameters for `GET /api/v1/handles/suggestions`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsQuery {
    /// Base handle to derive suggestions from.
    pub base: String,
    /// Maximum suggestions wanted; defaults to 3, capped server-side.
    pub count: Option<usize>,
}

/// Suggestions payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    /// Claimable handles derived from the base, possibly fewer than asked.
    pub suggestions: Vec<String>,
}

/// Suggest claimable handles derived from a base.
#[utoipa::path(
    get,
    path = "/api/v1/handles/suggestions",
    params(SuggestionsQuery),
    responses(
        (status = 200, description = "Claimable suggestions", body = SuggestionsResponse),
        (status = 500, description = "Internal server error")
    ),
    tags = ["handles"],
    operation_id = "suggestHandles",
    security([])
)]
#[get("/handles/suggestions")]
pub async fn suggest_handles(
    state: web::Data<HttpState>,
    query: web::Query<SuggestionsQuery>,
) -> ApiResult<web::Json<SuggestionsResponse>> {
    let count = query.count.unwrap_or(DEFAULT_ALTERNATIVES);
    let suggestions = state.handles.suggest(&query.base, count).await?;
    Ok(web::Json(SuggestionsResponse { suggestions }))
}
