/**
 * Advisory Request Handlers
 *
 * HTTP handlers for the request lifecycle. Every handler runs behind the
 * authentication gate; role and ownership checks happen here, strictly
 * after the identity is known, so a failure is always a 403 and never a
 * 401.
 *
 * # Routes
 *
 * - `POST /api/requests` - Create a request (any role)
 * - `GET  /api/requests` - List the caller's own requests
 * - `GET  /api/requests/{id}` - Owner, assigned advisor, or admin
 * - `POST /api/requests/{id}/accept` - Advisor takes a pending request
 * - `POST /api/requests/{id}/complete` - Assigned advisor finishes it
 * - `POST /api/requests/{id}/cancel` - Owner (per policy) or admin
 * - `GET  /api/advisor/requests` - Advisor working set
 * - `GET  /api/admin/requests` - Admin view of everything
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::policy::{authorize, can_view_request, may_cancel, Action};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::requests::db::{self, AdvisoryRequest, NewRequest, RequestStatus};
use crate::backend::server::state::AppState;

/// Create-request body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestBody {
    /// Property kind ("apartment", "house", ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Area in square meters
    pub area: i64,
    pub location: String,
    #[serde(default)]
    pub bedrooms: Option<i64>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub budget: Option<i64>,
    #[serde(default)]
    pub payment: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request resource as served to clients
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestResponse {
    pub id: String,
    pub user_id: String,
    pub advisor_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub area: i64,
    pub location: String,
    pub bedrooms: Option<i64>,
    pub style: Option<String>,
    pub budget: Option<i64>,
    pub payment: Option<String>,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AdvisoryRequest> for RequestResponse {
    fn from(request: AdvisoryRequest) -> Self {
        Self {
            id: request.id.to_string(),
            user_id: request.user_id.to_string(),
            advisor_id: request.advisor_id.map(|id| id.to_string()),
            kind: request.kind,
            area: request.area,
            location: request.location,
            bedrooms: request.bedrooms,
            style: request.style,
            budget: request.budget,
            payment: request.payment,
            description: request.description,
            status: request.status,
            created_at: request.created_at.to_rfc3339(),
            updated_at: request.updated_at.to_rfc3339(),
        }
    }
}

/// Create a new advisory request owned by the caller
///
/// # Errors
///
/// * `400 Bad Request` - empty kind/location or non-positive area
pub async fn create_request(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(body): Json<CreateRequestBody>,
) -> Result<(StatusCode, Json<RequestResponse>), ApiError> {
    if !authorize(identity.role, Action::CreateRequest) {
        return Err(ApiError::forbidden("not allowed to create requests"));
    }

    if body.kind.trim().is_empty() {
        return Err(ApiError::validation("type is required"));
    }
    if body.location.trim().is_empty() {
        return Err(ApiError::validation("location is required"));
    }
    if body.area <= 0 {
        return Err(ApiError::validation("area must be positive"));
    }

    let request = db::create_request(
        &state.db,
        identity.user_id,
        NewRequest {
            kind: body.kind,
            area: body.area,
            location: body.location,
            bedrooms: body.bedrooms,
            style: body.style,
            budget: body.budget,
            payment: body.payment,
            description: body.description,
        },
    )
    .await?;

    tracing::info!("request {} created by {}", request.id, identity.user_id);

    Ok((StatusCode::CREATED, Json(RequestResponse::from(request))))
}

/// List the caller's own requests
pub async fn list_my_requests(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    if !authorize(identity.role, Action::ListOwnRequests) {
        return Err(ApiError::forbidden("not allowed to list requests"));
    }

    let requests = db::list_requests_by_owner(&state.db, identity.user_id).await?;
    Ok(Json(requests.into_iter().map(RequestResponse::from).collect()))
}

/// Fetch one request, visible to its owner, its advisor, and admins
///
/// # Errors
///
/// * `404 Not Found` - no such request
/// * `403 Forbidden` - caller is none of the three
pub async fn get_request(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestResponse>, ApiError> {
    let request = db::get_request_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("request not found"))?;

    if !can_view_request(identity.role, identity.user_id, request.user_id, request.advisor_id) {
        return Err(ApiError::forbidden("not allowed to view this request"));
    }

    Ok(Json(RequestResponse::from(request)))
}

/// Advisor accepts a pending request
///
/// # Errors
///
/// * `403 Forbidden` - caller is not an advisor
/// * `404 Not Found` - no such request
/// * `409 Conflict` - request is not pending (or another advisor won the race)
pub async fn accept_request(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestResponse>, ApiError> {
    if !authorize(identity.role, Action::AcceptRequest) {
        return Err(ApiError::forbidden("advisor role required"));
    }

    let request = db::get_request_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("request not found"))?;

    if request.status != RequestStatus::Pending {
        return Err(ApiError::conflict(format!(
            "request is {}, only pending requests can be accepted",
            request.status
        )));
    }

    let accepted = db::accept_request(&state.db, id, identity.user_id)
        .await?
        .ok_or_else(|| ApiError::conflict("request was just taken by another advisor"))?;

    tracing::info!("request {} accepted by advisor {}", id, identity.user_id);

    Ok(Json(RequestResponse::from(accepted)))
}

/// Assigned advisor completes an accepted request
///
/// # Errors
///
/// * `403 Forbidden` - caller is not the advisor bound to this request
/// * `404 Not Found` - no such request
/// * `409 Conflict` - request is not in the accepted state
pub async fn complete_request(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestResponse>, ApiError> {
    if !authorize(identity.role, Action::CompleteRequest) {
        return Err(ApiError::forbidden("advisor role required"));
    }

    let request = db::get_request_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("request not found"))?;

    if request.status != RequestStatus::Accepted {
        return Err(ApiError::conflict(format!(
            "request is {}, only accepted requests can be completed",
            request.status
        )));
    }

    if request.advisor_id != Some(identity.user_id) {
        return Err(ApiError::forbidden("request is assigned to another advisor"));
    }

    let completed = db::complete_request(&state.db, id, identity.user_id)
        .await?
        .ok_or_else(|| ApiError::conflict("request state changed, try again"))?;

    tracing::info!("request {} completed by advisor {}", id, identity.user_id);

    Ok(Json(RequestResponse::from(completed)))
}

/// Cancel a live request
///
/// Owners may cancel when the deployment policy allows it; admins always
/// may.
///
/// # Errors
///
/// * `403 Forbidden` - caller may not cancel this request
/// * `404 Not Found` - no such request
/// * `409 Conflict` - request already reached a terminal state
pub async fn cancel_request(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestResponse>, ApiError> {
    let request = db::get_request_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("request not found"))?;

    if !may_cancel(
        identity.role,
        identity.user_id,
        request.user_id,
        state.config.owner_cancel,
    ) {
        return Err(ApiError::forbidden("not allowed to cancel this request"));
    }

    if !matches!(request.status, RequestStatus::Pending | RequestStatus::Accepted) {
        return Err(ApiError::conflict(format!(
            "request is already {}",
            request.status
        )));
    }

    let cancelled = db::cancel_request(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::conflict("request state changed, try again"))?;

    tracing::info!("request {} cancelled by {}", id, identity.user_id);

    Ok(Json(RequestResponse::from(cancelled)))
}

/// Advisor working set: the pending pool plus their accepted requests
pub async fn list_open_requests(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    if !authorize(identity.role, Action::BrowseOpenRequests) {
        return Err(ApiError::forbidden("advisor role required"));
    }

    let requests = db::list_open_requests(&state.db, identity.user_id).await?;
    Ok(Json(requests.into_iter().map(RequestResponse::from).collect()))
}

/// Admin view of every request in the system
pub async fn list_all_requests(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<RequestResponse>>, ApiError> {
    if !authorize(identity.role, Action::ListAllRequests) {
        return Err(ApiError::forbidden("admin role required"));
    }

    let requests = db::list_all_requests(&state.db).await?;
    Ok(Json(requests.into_iter().map(RequestResponse::from).collect()))
}
