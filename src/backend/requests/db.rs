/**
 * Database Operations for Advisory Requests
 *
 * This module provides the request model and its queries. Status
 * transitions are single guarded UPDATEs: the WHERE clause carries the
 * expected current status, so a transition that lost a race simply
 * matches zero rows and the caller reports the conflict.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Lifecycle state of an advisory request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Created, waiting for an advisor
    Pending,
    /// An advisor took it
    Accepted,
    /// The advisor finished the work
    Completed,
    /// Ended early by the owner or an admin
    Cancelled,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Advisory request row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AdvisoryRequest {
    /// Unique request ID (UUID)
    pub id: Uuid,
    /// Owner (the client who filed it)
    pub user_id: Uuid,
    /// Advisor bound at accept time
    pub advisor_id: Option<Uuid>,
    /// Property kind ("apartment", "house", ...)
    pub kind: String,
    /// Area in square meters
    pub area: i64,
    /// Desired location
    pub location: String,
    pub bedrooms: Option<i64>,
    pub style: Option<String>,
    pub budget: Option<i64>,
    pub payment: Option<String>,
    pub description: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a request
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub kind: String,
    pub area: i64,
    pub location: String,
    pub bedrooms: Option<i64>,
    pub style: Option<String>,
    pub budget: Option<i64>,
    pub payment: Option<String>,
    pub description: Option<String>,
}

const REQUEST_COLUMNS: &str = "id, user_id, advisor_id, kind, area, location, bedrooms, \
                               style, budget, payment, description, status, created_at, updated_at";

/// Create a new pending request owned by `owner_id`
pub async fn create_request(
    pool: &SqlitePool,
    owner_id: Uuid,
    new_request: NewRequest,
) -> Result<AdvisoryRequest, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let request = sqlx::query_as::<_, AdvisoryRequest>(&format!(
        r#"
        INSERT INTO requests (id, user_id, advisor_id, kind, area, location, bedrooms,
                              style, budget, payment, description, status, created_at, updated_at)
        VALUES (?, ?, NULL, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(owner_id)
    .bind(&new_request.kind)
    .bind(new_request.area)
    .bind(&new_request.location)
    .bind(new_request.bedrooms)
    .bind(&new_request.style)
    .bind(new_request.budget)
    .bind(&new_request.payment)
    .bind(&new_request.description)
    .bind(RequestStatus::Pending)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(request)
}

/// Get a request by ID
pub async fn get_request_by_id(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<AdvisoryRequest>, sqlx::Error> {
    sqlx::query_as::<_, AdvisoryRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List the requests a client owns, newest first
pub async fn list_requests_by_owner(
    pool: &SqlitePool,
    owner_id: Uuid,
) -> Result<Vec<AdvisoryRequest>, sqlx::Error> {
    sqlx::query_as::<_, AdvisoryRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM requests WHERE user_id = ? ORDER BY created_at DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// List the advisor's working set: the open pool plus their accepted work
pub async fn list_open_requests(
    pool: &SqlitePool,
    advisor_id: Uuid,
) -> Result<Vec<AdvisoryRequest>, sqlx::Error> {
    sqlx::query_as::<_, AdvisoryRequest>(&format!(
        r#"
        SELECT {REQUEST_COLUMNS} FROM requests
        WHERE status = ? OR (advisor_id = ? AND status = ?)
        ORDER BY created_at DESC
        "#
    ))
    .bind(RequestStatus::Pending)
    .bind(advisor_id)
    .bind(RequestStatus::Accepted)
    .fetch_all(pool)
    .await
}

/// List every request in the system, newest first (admin view)
pub async fn list_all_requests(pool: &SqlitePool) -> Result<Vec<AdvisoryRequest>, sqlx::Error> {
    sqlx::query_as::<_, AdvisoryRequest>(&format!(
        "SELECT {REQUEST_COLUMNS} FROM requests ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Accept a pending request, binding the advisor
///
/// Returns None if the request is missing or no longer pending; the
/// status guard in the WHERE clause is what makes concurrent accepts
/// safe.
pub async fn accept_request(
    pool: &SqlitePool,
    id: Uuid,
    advisor_id: Uuid,
) -> Result<Option<AdvisoryRequest>, sqlx::Error> {
    sqlx::query_as::<_, AdvisoryRequest>(&format!(
        r#"
        UPDATE requests
        SET status = ?, advisor_id = ?, updated_at = ?
        WHERE id = ? AND status = ?
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(RequestStatus::Accepted)
    .bind(advisor_id)
    .bind(Utc::now())
    .bind(id)
    .bind(RequestStatus::Pending)
    .fetch_optional(pool)
    .await
}

/// Complete an accepted request, advisor binding enforced
pub async fn complete_request(
    pool: &SqlitePool,
    id: Uuid,
    advisor_id: Uuid,
) -> Result<Option<AdvisoryRequest>, sqlx::Error> {
    sqlx::query_as::<_, AdvisoryRequest>(&format!(
        r#"
        UPDATE requests
        SET status = ?, updated_at = ?
        WHERE id = ? AND status = ? AND advisor_id = ?
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(RequestStatus::Completed)
    .bind(Utc::now())
    .bind(id)
    .bind(RequestStatus::Accepted)
    .bind(advisor_id)
    .fetch_optional(pool)
    .await
}

/// Cancel a request that has not reached a terminal state
pub async fn cancel_request(
    pool: &SqlitePool,
    id: Uuid,
) -> Result<Option<AdvisoryRequest>, sqlx::Error> {
    sqlx::query_as::<_, AdvisoryRequest>(&format!(
        r#"
        UPDATE requests
        SET status = ?, updated_at = ?
        WHERE id = ? AND status IN (?, ?)
        RETURNING {REQUEST_COLUMNS}
        "#
    ))
    .bind(RequestStatus::Cancelled)
    .bind(Utc::now())
    .bind(id)
    .bind(RequestStatus::Pending)
    .bind(RequestStatus::Accepted)
    .fetch_optional(pool)
    .await
}
