/**
 * Property Listing Handlers
 *
 * # Routes
 *
 * - `POST /api/properties` - Advisor publishes a listing
 * - `GET  /api/properties` - Any authenticated user browses listings
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::backend::auth::policy::{authorize, Action};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::properties::db::{self, NewProperty, Property};
use crate::backend::server::state::AppState;

/// Publish-listing body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub area: i64,
    pub location: String,
    pub price: i64,
    #[serde(default)]
    pub payment_conditions: Option<String>,
    #[serde(default)]
    pub customer_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Listing as served to clients
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: String,
    pub advisor_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub area: i64,
    pub location: String,
    pub price: i64,
    pub payment_conditions: Option<String>,
    pub customer_type: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id.to_string(),
            advisor_id: property.advisor_id.to_string(),
            kind: property.kind,
            area: property.area,
            location: property.location,
            price: property.price,
            payment_conditions: property.payment_conditions,
            customer_type: property.customer_type,
            description: property.description,
            created_at: property.created_at.to_rfc3339(),
        }
    }
}

/// Advisor publishes a listing
///
/// # Errors
///
/// * `400 Bad Request` - empty kind/location or non-positive area/price
/// * `403 Forbidden` - caller is not an advisor
pub async fn create_property(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(body): Json<CreatePropertyBody>,
) -> Result<(StatusCode, Json<PropertyResponse>), ApiError> {
    if !authorize(identity.role, Action::PublishProperty) {
        return Err(ApiError::forbidden("advisor role required"));
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
    if body.price <= 0 {
        return Err(ApiError::validation("price must be positive"));
    }

    let property = db::create_property(
        &state.db,
        identity.user_id,
        NewProperty {
            kind: body.kind,
            area: body.area,
            location: body.location,
            price: body.price,
            payment_conditions: body.payment_conditions,
            customer_type: body.customer_type,
            description: body.description,
        },
    )
    .await?;

    tracing::info!("property {} published by advisor {}", property.id, identity.user_id);

    Ok((StatusCode::CREATED, Json(PropertyResponse::from(property))))
}

/// Browse published listings
pub async fn list_properties(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<PropertyResponse>>, ApiError> {
    if !authorize(identity.role, Action::BrowseProperties) {
        return Err(ApiError::forbidden("not allowed to browse properties"));
    }

    let properties = db::list_properties(&state.db).await?;
    Ok(Json(properties.into_iter().map(PropertyResponse::from).collect()))
}
