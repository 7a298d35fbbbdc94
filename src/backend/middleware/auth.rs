/**
 * Authentication Middleware
 *
 * This module provides the gate protecting every private route. It
 * extracts a token from the configured request header, verifies it, and
 * attaches the resolved identity to the request for handlers to use.
 * Verification is pure: no I/O happens here, and a bad token is rejected
 * before any business logic runs.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum::http::HeaderMap;
use uuid::Uuid;

use crate::backend::auth::policy::Role;
use crate::backend::auth::AuthError;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from the verified token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: Role,
}

/// Pull the raw token out of the configured header
///
/// The header name comes from deployment configuration rather than being
/// hardcoded; a `Bearer ` prefix is tolerated either way. Absence fails
/// fast as `MissingToken` before any cryptographic work.
fn token_from_headers<'a>(headers: &'a HeaderMap, header_name: &str) -> Result<&'a str, AuthError> {
    let raw = headers
        .get(header_name)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MalformedToken)?;

    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from the configured header
/// 2. Verifies signature and expiry
/// 3. Attaches `AuthenticatedUser` to request extensions
///
/// Rejects with 401 before the handler runs if any step fails. Token
/// problems are client faults, so nothing here can produce a 500.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_name = state.config.token_header.as_str();

    let token = token_from_headers(request.headers(), header_name).map_err(|e| {
        tracing::warn!("rejected request: {}", e);
        e
    })?;

    let claims = state.sessions.verify(token).map_err(|e| {
        tracing::warn!("token rejected: {}", e);
        e
    })?;

    let user_id = claims.user_id()?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Handlers behind the gate take this as a parameter to receive the
/// identity the middleware attached.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::error!("AuthUser used on a route outside the authentication gate");
                ApiError::Auth(AuthError::MissingToken)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            token_from_headers(&headers, "authorization"),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_bearer_prefix_stripped() {
        let headers = headers_with("authorization", "Bearer abc.def.ghi");
        assert_eq!(
            token_from_headers(&headers, "authorization"),
            Ok("abc.def.ghi")
        );
    }

    #[test]
    fn test_raw_token_accepted() {
        let headers = headers_with("authorization", "abc.def.ghi");
        assert_eq!(
            token_from_headers(&headers, "authorization"),
            Ok("abc.def.ghi")
        );
    }

    #[test]
    fn test_configured_header_name() {
        let headers = headers_with("x-auth-token", "abc.def.ghi");
        assert_eq!(
            token_from_headers(&headers, "x-auth-token"),
            Ok("abc.def.ghi")
        );
        // The default header is not consulted when another is configured
        assert_eq!(
            token_from_headers(&headers, "authorization"),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn test_empty_value_is_missing() {
        let headers = headers_with("authorization", "Bearer ");
        assert_eq!(
            token_from_headers(&headers, "authorization"),
            Err(AuthError::MissingToken)
        );
    }
}
