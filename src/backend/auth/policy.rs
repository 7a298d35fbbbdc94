/**
 * Role-Based Authorization Policy
 *
 * This module defines the access tiers and the pure predicate deciding
 * whether a role may perform an action. It runs strictly after
 * authentication; a failed check is a 403, never a 401.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access tier attached to a credential and propagated into tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// Client looking for a property
    User,
    /// Real-estate advisor working requests and publishing listings
    Advisor,
    /// Administrator with full visibility
    Admin,
}

impl Role {
    /// Parse a role from its lowercase wire form
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "advisor" => Some(Role::Advisor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Advisor => "advisor",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Every role-gated operation in the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create an advisory request
    CreateRequest,
    /// List one's own requests
    ListOwnRequests,
    /// Cancel one's own request (ownership checked separately)
    CancelOwnRequest,
    /// Browse the pending request pool
    BrowseOpenRequests,
    /// Accept a pending request
    AcceptRequest,
    /// Complete an accepted request
    CompleteRequest,
    /// Publish a property listing
    PublishProperty,
    /// Browse property listings
    BrowseProperties,
    /// List every request in the system
    ListAllRequests,
    /// List every user in the system
    ListUsers,
}

/// Decide whether `role` may perform `action`
///
/// Pure function over the two inputs. Ownership is a separate concern:
/// actions that also require owning the resource pass this check for any
/// authenticated role and are narrowed by [`can_view_request`] or
/// [`may_cancel`].
pub fn authorize(role: Role, action: Action) -> bool {
    match action {
        Action::CreateRequest
        | Action::ListOwnRequests
        | Action::CancelOwnRequest
        | Action::BrowseProperties => true,
        Action::BrowseOpenRequests
        | Action::AcceptRequest
        | Action::CompleteRequest
        | Action::PublishProperty => matches!(role, Role::Advisor),
        Action::ListAllRequests | Action::ListUsers => matches!(role, Role::Admin),
    }
}

/// Decide whether an identity may read a given request
///
/// The owner, the assigned advisor, and admins may see it; nobody else.
pub fn can_view_request(
    role: Role,
    viewer_id: Uuid,
    owner_id: Uuid,
    advisor_id: Option<Uuid>,
) -> bool {
    role == Role::Admin || viewer_id == owner_id || advisor_id == Some(viewer_id)
}

/// Decide whether an identity may cancel a given request
///
/// Admins always may. The owner may only when the deployment enables the
/// owner-cancel policy; advisors have no cancel privilege at all, so a
/// request they accepted stays live until the client or an admin ends it.
pub fn may_cancel(role: Role, viewer_id: Uuid, owner_id: Uuid, owner_cancel: bool) -> bool {
    match role {
        Role::Admin => true,
        _ => owner_cancel && viewer_id == owner_id,
    }
}
