/**
 * User Model and Database Operations
 *
 * This module handles user data and the point queries the rest of the
 * backend needs: create, lookup by email/username/id, and the admin
 * listing. The password digest travels with the row internally but is
 * stripped before anything is serialized to a client.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::policy::Role;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// Email address (unique, login identity)
    pub email: String,
    /// Username (unique, 3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Home city
    pub city: Option<String>,
    /// Home region
    pub region: Option<String>,
    /// Advisor expertise (advisors only)
    pub expertise: Option<String>,
    /// Region an advisor works in (advisors only)
    pub work_region: Option<String>,
    /// Access tier
    pub role: Role,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a user
///
/// The password arrives here already hashed; this module never sees a
/// plaintext password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub city: Option<String>,
    pub region: Option<String>,
    pub expertise: Option<String>,
    pub work_region: Option<String>,
    pub role: Role,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `new_user` - User fields with the password already hashed
///
/// # Returns
/// Created user or error (a unique violation surfaces as `sqlx::Error`
/// and is mapped to a conflict by the caller)
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, full_name, email, username, password_hash,
                           city, region, expertise, work_region, role,
                           created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, full_name, email, username, password_hash,
                  city, region, expertise, work_region, role,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&new_user.full_name)
    .bind(&new_user.email)
    .bind(&new_user.username)
    .bind(&new_user.password_hash)
    .bind(&new_user.city)
    .bind(&new_user.region)
    .bind(&new_user.expertise)
    .bind(&new_user.work_region)
    .bind(new_user.role)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - User email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, full_name, email, username, password_hash,
               city, region, expertise, work_region, role,
               created_at, updated_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, full_name, email, username, password_hash,
               city, region, expertise, work_region, role,
               created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, full_name, email, username, password_hash,
               city, region, expertise, work_region, role,
               created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// List every user, newest first
///
/// Admin-only at the handler layer.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, full_name, email, username, password_hash,
               city, region, expertise, work_region, role,
               created_at, updated_at
        FROM users
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}
