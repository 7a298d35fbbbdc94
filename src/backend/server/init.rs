/**
 * Server Initialization
 *
 * This module assembles the application: database pool, state, admin
 * bootstrap, and finally the router. It is the composition root the
 * server binary calls; tests assemble the same pieces directly so they
 * can inject an in-memory pool.
 */

use axum::Router;

use crate::backend::auth::password::hash_password;
use crate::backend::auth::policy::Role;
use crate::backend::auth::users::{create_user, get_user_by_email, NewUser};
use crate::backend::error::ApiError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, AppConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. Open the database pool and run migrations
/// 2. Build the shared state (session keys from the configured secret)
/// 3. Ensure the bootstrap admin account, if one is configured
/// 4. Assemble the router
///
/// # Errors
///
/// Only a database failure aborts startup. A failed admin bootstrap is
/// logged and the server comes up anyway; admin endpoints simply stay
/// unreachable until an admin exists.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("initializing allnik backend");

    let db = connect_database(&config.database_url).await?;
    let state = AppState::new(db, config);

    if let Err(e) = ensure_admin(&state).await {
        tracing::error!("admin bootstrap failed: {:?}", e);
    }

    Ok(create_router(state))
}

/// Ensure the configured admin account exists
///
/// No-op when no bootstrap pair is configured or the account is already
/// there. Admin is the one role registration refuses to hand out, so this
/// is the only way an admin comes into being.
pub async fn ensure_admin(state: &AppState) -> Result<(), ApiError> {
    let Some(bootstrap) = &state.config.admin_bootstrap else {
        return Ok(());
    };

    if get_user_by_email(&state.db, &bootstrap.email).await?.is_some() {
        tracing::info!("admin account already present");
        return Ok(());
    }

    let password_hash = hash_password(&bootstrap.password, state.config.bcrypt_cost)
        .await
        .map_err(|e| {
            tracing::error!("failed to hash bootstrap admin password: {}", e);
            ApiError::Internal
        })?;

    create_user(
        &state.db,
        NewUser {
            full_name: "Administrator".to_string(),
            email: bootstrap.email.clone(),
            username: "admin".to_string(),
            password_hash,
            city: None,
            region: None,
            expertise: None,
            work_region: None,
            role: Role::Admin,
        },
    )
    .await?;

    tracing::info!("admin account created for {}", bootstrap.email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::AdminBootstrap;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::Duration;

    fn config_with_bootstrap(bootstrap: Option<AdminBootstrap>) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            jwt_secret: "init-test-secret-with-enough-length!".to_string(),
            token_ttl: Duration::from_secs(3600),
            bcrypt_cost: 4,
            token_header: "authorization".to_string(),
            owner_cancel: true,
            admin_bootstrap: bootstrap,
        }
    }

    async fn test_state(bootstrap: Option<AdminBootstrap>) -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");
        AppState::new(pool, config_with_bootstrap(bootstrap))
    }

    #[tokio::test]
    async fn test_no_bootstrap_is_a_noop() {
        let state = test_state(None).await;
        ensure_admin(&state).await.unwrap();
        assert!(get_user_by_email(&state.db, "root@allnik.example")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_creates_admin_once() {
        let state = test_state(Some(AdminBootstrap {
            email: "root@allnik.example".to_string(),
            password: "bootstrap-password".to_string(),
        }))
        .await;

        ensure_admin(&state).await.unwrap();
        let admin = get_user_by_email(&state.db, "root@allnik.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        // Second boot finds it and leaves it alone
        ensure_admin(&state).await.unwrap();
    }
}
