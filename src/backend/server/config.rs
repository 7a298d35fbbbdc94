/**
 * Server Configuration
 *
 * This module loads the process configuration from environment variables,
 * once, at startup. Everything the auth core is parameterized on lives
 * here: the signing secret, token TTL, bcrypt cost, the header carrying
 * the token, and the owner-cancel policy.
 *
 * # Configuration Sources
 *
 * Environment variables, with development defaults for everything except
 * `JWT_SECRET`. The secret has no default and no fallback: a process
 * without one refuses to start rather than signing tokens with a value
 * baked into the source.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `JWT_SECRET` is not set
    #[error("JWT_SECRET must be set (no default is provided)")]
    MissingSecret,
    /// A variable is set but unusable
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Optional startup admin account
#[derive(Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

/// Process-wide configuration, loaded once and then immutable
#[derive(Clone)]
pub struct AppConfig {
    /// SQLite database URL
    pub database_url: String,
    /// Port the server binds to
    pub port: u16,
    /// JWT signing secret (required)
    pub jwt_secret: String,
    /// Token time-to-live
    pub token_ttl: Duration,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Name of the request header carrying the token
    pub token_header: String,
    /// Whether owners may cancel their own live requests
    pub owner_cancel: bool,
    /// Admin account to ensure at startup, if configured
    pub admin_bootstrap: Option<AdminBootstrap>,
}

// Secrets stay out of logs even when the whole config is dumped
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("token_header", &self.token_header)
            .field("owner_cancel", &self.owner_cancel)
            .field(
                "admin_bootstrap",
                &self.admin_bootstrap.as_ref().map(|b| b.email.as_str()),
            )
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// # Defaults
    ///
    /// - `DATABASE_URL` - `sqlite:allnik.db`
    /// - `SERVER_PORT` - 3000
    /// - `ALLNIK_TOKEN_TTL_SECS` - 3600 (one hour)
    /// - `ALLNIK_BCRYPT_COST` - 10 (legal range 4-31)
    /// - `ALLNIK_TOKEN_HEADER` - `authorization`
    /// - `ALLNIK_OWNER_CANCEL` - true
    ///
    /// # Errors
    ///
    /// `JWT_SECRET` missing, or any set variable failing to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| ConfigError::MissingSecret)?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:allnik.db".to_string());

        let port = parse_var("SERVER_PORT", 3000u16)?;
        let ttl_secs = parse_var("ALLNIK_TOKEN_TTL_SECS", 3600u64)?;
        let bcrypt_cost = parse_var("ALLNIK_BCRYPT_COST", 10u32)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "ALLNIK_BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let token_header = std::env::var("ALLNIK_TOKEN_HEADER")
            .unwrap_or_else(|_| "authorization".to_string())
            .to_ascii_lowercase();

        let owner_cancel = parse_var("ALLNIK_OWNER_CANCEL", true)?;

        let admin_bootstrap = match (
            std::env::var("ALLNIK_ADMIN_EMAIL"),
            std::env::var("ALLNIK_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(AdminBootstrap { email, password })
            }
            _ => None,
        };

        Ok(Self {
            database_url,
            port,
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            bcrypt_cost,
            token_header,
            owner_cancel,
            admin_bootstrap,
        })
    }
}

/// Read and parse one variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
        }),
        Err(_) => Ok(default),
    }
}

/// Open the database pool and run embedded migrations
///
/// The database file is created on first boot. WAL mode keeps concurrent
/// readers off the writers' backs; the busy timeout absorbs short lock
/// contention instead of surfacing it as errors.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("connecting to database");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    tracing::info!("running database migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
