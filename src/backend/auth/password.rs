/**
 * Password Hashing
 *
 * This module wraps bcrypt hashing and verification. Each hash gets a
 * fresh random salt, embedded in the digest together with the cost
 * factor, so no separate salt storage exists. Both operations run on the
 * blocking thread pool: bcrypt is deliberately slow and must not stall
 * the async scheduler while it grinds.
 */

use thiserror::Error;

/// Password processing error
#[derive(Debug, Error)]
pub enum PasswordError {
    /// bcrypt rejected the input or the cost factor
    #[error("password hashing failed")]
    HashingFailed,
    /// The blocking task was cancelled or panicked
    #[error("password hashing task failed")]
    TaskFailed,
}

/// Hash a plaintext password
///
/// # Arguments
/// * `plaintext` - Password to hash
/// * `cost` - bcrypt cost factor (the configured value, 10 by default)
///
/// # Returns
/// The bcrypt digest string, salt and cost embedded
pub async fn hash_password(plaintext: &str, cost: u32) -> Result<String, PasswordError> {
    let plaintext = plaintext.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
        .await
        .map_err(|_| PasswordError::TaskFailed)?
        .map_err(|_| PasswordError::HashingFailed)
}

/// Verify a plaintext password against a stored digest
///
/// Returns false for a mismatch and for a corrupt or empty digest;
/// a bad stored value must read as "wrong password", not crash the
/// login path.
pub async fn verify_password(plaintext: &str, digest: &str) -> bool {
    let plaintext = plaintext.to_string();
    let digest = digest.to_string();
    let result =
        tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest)).await;

    match result {
        Ok(Ok(valid)) => valid,
        Ok(Err(_)) => {
            tracing::warn!("stored password digest is malformed");
            false
        }
        Err(_) => {
            tracing::error!("password verification task failed");
            false
        }
    }
}
