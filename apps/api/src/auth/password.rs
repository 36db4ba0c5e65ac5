//! Password hashing with bcrypt.
//!
//! Every hash gets a fresh random salt, so hashing the same password twice
//! yields two different strings that both verify. Passwords bcrypt would
//! truncate are refused instead of silently shortened.

use std::sync::{Arc, OnceLock};

use anyhow::anyhow;
use tracing::warn;

use crate::errors::AppError;

/// bcrypt reads at most 72 bytes, and the trailing NUL takes one of them.
pub const MAX_PASSWORD_BYTES: usize = 71;

const DUMMY_PASSWORD: &str = "unknown-account-placeholder";

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Checked against when the account does not exist, so an unknown email
    /// costs the same bcrypt work as a wrong password.
    dummy_hash: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            dummy_hash: Arc::new(OnceLock::new()),
        }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AppError::Validation(format!(
                "password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }
        bcrypt::non_truncating_hash(password, self.cost)
            .map_err(|e| AppError::Internal(anyhow!("password hashing failed: {e}")))
    }

    /// A stored hash that bcrypt cannot parse counts as a mismatch, as does a
    /// password too long to have been hashed.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        match bcrypt::non_truncating_verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Stored password hash could not be checked: {e}");
                false
            }
        }
    }

    /// `hash` on the blocking pool. bcrypt is deliberately slow.
    pub async fn hash_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in hash: {e}")))?
    }

    /// `verify` on the blocking pool.
    pub async fn verify_blocking(&self, password: String, hash: String) -> Result<bool, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in verify: {e}")))
    }

    /// Runs a full `verify` against the placeholder hash and discards the result.
    pub async fn verify_dummy_blocking(&self, password: String) -> Result<(), AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || {
            let dummy = hasher.dummy_hash.get_or_init(|| {
                bcrypt::non_truncating_hash(DUMMY_PASSWORD, hasher.cost).unwrap_or_default()
            });
            hasher.verify(&password, dummy);
        })
        .await
        .map_err(|e| AppError::Internal(anyhow!("spawn_blocking failed in verify: {e}")))
    }
}
