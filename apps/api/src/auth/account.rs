use tracing::{info, warn};

use crate::auth::password::{PasswordHasher, MAX_PASSWORD_BYTES};
use crate::auth::token::TokenIssuer;
use crate::errors::AppError;
use crate::models::user::User;
use crate::store::UserStore;

/// Creates an account. The email must not be registered yet.
pub async fn register(
    users: &dyn UserStore,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    if email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("password must not be empty".to_string()));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Validation(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    if users.find_by_email(email).await?.is_some() {
        return Err(AppError::EmailTaken);
    }

    let hashed_password = hasher.hash_blocking(password.to_string()).await?;
    let user = users.insert(email, &hashed_password).await?;

    info!("User registered with email: {email}");
    Ok(user)
}

/// Checks credentials and returns a freshly issued access token.
/// Unknown email and wrong password fail identically.
pub async fn login(
    users: &dyn UserStore,
    hasher: &PasswordHasher,
    tokens: &TokenIssuer,
    email: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = match users.find_by_email(email).await? {
        Some(user) => user,
        None => {
            hasher.verify_dummy_blocking(password.to_string()).await?;
            warn!("Failed login attempt for email: {email}");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !hasher
        .verify_blocking(password.to_string(), user.hashed_password.clone())
        .await?
    {
        warn!("Failed login attempt for email: {email}");
        return Err(AppError::InvalidCredentials);
    }

    let token = tokens.issue_default(&user.email)?;
    info!("User logged in with email: {}", user.email);
    Ok(token)
}
