//! Resolves a bearer token to the user it was issued for.
//!
//! Every failure, whether a bad signature, an expired token, a missing subject
//! or a subject with no account, becomes `AppError::Unauthenticated`.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::auth::token::TokenIssuer;
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;
use crate::store::UserStore;

pub async fn resolve(
    tokens: &TokenIssuer,
    users: &dyn UserStore,
    token: &str,
) -> Result<User, AppError> {
    let subject = tokens.verify(token).map_err(|e| {
        debug!("Rejected bearer token: {e}");
        AppError::Unauthenticated
    })?;

    users
        .find_by_email(&subject)
        .await?
        .ok_or(AppError::Unauthenticated)
}

/// Extractor for the authenticated caller.
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> String {
///     user.email
/// }
/// ```
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AppError::Unauthenticated)?;
        let user = resolve(&state.tokens, state.users.as_ref(), token).await?;
        Ok(CurrentUser(user))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
