//! Axum route handlers for registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::auth::account::{login, register};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    register(state.users.as_ref(), &state.hasher, &req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let access_token = login(
        state.users.as_ref(),
        &state.hasher,
        &state.tokens,
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
