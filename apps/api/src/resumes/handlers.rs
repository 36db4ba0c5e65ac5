//! Axum route handlers for the Resume API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::resume::{Resume, ResumeDraft};
use crate::resumes;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ImproveResponse {
    pub improved_content: String,
}

/// POST /resumes
pub async fn handle_create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(draft): AppJson<ResumeDraft>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let resume = resumes::create(state.resumes.as_ref(), &user, &draft).await?;
    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /resumes
pub async fn handle_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(resumes::list(state.resumes.as_ref(), &user).await?))
}

/// GET /resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(resumes::get(state.resumes.as_ref(), &user, id).await?))
}

/// PUT /resumes/:id
pub async fn handle_update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(draft): AppJson<ResumeDraft>,
) -> Result<Json<Resume>, AppError> {
    Ok(Json(
        resumes::update(state.resumes.as_ref(), &user, id, &draft).await?,
    ))
}

/// DELETE /resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    resumes::delete(state.resumes.as_ref(), &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /resumes/:id/improve
pub async fn handle_improve(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ImproveResponse>, AppError> {
    let improved_content = resumes::improve(state.resumes.as_ref(), &user, id).await?;
    Ok(Json(ImproveResponse { improved_content }))
}
