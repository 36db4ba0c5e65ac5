//! Resume operations, always scoped to the calling user.
//!
//! A resume that does not exist and a resume owned by someone else both yield
//! `AppError::NotFound` with the same message.

pub mod handlers;

use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDraft};
use crate::models::user::User;
use crate::store::ResumeStore;

/// Appended to the stored content by `improve`.
pub const IMPROVED_MARKER: &str = "\n[Improved]";

fn not_found() -> AppError {
    AppError::NotFound("Resume not found".to_string())
}

pub async fn create(
    store: &dyn ResumeStore,
    owner: &User,
    draft: &ResumeDraft,
) -> Result<Resume, AppError> {
    let resume = store.create(owner.id, draft).await?;
    info!(
        "Resume created with title: {} for user: {}",
        resume.title, owner.email
    );
    Ok(resume)
}

pub async fn list(store: &dyn ResumeStore, owner: &User) -> Result<Vec<Resume>, AppError> {
    store.list(owner.id).await
}

pub async fn get(store: &dyn ResumeStore, owner: &User, id: i64) -> Result<Resume, AppError> {
    store.get(id, owner.id).await?.ok_or_else(not_found)
}

pub async fn update(
    store: &dyn ResumeStore,
    owner: &User,
    id: i64,
    draft: &ResumeDraft,
) -> Result<Resume, AppError> {
    let resume = store
        .update(id, owner.id, draft)
        .await?
        .ok_or_else(not_found)?;
    info!("Resume {id} successfully changed");
    Ok(resume)
}

pub async fn delete(store: &dyn ResumeStore, owner: &User, id: i64) -> Result<(), AppError> {
    if !store.delete(id, owner.id).await? {
        return Err(not_found());
    }
    info!("Resume {id} successfully deleted");
    Ok(())
}

/// Placeholder transform: returns the stored content with `IMPROVED_MARKER`
/// appended. The stored resume is left as is.
pub async fn improve(store: &dyn ResumeStore, owner: &User, id: i64) -> Result<String, AppError> {
    let resume = get(store, owner, id).await?;
    info!("Resume {id} successfully improved");
    Ok(improve_content(&resume.content))
}

pub fn improve_content(content: &str) -> String {
    format!("{content}{IMPROVED_MARKER}")
}
