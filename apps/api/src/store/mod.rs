//! Persistence boundary for users and resumes.
//!
//! Every resume method takes the caller's `owner_id` and filters on it together
//! with the resume id, so a row owned by someone else behaves exactly like a
//! missing row. `update` and `delete` check ownership and mutate in one step.
//!
//! `AppState` holds these as `Arc<dyn UserStore>` / `Arc<dyn ResumeStore>`,
//! chosen at startup via `STORAGE_BACKEND`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDraft};
use crate::models::user::User;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Inserts a new user. Returns `AppError::EmailTaken` if the email exists.
    async fn insert(&self, email: &str, hashed_password: &str) -> Result<User, AppError>;
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, owner_id: i64, draft: &ResumeDraft) -> Result<Resume, AppError>;

    /// All resumes of `owner_id`, in insertion order.
    async fn list(&self, owner_id: i64) -> Result<Vec<Resume>, AppError>;

    async fn get(&self, id: i64, owner_id: i64) -> Result<Option<Resume>, AppError>;

    /// Overwrites title and content. `None` when no row matches both ids.
    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        draft: &ResumeDraft,
    ) -> Result<Option<Resume>, AppError>;

    /// Returns `false` when no row matches both ids.
    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError>;
}
