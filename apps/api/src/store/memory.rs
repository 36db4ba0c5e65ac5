use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDraft};
use crate::models::user::User;
use crate::store::{ResumeStore, UserStore};

/// Process-local store for development (`STORAGE_BACKEND=memory`) and tests.
///
/// A single lock covers both tables, so each check-then-mutate runs atomically.
/// Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    resumes: BTreeMap<i64, Resume>,
    next_user_id: i64,
    next_resume_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        let mut tables = self.inner.lock().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(AppError::EmailTaken);
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn create(&self, owner_id: i64, draft: &ResumeDraft) -> Result<Resume, AppError> {
        let mut tables = self.inner.lock().await;
        tables.next_resume_id += 1;
        let resume = Resume {
            id: tables.next_resume_id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            owner_id,
        };
        tables.resumes.insert(resume.id, resume.clone());
        Ok(resume)
    }

    async fn list(&self, owner_id: i64) -> Result<Vec<Resume>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .resumes
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64, owner_id: i64) -> Result<Option<Resume>, AppError> {
        let tables = self.inner.lock().await;
        Ok(tables
            .resumes
            .get(&id)
            .filter(|r| r.owner_id == owner_id)
            .cloned())
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        draft: &ResumeDraft,
    ) -> Result<Option<Resume>, AppError> {
        let mut tables = self.inner.lock().await;
        let Some(resume) = tables
            .resumes
            .get_mut(&id)
            .filter(|r| r.owner_id == owner_id)
        else {
            return Ok(None);
        };
        resume.title = draft.title.clone();
        resume.content = draft.content.clone();
        Ok(Some(resume.clone()))
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let mut tables = self.inner.lock().await;
        let owned = tables
            .resumes
            .get(&id)
            .is_some_and(|r| r.owner_id == owner_id);
        if owned {
            tables.resumes.remove(&id);
        }
        Ok(owned)
    }
}
