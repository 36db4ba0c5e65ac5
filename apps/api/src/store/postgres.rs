use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDraft};
use crate::models::user::User;
use crate::store::{ResumeStore, UserStore};

/// PostgreSQL-backed store. Tables are created by `db::ensure_schema`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(sqlx::query_as::<_, User>(
            "SELECT id, email, hashed_password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            RETURNING id, email, hashed_password
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // Two concurrent registrations can both pass the pre-check.
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::EmailTaken,
            other => AppError::Database(other),
        })
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn create(&self, owner_id: i64, draft: &ResumeDraft) -> Result<Resume, AppError> {
        Ok(sqlx::query_as::<_, Resume>(
            r#"
            INSERT INTO resumes (title, content, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, owner_id
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list(&self, owner_id: i64) -> Result<Vec<Resume>, AppError> {
        Ok(sqlx::query_as::<_, Resume>(
            "SELECT id, title, content, owner_id FROM resumes WHERE owner_id = $1 ORDER BY id ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get(&self, id: i64, owner_id: i64) -> Result<Option<Resume>, AppError> {
        Ok(sqlx::query_as::<_, Resume>(
            "SELECT id, title, content, owner_id FROM resumes WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update(
        &self,
        id: i64,
        owner_id: i64,
        draft: &ResumeDraft,
    ) -> Result<Option<Resume>, AppError> {
        Ok(sqlx::query_as::<_, Resume>(
            r#"
            UPDATE resumes
            SET title = $1, content = $2
            WHERE id = $3 AND owner_id = $4
            RETURNING id, title, content, owner_id
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.content)
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
