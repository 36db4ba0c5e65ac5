use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer};
use crate::store::{MemoryStore, ResumeStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub resumes: Arc<dyn ResumeStore>,
    /// Signing secret and algorithm are fixed here for the life of the process.
    pub tokens: TokenIssuer,
    pub hasher: PasswordHasher,
}

impl AppState {
    /// State backed by a fresh `MemoryStore` for both tables.
    pub fn in_memory(tokens: TokenIssuer, hasher: PasswordHasher) -> Self {
        let store = Arc::new(MemoryStore::new());
        AppState {
            users: store.clone(),
            resumes: store,
            tokens,
            hasher,
        }
    }
}
