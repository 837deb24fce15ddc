//! In-memory user store for tests and single-process experiments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use vaultgate_core::error::AppError;
use vaultgate_core::result::AppResult;
use vaultgate_core::traits::UserStore;
use vaultgate_entity::user::{NewUser, User};

/// Internal state for the memory-based user store.
#[derive(Debug, Default)]
struct InnerState {
    users: HashMap<i64, User>,
    next_id: i64,
}

/// In-memory user store using a Tokio RwLock for thread safety.
///
/// Mirrors the semantics of the PostgreSQL store, including the
/// compare-and-swap refresh rotation, so service and HTTP tests can run
/// without a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryUserStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let state = self.state.read().await;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn insert(&self, user: &NewUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AppError::conflict("Email already in use".to_string()));
        }
        state.next_id += 1;
        let id = state.next_id;
        let now = Utc::now();
        let stored = User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            refresh_token: None,
            refresh_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_refresh_token(
        &self,
        id: i64,
        token: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.refresh_token = token.map(str::to_string);
        user.refresh_token_expires_at = expires_at;
        user.updated_at = Utc::now();
        Ok(())
    }

    // Check-and-update under a single write lock, matching the NULL-safe
    // conditional UPDATE the PostgreSQL store issues.
    async fn swap_refresh_token(
        &self,
        id: i64,
        previous: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let Some(user) = state.users.get_mut(&id) else {
            return Ok(false);
        };
        if user.refresh_token.as_deref() != Some(previous) {
            return Ok(false);
        }
        user.refresh_token = Some(token.to_string());
        user.refresh_token_expires_at = Some(expires_at);
        user.updated_at = Utc::now();
        Ok(true)
    }
}
