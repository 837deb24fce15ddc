//! User record store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vaultgate_entity::user::{NewUser, User};

use crate::result::AppResult;

/// Persistent store for user records.
///
/// Implemented by the PostgreSQL repository for production and by an
/// in-memory store for tests. The service layer only ever talks to
/// this trait.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find a user by exact email match. Lookup is case-sensitive.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users ordered by id.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Insert a new user and return the stored record.
    ///
    /// Fails with a conflict error if the email is already taken.
    async fn insert(&self, user: &NewUser) -> AppResult<User>;

    /// Unconditionally overwrite the user's refresh token slot.
    ///
    /// Used on login and registration, where the caller has just proven
    /// their identity with credentials.
    async fn update_refresh_token(
        &self,
        id: i64,
        token: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    /// Atomically swap the refresh token slot if it still holds `previous`.
    ///
    /// Returns `true` if the swap was applied, `false` if another rotation
    /// got there first. This is the compare-and-swap that makes token
    /// rotation single-use under concurrency.
    async fn swap_refresh_token(
        &self,
        id: i64,
        previous: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<bool>;
}
