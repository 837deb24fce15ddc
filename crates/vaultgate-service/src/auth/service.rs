//! Authentication orchestration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use vaultgate_auth::{PasswordHasher, RefreshTokenManager, TokenIssuer, TokenValidator};
use vaultgate_core::traits::UserStore;
use vaultgate_entity::user::{NewUser, User, UserProfile, UserRole};

use super::error::AuthError;

/// The credential triple returned by register, login, and refresh.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    /// Signed session token.
    pub token: String,
    /// When the session token expires.
    pub token_expires_at: DateTime<Utc>,
    /// Opaque refresh token now stored on the user row.
    pub refresh_token: String,
    /// The authenticated user.
    pub user: User,
}

/// Orchestrates registration, login, refresh, and profile retrieval.
///
/// All collaborators are immutable after construction; the service is
/// cheap to clone and share across request handlers.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    issuer: Arc<TokenIssuer>,
    validator: Arc<TokenValidator>,
    refresh: Arc<RefreshTokenManager>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        issuer: Arc<TokenIssuer>,
        validator: Arc<TokenValidator>,
        refresh: Arc<RefreshTokenManager>,
    ) -> Self {
        Self {
            store,
            hasher,
            issuer,
            validator,
            refresh,
        }
    }

    /// Register a new account and open a session for it.
    ///
    /// Email collision is checked case-sensitively, matching the store's
    /// lookup semantics.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<SessionTokens, AuthError> {
        if self.store.find_by_email(email).await?.is_some() {
            debug!(email, "Registration rejected, email taken");
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .store
            .insert(&NewUser {
                email: email.to_string(),
                password_hash,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                role: UserRole::default(),
            })
            .await?;

        info!(user_id = user.id, "User registered");
        self.open_session(user).await
    }

    /// Authenticate with credentials and open a session.
    ///
    /// Unknown email and wrong password are distinct variants internally
    /// but must be rendered identically to the client.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionTokens, AuthError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            debug!(email, "Login rejected, unknown email");
            return Err(AuthError::UnknownEmail);
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = user.id, "Login rejected, wrong password");
            return Err(AuthError::WrongPassword);
        }

        info!(user_id = user.id, "User logged in");
        self.open_session(user).await
    }

    /// Exchange an access + refresh token pair for a fresh pair.
    ///
    /// The access token may be expired; every other check still applies.
    /// Persisting the new refresh token is a compare-and-swap against the
    /// presented one, so of two concurrent refreshes with the same pair
    /// exactly one wins and the other must re-authenticate.
    pub async fn refresh(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<SessionTokens, AuthError> {
        let user_id = self
            .validator
            .validate_ignoring_expiry(access_token)
            .map_err(AuthError::TokenRejected)?;

        let Some(user) = self.store.find_by_id(user_id).await? else {
            warn!(user_id, "Refresh rejected, subject no longer exists");
            return Err(AuthError::UnknownSubject);
        };

        if !self.refresh.verify(&user, refresh_token) {
            warn!(user_id, "Refresh rejected, token mismatch or expired");
            return Err(AuthError::RefreshRejected);
        }

        let (new_refresh, refresh_expires_at) = self.refresh.rotate();
        let swapped = self
            .store
            .swap_refresh_token(user.id, refresh_token, &new_refresh, refresh_expires_at)
            .await?;
        if !swapped {
            warn!(user_id, "Refresh lost rotation race");
            return Err(AuthError::RotationConflict);
        }

        let (token, token_expires_at) = self.issuer.issue(&user)?;
        debug!(user_id, "Session refreshed");

        let mut user = user;
        user.refresh_token = Some(new_refresh.clone());
        user.refresh_token_expires_at = Some(refresh_expires_at);

        Ok(SessionTokens {
            token,
            token_expires_at,
            refresh_token: new_refresh,
            user,
        })
    }

    /// Resolve a fully validated session token to the user's profile.
    pub async fn profile(&self, access_token: &str) -> Result<UserProfile, AuthError> {
        let user_id = self
            .validator
            .validate(access_token)
            .map_err(AuthError::TokenRejected)?;

        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        Ok(user.profile())
    }

    /// Resolve a fully validated session token to the user record.
    pub async fn authenticate(&self, access_token: &str) -> Result<User, AuthError> {
        let user_id = self
            .validator
            .validate(access_token)
            .map_err(AuthError::TokenRejected)?;

        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownSubject)
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AuthError> {
        let users = self.store.find_all().await?;
        Ok(users.iter().map(User::profile).collect())
    }

    /// Look up a single user by id.
    pub async fn find_user(&self, id: i64) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.store.find_by_id(id).await?.map(|u| u.profile()))
    }

    /// Issue a session token and seed the refresh slot unconditionally.
    ///
    /// Used after credential proof (register, login), where overwriting
    /// any previously stored refresh token is the intended behavior.
    async fn open_session(&self, user: User) -> Result<SessionTokens, AuthError> {
        let (token, token_expires_at) = self.issuer.issue(&user)?;
        let (refresh_token, refresh_expires_at) = self.refresh.rotate();

        self.store
            .update_refresh_token(user.id, Some(&refresh_token), Some(refresh_expires_at))
            .await?;

        let mut user = user;
        user.refresh_token = Some(refresh_token.clone());
        user.refresh_token_expires_at = Some(refresh_expires_at);

        Ok(SessionTokens {
            token,
            token_expires_at,
            refresh_token,
            user,
        })
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}
