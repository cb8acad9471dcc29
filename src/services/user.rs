//! User service
//!
//! Implements business logic for accounts and authentication:
//! - Operator/fixture user creation (no public signup)
//! - Login/logout with server-side sessions
//! - Session validation with lazy expiry cleanup

use crate::db::repositories::{SessionRepository, UserRepository};
use crate::models::{Session, User};
use crate::services::password::{hash_password, verify_password};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Default session expiration time in days
const DEFAULT_SESSION_EXPIRATION_DAYS: i64 = 7;

/// Error types for user service operations
#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    /// Authentication failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// Validation error (invalid input)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// User already exists
    #[error("User already exists: {0}")]
    UserExists(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Login credentials
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// User service for managing accounts and authentication
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    session_expiration_days: i64,
}

impl UserService {
    /// Create a new user service with the given repositories
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiration_days: DEFAULT_SESSION_EXPIRATION_DAYS,
        }
    }

    /// Create a new user service with custom session expiration
    pub fn with_session_expiration(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        session_expiration_days: i64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            session_expiration_days,
        }
    }

    /// Create a user account
    ///
    /// # Errors
    ///
    /// - `ValidationError` if username or password is empty
    /// - `UserExists` if the username is already taken
    /// - `InternalError` for database errors
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<User, UserServiceError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(UserServiceError::ValidationError(
                "Password cannot be empty".to_string(),
            ));
        }

        if self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to check username")?
            .is_some()
        {
            return Err(UserServiceError::UserExists(format!(
                "Username '{}' is already taken",
                username
            )));
        }

        let password_hash = hash_password(password).context("Failed to hash password")?;
        let user = self
            .user_repo
            .create(&User::new(username.to_string(), password_hash))
            .await
            .context("Failed to create user")?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Log a user in, creating a server-side session
    ///
    /// # Errors
    ///
    /// - `AuthenticationError` on unknown username or wrong password
    /// - `InternalError` for database errors
    pub async fn login(&self, input: LoginInput) -> Result<Session, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to look up user")?
            .ok_or_else(|| {
                UserServiceError::AuthenticationError(
                    "Invalid username or password".to_string(),
                )
            })?;

        let password_valid = verify_password(&input.password, &user.password_hash)
            .context("Failed to verify password")?;

        if !password_valid {
            tracing::debug!(username = %input.username, "Login rejected: invalid password");
            return Err(UserServiceError::AuthenticationError(
                "Invalid username or password".to_string(),
            ));
        }

        let session = self.create_session(user.id).await?;
        Ok(session)
    }

    /// Logout (invalidate session)
    pub async fn logout(&self, session_id: &str) -> Result<(), UserServiceError> {
        self.session_repo
            .delete(session_id)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    /// Validate a session token and return the associated user
    ///
    /// Returns `None` if the session doesn't exist or is expired.
    /// Expired sessions are deleted on sight.
    pub async fn validate_session(&self, token: &str) -> Result<Option<User>, UserServiceError> {
        let session = match self
            .session_repo
            .get_by_id(token)
            .await
            .context("Failed to get session")?
        {
            Some(s) => s,
            None => return Ok(None),
        };

        if session.is_expired() {
            let _ = self.session_repo.delete(token).await;
            return Ok(None);
        }

        let user = self
            .user_repo
            .get_by_id(session.user_id)
            .await
            .context("Failed to get user")?;

        Ok(user)
    }

    /// Get user by username
    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to get user by username")?;

        Ok(user)
    }

    /// Delete all expired sessions
    pub async fn cleanup_expired_sessions(&self) -> Result<i64, UserServiceError> {
        let deleted = self
            .session_repo
            .delete_expired()
            .await
            .context("Failed to delete expired sessions")?;

        Ok(deleted)
    }

    async fn create_session(&self, user_id: i64) -> Result<Session, UserServiceError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            user_id,
            expires_at: now + Duration::days(self.session_expiration_days),
            created_at: now,
        };

        let session = self
            .session_repo
            .create(&session)
            .await
            .context("Failed to create session")?;

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxSessionRepository, SqlxUserRepository};
    use crate::db::{create_test_pool, migrations};

    async fn setup_service() -> UserService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        UserService::new(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool),
        )
    }

    #[tokio::test]
    async fn test_create_user_and_login() {
        let service = setup_service().await;

        let user = service
            .create_user("Автор", "secret123")
            .await
            .expect("Failed to create user");
        assert!(user.id > 0);

        let session = service
            .login(LoginInput::new("Автор", "secret123"))
            .await
            .expect("Login should succeed");
        assert_eq!(session.user_id, user.id);
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_create_user_rejects_empty_input() {
        let service = setup_service().await;

        assert!(matches!(
            service.create_user("", "secret").await,
            Err(UserServiceError::ValidationError(_))
        ));
        assert!(matches!(
            service.create_user("name", "").await,
            Err(UserServiceError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicates() {
        let service = setup_service().await;

        service
            .create_user("reader", "secret")
            .await
            .expect("First create should work");
        assert!(matches!(
            service.create_user("reader", "other").await,
            Err(UserServiceError::UserExists(_))
        ));
    }

    #[tokio::test]
    async fn test_login_with_wrong_credentials() {
        let service = setup_service().await;
        service
            .create_user("reader", "secret")
            .await
            .expect("create");

        assert!(matches!(
            service.login(LoginInput::new("reader", "wrong")).await,
            Err(UserServiceError::AuthenticationError(_))
        ));
        assert!(matches!(
            service.login(LoginInput::new("nobody", "secret")).await,
            Err(UserServiceError::AuthenticationError(_))
        ));
    }

    #[tokio::test]
    async fn test_validate_session() {
        let service = setup_service().await;
        let user = service
            .create_user("reader", "secret")
            .await
            .expect("create");

        let session = service
            .login(LoginInput::new("reader", "secret"))
            .await
            .expect("login");

        let validated = service
            .validate_session(&session.id)
            .await
            .expect("validate")
            .expect("session should resolve to a user");
        assert_eq!(validated.id, user.id);

        assert!(service
            .validate_session("no-such-token")
            .await
            .expect("validate")
            .is_none());
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let service = setup_service().await;
        service
            .create_user("reader", "secret")
            .await
            .expect("create");

        let session = service
            .login(LoginInput::new("reader", "secret"))
            .await
            .expect("login");

        service.logout(&session.id).await.expect("logout");

        assert!(service
            .validate_session(&session.id)
            .await
            .expect("validate")
            .is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_treated_as_anonymous() {
        let pool = create_test_pool().await.expect("pool");
        migrations::run_migrations(&pool).await.expect("migrations");
        // Sessions expire immediately with a non-positive lifetime.
        let service = UserService::with_session_expiration(
            SqlxUserRepository::boxed(pool.clone()),
            SqlxSessionRepository::boxed(pool),
            -1,
        );

        service
            .create_user("reader", "secret")
            .await
            .expect("create");
        let session = service
            .login(LoginInput::new("reader", "secret"))
            .await
            .expect("login");

        assert!(service
            .validate_session(&session.id)
            .await
            .expect("validate")
            .is_none());
    }
}
