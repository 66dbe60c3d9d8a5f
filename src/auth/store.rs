//! In-memory user registry.
//!
//! Accounts live for the process lifetime only; persistent user storage is deliberately
//! out of scope for this service.

use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Salt rounds applied to stored passwords.
const BCRYPT_COST: u32 = 10;

/// Errors raised by registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account with the requested email already exists.
    #[error("User already exists")]
    EmailTaken,
    /// Unknown email or wrong password; callers must not distinguish the two.
    #[error("Email or password is incorrect")]
    InvalidCredentials,
    /// Password hashing or verification failed.
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Stable identifier assigned at registration.
    pub id: String,
    /// Display name supplied at registration.
    pub name: String,
    /// Email used as the login key.
    pub email: String,
    password_hash: String,
}

/// Process-lifetime registry of accounts keyed by email.
#[derive(Default)]
pub struct UserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl UserStore {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account, hashing the password before storing it.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(AuthError::EmailTaken);
        }
        let password_hash = bcrypt::hash(password, BCRYPT_COST)?;
        users.insert(
            email.to_string(),
            UserRecord {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            },
        );
        tracing::info!(email, "Registered new account");
        Ok(())
    }

    /// Check credentials, returning the matching account on success.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        let users = self.users.read().await;
        let Some(user) = users.get(email) else {
            return Err(AuthError::InvalidCredentials);
        };
        if bcrypt::verify(password, &user.password_hash)? {
            Ok(user.clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_authenticate() {
        let store = UserStore::new();
        store
            .register("Alice Example", "alice@example.org", "hunter2")
            .await
            .expect("register");

        let user = store
            .authenticate("alice@example.org", "hunter2")
            .await
            .expect("authenticate");
        assert_eq!(user.name, "Alice Example");
        assert_eq!(user.email, "alice@example.org");
        assert!(!user.id.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = UserStore::new();
        store
            .register("Alice", "alice@example.org", "hunter2")
            .await
            .expect("register");
        let error = store
            .register("Other Alice", "alice@example.org", "different")
            .await
            .expect_err("duplicate rejected");
        assert!(matches!(error, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let store = UserStore::new();
        store
            .register("Alice", "alice@example.org", "hunter2")
            .await
            .expect("register");

        let wrong_password = store
            .authenticate("alice@example.org", "wrong")
            .await
            .expect_err("rejected");
        let unknown_email = store
            .authenticate("bob@example.org", "hunter2")
            .await
            .expect_err("rejected");

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }
}
