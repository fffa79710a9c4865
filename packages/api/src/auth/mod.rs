//! # Identity service — accounts and the current session
//!
//! [`AuthService`] owns the `user` table and the well-known session slot.
//! Signup and login both scan the table up to a fixed fetch limit; the
//! session is a [`SessionUser`] mirrored into the `currentUser` slot and
//! exists exactly while that slot does.
//!
//! Session states are Absent and Active: signup/login move Absent →
//! Active, logout moves Active → Absent. There is no expiry and no
//! refresh.

mod password;

pub use password::{hash_password, verify_password};

use chrono::Utc;
use thiserror::Error;

use store::{ObjectStore, Storage, StoreError};

use crate::models::{SessionUser, User};

/// Well-known slot mirroring the current session view.
pub const SESSION_SLOT: &str = "currentUser";

/// Table holding user records.
const USER_TABLE: &str = "user";

/// Upper bound on how many user records the duplicate and credential
/// scans read. Email uniqueness is only as strong as this bound.
const USER_SCAN_LIMIT: usize = 100;

/// Errors surfaced by the identity service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signup with an email that already has an account.
    #[error("an account with this email already exists")]
    DuplicateAccount,
    /// Login with an unknown email or a wrong password; the two cases
    /// deliberately read the same.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("could not hash password: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Signup, login, logout, and session lookup over the `user` table.
pub struct AuthService<S: Storage> {
    store: ObjectStore<S>,
}

impl<S: Storage> AuthService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            store: ObjectStore::new(storage),
        }
    }

    /// The object store this service writes through, for callers that
    /// share its backend (journal tables live beside the `user` table).
    pub fn store(&self) -> &ObjectStore<S> {
        &self.store
    }

    /// Users currently on record, skipping records that do not parse.
    async fn scan_users(&self) -> Result<Vec<User>, AuthError> {
        let records = self
            .store
            .list_objects(USER_TABLE, USER_SCAN_LIMIT, true)
            .await?;
        let users: Vec<User> = records.iter().filter_map(User::from_record).collect();
        if users.len() != records.len() {
            tracing::warn!(
                skipped = records.len() - users.len(),
                "user table contains records that do not parse as users"
            );
        }
        Ok(users)
    }

    async fn establish_session(&self, user: &User) -> Result<SessionUser, AuthError> {
        let session = user.to_session();
        let contents = serde_json::to_string(&session)
            .map_err(|err| StoreError::unavailable(SESSION_SLOT, err))?;
        self.store.storage().write(SESSION_SLOT, &contents).await?;
        Ok(session)
    }

    /// Create an account and establish a session for it.
    ///
    /// The email must not already be on record; the match is an exact,
    /// case-sensitive string comparison.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, AuthError> {
        let users = self.scan_users().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::DuplicateAccount);
        }

        let password_hash = hash_password(password).map_err(AuthError::PasswordHash)?;
        let created_at = Utc::now();
        let record = self
            .store
            .create_object(
                USER_TABLE,
                User::object_data(name, email, &password_hash, created_at),
            )
            .await?;

        let user = User {
            id: record.object_id,
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            created_at,
        };
        tracing::debug!(user = %user.id, "account created");
        self.establish_session(&user).await
    }

    /// Verify credentials and establish a session.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUser, AuthError> {
        let users = self.scan_users().await?;
        let user = users
            .iter()
            .filter(|u| u.email == email)
            // An unreadable stored hash counts as a mismatch.
            .find(|u| verify_password(password, &u.password_hash).unwrap_or(false))
            .ok_or(AuthError::InvalidCredentials)?;

        tracing::debug!(user = %user.id, "login succeeded");
        self.establish_session(user).await
    }

    /// Clear the session slot. Calling with no active session is a no-op.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.store.storage().remove(SESSION_SLOT).await?;
        tracing::debug!("session cleared");
        Ok(())
    }

    /// The current session view, or `None` when no session is active.
    ///
    /// Never fails: an absent slot, malformed stored data, and an
    /// unreadable backend all read as "no session".
    pub async fn current_user(&self) -> Option<SessionUser> {
        let raw = match self.store.storage().read(SESSION_SLOT).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(%err, "session slot unreadable, treating as no session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(%err, "stored session is malformed, treating as no session");
                None
            }
        }
    }
}
