//! Single source of truth for "who is currently using the application".
//!
//! Authentication is simulated: there is no account registry and no
//! credential verification.  `login` accepts any well-formed attempt as a
//! fresh identity after a fixed latency; `register` accepts anything.
//! The current user is persisted so a reload resumes the session.

use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;

use critiq_shared::constants::{AUTH_LATENCY_MS, USER_KEY};
use critiq_shared::ids::{avatar_url, new_id};
use critiq_shared::models::User;

use crate::error::Result;
use crate::snapshot::SnapshotStore;

/// The current-session user record and authenticated flag, backed by the
/// snapshot store.
pub struct IdentityStore {
    storage: SnapshotStore,
    current: Option<User>,
}

impl IdentityStore {
    /// Load any previously persisted user record.  A present record
    /// becomes the current user; this is the sole mechanism for resuming
    /// a session.  A corrupt record propagates the parse error.
    pub fn open(storage: SnapshotStore) -> Result<Self> {
        let current: Option<User> = storage.load(USER_KEY)?;
        if let Some(user) = &current {
            tracing::info!(user = %user.username, "resumed session");
        }
        Ok(Self { storage, current })
    }

    /// Simulated login.
    ///
    /// Resolves `Ok(false)` only when either field is the empty string;
    /// any other input is accepted as a fresh identity whose display name
    /// is the local part of the email.  The call suspends for a fixed
    /// latency and never rejects for business reasons.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
        sleep(Duration::from_millis(AUTH_LATENCY_MS)).await;

        if email.is_empty() || password.is_empty() {
            return Ok(false);
        }

        let username = email.split('@').next().unwrap_or("").to_string();
        let user = User {
            id: new_id(),
            username,
            email: email.to_string(),
            avatar: avatar_url(email),
            join_date: Utc::now(),
        };

        tracing::info!(user = %user.username, "logged in");
        self.set_user(user)?;
        Ok(true)
    }

    /// Simulated registration.  Always succeeds; uniqueness and field
    /// validation are UI-layer concerns outside this store.
    pub async fn register(&mut self, username: &str, email: &str, _password: &str) -> Result<bool> {
        sleep(Duration::from_millis(AUTH_LATENCY_MS)).await;

        let user = User {
            id: new_id(),
            username: username.to_string(),
            email: email.to_string(),
            avatar: avatar_url(username),
            join_date: Utc::now(),
        };

        tracing::info!(user = %user.username, "registered");
        self.set_user(user)?;
        Ok(true)
    }

    /// Clear the current user and erase the persisted record.
    ///
    /// Returning to the landing view afterwards is the UI shell's side
    /// effect, not the store's.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = self.current.take() {
            tracing::info!(user = %user.username, "logged out");
        }
        self.storage.remove(USER_KEY)
    }

    /// Overwrite the current user's display name (and re-derive the
    /// avatar), persisting the record.  `Ok(false)` when signed out.
    ///
    /// Author snapshots already embedded in reviews and comments are
    /// deliberately left untouched.
    pub fn update_profile(&mut self, username: &str) -> Result<bool> {
        let Some(user) = self.current.as_mut() else {
            return Ok(false);
        };
        user.username = username.to_string();
        user.avatar = avatar_url(username);

        let user = user.clone();
        self.storage.save(USER_KEY, &user)?;
        tracing::info!(user = %user.username, "profile updated");
        Ok(true)
    }

    /// The current user, if a session is active.
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn set_user(&mut self, user: User) -> Result<()> {
        self.storage.save(USER_KEY, &user)?;
        self.current = Some(user);
        Ok(())
    }
}
