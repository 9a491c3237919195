//! Persisted session: auth token + user record.
//!
//! The session lives in the injected key-value store under the `authToken`
//! and `user` keys. A session counts as authenticated only when both are
//! present and the user record parses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ampunv_core::{CityId, KeyValueStore, UserId};

use crate::role::Role;

const TOKEN_KEY: &str = "authToken";
const USER_KEY: &str = "user";

/// Opaque bearer token issued by the backend at login/register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The user record kept alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub id: UserId,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub city_id: Option<CityId>,
    /// The seed admin account, exempt from role changes and deletion.
    #[serde(default)]
    pub is_original_admin: bool,
}

impl StoredUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// A read-only snapshot of the session, used by the route gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    Anonymous,
    Authenticated { role: Role },
}

/// Persisted session holder over an injected store.
///
/// Cloning shares the underlying store; there is no cross-tab locking, so
/// concurrent writes from other holders are last-write-wins.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a fresh login/register result.
    pub fn save(&self, token: AuthToken, user: &StoredUser) {
        self.store.set(TOKEN_KEY, token.as_str());
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(USER_KEY, &json),
            Err(err) => tracing::error!(%err, "failed to serialize user record"),
        }
    }

    pub fn token(&self) -> Option<AuthToken> {
        self.store.get(TOKEN_KEY).map(AuthToken::new)
    }

    pub fn current_user(&self) -> Option<StoredUser> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(%err, "persisted user record unreadable; treating as logged out");
                None
            }
        }
    }

    /// Authenticated iff both the token and a readable user record exist.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some() && self.current_user().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(|u| u.role.is_admin())
    }

    /// True for sellers and admins (admin is a superset role).
    pub fn is_seller(&self) -> bool {
        self.current_user().is_some_and(|u| u.role.includes_seller())
    }

    pub fn view(&self) -> SessionView {
        match (self.token(), self.current_user()) {
            (Some(_), Some(user)) => SessionView::Authenticated { role: user.role },
            _ => SessionView::Anonymous,
        }
    }

    /// Drop the persisted identity: logout, or forced logout after a 401.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampunv_core::InMemoryStore;

    fn seller() -> StoredUser {
        StoredUser {
            id: UserId::new(3),
            firstname: "Ada".into(),
            lastname: "Martin".into(),
            email: "ada@example.com".into(),
            role: Role::Seller,
            city_id: Some(CityId::new(1)),
            is_original_admin: false,
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Arc::new(InMemoryStore::new()))
    }

    #[test]
    fn save_then_read_round_trips_identity() {
        let session = store();
        session.save(AuthToken::new("tok-1"), &seller());

        assert!(session.is_authenticated());
        assert_eq!(session.token().unwrap().as_str(), "tok-1");
        assert_eq!(session.current_user().unwrap().email, "ada@example.com");
    }

    #[test]
    fn token_without_user_record_is_not_authenticated() {
        let backing = Arc::new(InMemoryStore::new());
        backing.set(TOKEN_KEY, "orphan-token");
        let session = SessionStore::new(backing);

        assert!(!session.is_authenticated());
        assert_eq!(session.view(), SessionView::Anonymous);
    }

    #[test]
    fn corrupt_user_record_reads_as_logged_out() {
        let backing = Arc::new(InMemoryStore::new());
        backing.set(TOKEN_KEY, "tok");
        backing.set(USER_KEY, "{not json");
        let session = SessionStore::new(backing);

        assert!(session.current_user().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn clear_drops_both_keys() {
        let session = store();
        session.save(AuthToken::new("tok"), &seller());
        session.clear();

        assert!(session.token().is_none());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn admin_passes_the_seller_check() {
        let session = store();
        let mut user = seller();
        user.role = Role::Admin;
        session.save(AuthToken::new("tok"), &user);

        assert!(session.is_admin());
        assert!(session.is_seller());
    }
}
