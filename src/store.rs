//! In-memory session store.
//!
//! This module is the storage layer of the service. All comparison state
//! lives in one shared map from hashed session token to [`Session`],
//! guarded by an async RwLock. The store handle is cheap to clone and is
//! shared with every handler via Axum state, the same way a connection
//! pool would be.
//!
//! # Token Scheme
//!
//! Clients hold an opaque random token; the map is keyed by the token's
//! SHA-256 hash. A leaked memory dump therefore never reveals usable
//! tokens, and lookups are a single hash plus map access.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::session::Session;

/// Hash a session token for storage or lookup.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Shared handle to the in-memory session map.
///
/// Cloning is cheap (an `Arc` clone); every clone sees the same sessions.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions live `ttl_minutes` minutes.
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Create a new session and return it along with its plaintext token.
    ///
    /// The token is 32 random bytes, hex encoded. Only its hash is kept;
    /// this is the caller's one chance to see the plaintext.
    ///
    /// Expired sessions are swept here, so the map cannot grow without
    /// bound as long as new sessions keep being created.
    pub async fn create(&self) -> (String, Session) {
        let mut token_bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut token_bytes);
        let token = hex::encode(token_bytes);

        let session = Session::new(self.ttl);

        let mut sessions = self.sessions.write().await;

        // Opportunistic sweep of expired sessions
        let now = Utc::now();
        sessions.retain(|_, existing| !existing.is_expired(now));

        sessions.insert(hash_token(&token), session.clone());

        (token, session)
    }

    /// Look up a live session by hashed token.
    ///
    /// Returns a clone of the session, or `None` if the hash is unknown
    /// or the session has expired.
    pub async fn find(&self, token_hash: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token_hash)
            .filter(|session| !session.is_expired(Utc::now()))
            .cloned()
    }

    /// Run a read-only closure against a live session.
    ///
    /// # Errors
    ///
    /// `AppError::InvalidSessionToken` if the session is gone or expired.
    pub async fn with_session<T>(
        &self,
        token_hash: &str,
        f: impl FnOnce(&Session) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(token_hash)
            .filter(|session| !session.is_expired(Utc::now()))
            .ok_or(AppError::InvalidSessionToken)?;
        f(session)
    }

    /// Run a mutating closure against a live session.
    ///
    /// The write lock is held for the duration of the closure, so
    /// concurrent requests against the same session serialize here.
    ///
    /// # Errors
    ///
    /// `AppError::InvalidSessionToken` if the session is gone or expired;
    /// otherwise whatever the closure returns.
    pub async fn with_session_mut<T>(
        &self,
        token_hash: &str,
        f: impl FnOnce(&mut Session) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(token_hash)
            .filter(|session| !session.is_expired(Utc::now()))
            .ok_or(AppError::InvalidSessionToken)?;
        f(session)
    }

    /// Number of currently live sessions.
    pub async fn active_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        let now = Utc::now();
        sessions
            .values()
            .filter(|session| !session.is_expired(now))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_sessions_are_findable_by_token_hash() {
        let store = SessionStore::new(60);
        let (token, session) = store.create().await;

        let found = store.find(&hash_token(&token)).await.unwrap();
        assert_eq!(found.id, session.id);

        // The raw token is not a valid key; only its hash is.
        assert!(store.find(&token).await.is_none());
    }

    #[tokio::test]
    async fn expired_sessions_are_invisible() {
        let store = SessionStore::new(0);
        let (token, _) = store.create().await;

        assert!(store.find(&hash_token(&token)).await.is_none());
        assert_eq!(store.active_count().await, 0);

        let result = store
            .with_session(&hash_token(&token), |_| Ok(()))
            .await;
        assert!(matches!(result, Err(AppError::InvalidSessionToken)));
    }

    #[tokio::test]
    async fn create_sweeps_expired_sessions() {
        let store = SessionStore::new(0);
        store.create().await;
        store.create().await;

        // Both sessions expired instantly; the second create swept the
        // first, and the map never holds more than the newest entry.
        let sessions = store.sessions.read().await;
        assert!(sessions.len() <= 1);
    }

    #[tokio::test]
    async fn mutations_are_visible_to_later_reads() {
        let store = SessionStore::new(60);
        let (token, _) = store.create().await;
        let key = hash_token(&token);

        store
            .with_session_mut(&key, |session| {
                session.compare_lump_sum_dca = true;
                Ok(())
            })
            .await
            .unwrap();

        let session = store.find(&key).await.unwrap();
        assert!(session.compare_lump_sum_dca);
    }

    #[test]
    fn token_hashing_is_stable_sha256() {
        // Fixed vector so any accidental algorithm change shows up.
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
