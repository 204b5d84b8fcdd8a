//! セッションガード
//!
//! 単一のオペレーター認証情報の照合と、セッションごとのログイン状態を扱う。

use super::{CredentialVerifier, SessionRepository, SessionToken};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct SessionGuard {
    credentials: Arc<dyn CredentialVerifier>,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionGuard {
    pub fn new(
        credentials: Arc<dyn CredentialVerifier>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let accepted = self.credentials.verify(username, password);
        if !accepted {
            warn!(username = %username, "Rejected operator credentials");
        }
        accepted
    }

    /// ログイン済みの印を発行する
    pub fn login(&self) -> SessionToken {
        let token = self.sessions.create();
        info!("Operator logged in");
        token
    }

    pub fn is_authenticated(&self, token: Option<&str>) -> bool {
        token.is_some_and(|token| self.sessions.touch(token))
    }

    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
        info!("Operator logged out");
    }

    pub fn purge_expired(&self) -> usize {
        self.sessions.purge_expired()
    }
}
