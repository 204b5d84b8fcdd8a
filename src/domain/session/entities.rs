use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// ブラウザのクッキーに載せる不透明なセッショントークン
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ログイン済みオペレーターのセッション
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub expires_at: Instant,
}

impl Session {
    pub fn new(token: SessionToken, ttl: Duration, now: Instant) -> Self {
        Self {
            token,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// 有効期限を延長（スライディング方式）
    pub fn touch(&mut self, ttl: Duration, now: Instant) {
        self.expires_at = now + ttl;
    }
}
