use crate::domain::session::{Session, SessionRepository, SessionToken};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// プロセス内メモリにセッションを保持するストア
///
/// 有効期限はアクセスのたびに延長される。再起動するとすべてのセッションは失われる。
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionToken, Session>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(8 * 60 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl SessionRepository for InMemorySessionStore {
    fn create(&self) -> SessionToken {
        let token = SessionToken::generate();
        let session = Session::new(token.clone(), self.ttl, Instant::now());
        self.sessions.lock().insert(token.clone(), session);
        token
    }

    fn touch(&self, token: &str) -> bool {
        let now = Instant::now();
        let key = SessionToken::from_string(token);
        let mut sessions = self.sessions.lock();

        let Some(session) = sessions.get_mut(&key) else {
            return false;
        };
        if !session.is_expired(now) {
            session.touch(self.ttl, now);
            return true;
        }

        sessions.remove(&key);
        debug!("Session expired");
        false
    }

    fn revoke(&self, token: &str) {
        self.sessions
            .lock()
            .remove(&SessionToken::from_string(token));
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }
}
