use crate::application::GatewayError;
use crate::domain::session::{SessionGuard, SessionToken};

/// 認証情報を照合し、成功したら新しいセッションを発行する
#[derive(Clone)]
pub struct AuthenticateOperatorUseCase {
    guard: SessionGuard,
}

impl AuthenticateOperatorUseCase {
    pub fn new(guard: SessionGuard) -> Self {
        Self { guard }
    }

    pub fn execute(&self, username: &str, password: &str) -> Result<SessionToken, GatewayError> {
        if !self.guard.authenticate(username, password) {
            return Err(GatewayError::Unauthorized);
        }
        Ok(self.guard.login())
    }
}
