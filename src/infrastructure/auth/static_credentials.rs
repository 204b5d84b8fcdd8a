//! 単一オペレーターの静的な認証情報
//!
//! パスワードは平文、またはソルト付き SHA-256 (`sha256$<salt>$<hex digest>`) で設定できる。

use crate::domain::session::CredentialVerifier;
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

const HASH_SCHEME: &str = "sha256";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Unsupported password hash scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Malformed password hash, expected sha256$<salt>$<hex digest>")]
    MalformedHash,
}

#[derive(Debug, Clone)]
enum Secret {
    Plain(String),
    Salted { salt: String, digest: Vec<u8> },
}

#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    secret: Secret,
}

impl StaticCredentials {
    pub fn plaintext(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: Secret::Plain(password.into()),
        }
    }

    pub fn hashed(username: impl Into<String>, encoded: &str) -> Result<Self, CredentialError> {
        let mut parts = encoded.trim().split('$');
        let (Some(scheme), Some(salt), Some(digest), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CredentialError::MalformedHash);
        };

        if scheme != HASH_SCHEME {
            return Err(CredentialError::UnsupportedScheme(scheme.to_string()));
        }
        let digest = hex::decode(digest).map_err(|_| CredentialError::MalformedHash)?;
        if digest.len() != 32 {
            return Err(CredentialError::MalformedHash);
        }

        Ok(Self {
            username: username.into(),
            secret: Secret::Salted {
                salt: salt.to_string(),
                digest,
            },
        })
    }

    /// 新しいソルトでパスワードをハッシュ化し、設定用の文字列を返す
    pub fn hash_password(password: &str) -> String {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = salted_digest(&salt, password);
        format!("{HASH_SCHEME}${salt}${}", hex::encode(digest))
    }

    pub fn is_plaintext(&self) -> bool {
        matches!(self.secret, Secret::Plain(_))
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let password_ok = match &self.secret {
            Secret::Plain(expected) => constant_time_eq(expected.as_bytes(), password.as_bytes()),
            Secret::Salted { salt, digest } => {
                constant_time_eq(digest, &salted_digest(salt, password))
            }
        };
        username_ok & password_ok
    }
}

fn salted_digest(salt: &str, password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
