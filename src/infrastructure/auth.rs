pub mod static_credentials;

pub use static_credentials::{CredentialError, StaticCredentials};
