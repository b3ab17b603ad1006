pub mod error;
pub mod manager;
pub mod scopes;
pub mod types;

pub use {
    error::{Error, Result},
    manager::{Bootstrap, CredentialManager, RefreshTokenSink, SessionState},
    types::{Credential, DEFAULT_TOKEN_VALIDITY_SECS, serialize_option_secret, serialize_secret},
};
