use std::sync::Arc;

use {async_trait::async_trait, secrecy::Secret};

use crate::{
    error::Result,
    types::{ContentItem, InboundMessage, TokenGrant, TokenRefresh},
};

/// The platform network client. One live session per plugin instance.
///
/// Implementations own transport, rate limiting and wall-clock timeouts;
/// the framework only layers attempt-count-bounded retries on top. Each
/// method may fail with a transient (retryable) or authorization
/// (non-retryable) error, see [`crate::Error`].
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Authorization URL an operator must visit during interactive bootstrap.
    fn build_authorize_url(&self, scopes: &[&str], state: &str) -> Result<String>;

    /// One-time exchange of an authorization code for an initial token pair.
    async fn exchange_auth_code(&self, code: &str) -> Result<TokenGrant>;

    /// Mint a new access token from a long-lived refresh token.
    async fn refresh_access_token(&self, refresh_token: &Secret<String>) -> Result<TokenRefresh>;

    /// Attach an access token to this session for subsequent calls.
    async fn bind_access_token(&self, access_token: &Secret<String>) -> Result<()>;

    /// Current list of unread private messages.
    async fn fetch_unread(&self) -> Result<Vec<InboundMessage>>;

    /// Mark a message consumed so it is not fetched again.
    async fn mark_read(&self, message: &InboundMessage) -> Result<()>;

    /// Reply to a private message.
    async fn reply(&self, message: &InboundMessage, text: &str) -> Result<()>;

    /// Fetch a generic content item (post or comment) by id.
    async fn fetch_content(&self, id: &str) -> Result<ContentItem>;
}

/// Builds fresh [`PlatformClient`] sessions.
///
/// The credential manager recreates the session wholesale after a hard
/// refresh failure instead of attempting partial repair.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Open a new session identified by `user_agent` and bound to the
    /// application key/secret pair.
    async fn connect(
        &self,
        user_agent: &str,
        app_key: &str,
        app_secret: &Secret<String>,
    ) -> Result<Arc<dyn PlatformClient>>;
}
