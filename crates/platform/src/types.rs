use {
    secrecy::Secret,
    serde::{Deserialize, Serialize},
};

/// An unread private message pulled from the platform inbox.
///
/// Automated community notices arrive with no human author; the community
/// itself then acts as the sender. Ephemeral: fetched, processed and marked
/// consumed, never persisted by this framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub id: String,
    /// Human sender, absent for community-authored notices.
    pub author: Option<String>,
    /// Community acting as sender when no human author is present.
    pub community: Option<String>,
    pub body: String,
    /// True when this message is a reply to a comment rather than a
    /// top-level private message.
    pub was_comment: bool,
    /// Thread/submission the message is a reply in, when available.
    pub thread_id: Option<String>,
}

/// A post or comment as returned by the platform fetch collaborator.
///
/// Classification (self-text vs. title-only vs. link vs. comment) is derived
/// from `is_self_post`, `is_comment` and `body`, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    /// Absent when the author account was removed or deleted.
    pub author: Option<String>,
    /// Community the item was posted in.
    pub community: String,
    pub title: Option<String>,
    /// Text body; `None` or empty for title-only and link posts.
    pub body: Option<String>,
    pub is_self_post: bool,
    pub is_comment: bool,
}

/// Token pair returned by the one-time authorization-code exchange.
pub struct TokenGrant {
    pub access_token: Secret<String>,
    pub refresh_token: Secret<String>,
}

/// Fresh access token minted from a refresh token.
pub struct TokenRefresh {
    pub access_token: Secret<String>,
    /// Lifetime hint from the platform, in seconds. The credential manager
    /// applies its own (shorter) validity window regardless.
    pub expires_in: Option<u64>,
}
