use serde::{Deserialize, Serialize};

/// Immutable per-plugin identity, created once from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginIdentity {
    /// Plugin name; also the key ban records are written under.
    pub name: String,
    /// Human-readable description, sent as client identification on every
    /// request.
    pub description: String,
    /// Whether the plugin maintains an authenticated session.
    pub is_logged_in: bool,
    /// Whether events authored by the plugin's own account are skipped.
    pub self_ignore: bool,
    /// Account username; required for logged-in plugins.
    pub username: Option<String>,
}

impl PluginIdentity {
    /// True when `author` is the plugin's own account (case-insensitive).
    #[must_use]
    pub fn is_own_account(&self, author: &str) -> bool {
        self.username
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(author))
    }
}
