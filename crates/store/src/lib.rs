//! Persistent store boundary: opt-out records, processed-thread markers and
//! "re-check this item at time T" requests.
//!
//! The framework only ever writes ban records; it never reads them back, so
//! a redundant re-insert is acceptable and deduplication belongs to the
//! backend.

pub mod memory;

use {anyhow::Result, async_trait::async_trait};

pub use memory::MemoryStore;

/// Storage operations the framework and its plugins depend on.
#[async_trait]
pub trait Store: Send + Sync {
    /// Record a user opt-out for one plugin. Idempotent from the caller's
    /// perspective.
    async fn add_user_ban(&self, username: &str, plugin_name: &str) -> Result<()>;

    /// Record a community opt-out for one plugin.
    async fn add_community_ban(&self, community: &str, plugin_name: &str) -> Result<()>;

    /// Whether a plugin already acted in the given thread.
    async fn has_already_processed(&self, thread_id: &str, plugin_name: &str) -> Result<bool>;

    /// Remember that a plugin acted in a thread.
    async fn mark_processed(&self, thread_id: &str, plugin_name: &str) -> Result<()>;

    /// Schedule a posted item for re-examination once `expires_at` (unix
    /// seconds) has passed.
    async fn record_for_update(&self, item_id: &str, plugin_name: &str, expires_at: u64)
    -> Result<()>;
}
