use std::sync::Arc;

use tracing::error;

use rover_store::Store;

/// Arguments handed to [`crate::Plugin::update_procedure`] when a scheduled
/// re-check fires. All instants are unix seconds; `interval` is a duration
/// in seconds.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub id: String,
    pub created: u64,
    pub lifetime: u64,
    pub last_updated: u64,
    pub interval: u64,
}

/// Records "revisit this item at time T" requests on behalf of a plugin.
///
/// A plugin without a store attached can still run; scheduling requests are
/// then dropped with an error log.
pub struct UpdateScheduler {
    plugin_name: String,
    store: Option<Arc<dyn Store>>,
}

impl UpdateScheduler {
    #[must_use]
    pub fn new(plugin_name: impl Into<String>, store: Option<Arc<dyn Store>>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            store,
        }
    }

    /// Schedule `item_id` for re-examination once `expires_at` (unix seconds)
    /// has passed.
    pub async fn to_update(&self, item_id: &str, expires_at: u64) {
        let Some(store) = &self.store else {
            error!(
                plugin = %self.plugin_name,
                item_id,
                "no store attached, dropping re-check request"
            );
            return;
        };
        if let Err(e) = store
            .record_for_update(item_id, &self.plugin_name, expires_at)
            .await
        {
            error!(
                plugin = %self.plugin_name,
                item_id,
                error = %e,
                "failed to record re-check request"
            );
        }
    }
}
