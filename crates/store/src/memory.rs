//! In-memory store for testing.

use std::{
    collections::HashSet,
    sync::Mutex,
};

use {anyhow::Result, async_trait::async_trait};

use crate::Store;

/// One scheduled re-check request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    pub item_id: String,
    pub plugin_name: String,
    pub expires_at: u64,
}

/// In-memory store backed by `HashSet`s. No persistence, for tests only.
#[derive(Default)]
pub struct MemoryStore {
    user_bans: Mutex<HashSet<(String, String)>>,
    community_bans: Mutex<HashSet<(String, String)>>,
    processed: Mutex<HashSet<(String, String)>>,
    updates: Mutex<Vec<UpdateRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user_bans(&self) -> Vec<(String, String)> {
        let bans = self.user_bans.lock().unwrap_or_else(|e| e.into_inner());
        bans.iter().cloned().collect()
    }

    #[must_use]
    pub fn community_bans(&self) -> Vec<(String, String)> {
        let bans = self
            .community_bans
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        bans.iter().cloned().collect()
    }

    #[must_use]
    pub fn updates(&self) -> Vec<UpdateRecord> {
        let updates = self.updates.lock().unwrap_or_else(|e| e.into_inner());
        updates.clone()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn add_user_ban(&self, username: &str, plugin_name: &str) -> Result<()> {
        let mut bans = self.user_bans.lock().unwrap_or_else(|e| e.into_inner());
        bans.insert((username.to_string(), plugin_name.to_string()));
        Ok(())
    }

    async fn add_community_ban(&self, community: &str, plugin_name: &str) -> Result<()> {
        let mut bans = self
            .community_bans
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        bans.insert((community.to_string(), plugin_name.to_string()));
        Ok(())
    }

    async fn has_already_processed(&self, thread_id: &str, plugin_name: &str) -> Result<bool> {
        let processed = self.processed.lock().unwrap_or_else(|e| e.into_inner());
        Ok(processed.contains(&(thread_id.to_string(), plugin_name.to_string())))
    }

    async fn mark_processed(&self, thread_id: &str, plugin_name: &str) -> Result<()> {
        let mut processed = self.processed.lock().unwrap_or_else(|e| e.into_inner());
        processed.insert((thread_id.to_string(), plugin_name.to_string()));
        Ok(())
    }

    async fn record_for_update(
        &self,
        item_id: &str,
        plugin_name: &str,
        expires_at: u64,
    ) -> Result<()> {
        let mut updates = self.updates.lock().unwrap_or_else(|e| e.into_inner());
        updates.push(UpdateRecord {
            item_id: item_id.to_string(),
            plugin_name: plugin_name.to_string(),
            expires_at,
        });
        Ok(())
    }
}
