//! Host-facing surface: one runner per plugin instance, driven by exactly
//! one poll loop.

use std::sync::Arc;

use {anyhow::Result, tracing::debug};

use {
    rover_common::RetryPolicy,
    rover_oauth::{Bootstrap, CredentialManager},
    rover_platform::ContentItem,
    rover_plugins::Plugin,
    rover_store::Store,
};

use crate::{dispatcher::MessageDispatcher, router};

/// Wires a plugin, its credential manager and the store together and exposes
/// the two entry points the host polling loop drives.
pub struct PluginRunner {
    credentials: CredentialManager,
    plugin: Arc<dyn Plugin>,
    store: Arc<dyn Store>,
    dispatcher: MessageDispatcher,
}

impl PluginRunner {
    #[must_use]
    pub fn new(
        credentials: CredentialManager,
        plugin: Arc<dyn Plugin>,
        store: Arc<dyn Store>,
        retry: RetryPolicy,
    ) -> Self {
        let dispatcher = MessageDispatcher::new(plugin.identity().name.clone(), retry);
        Self {
            credentials,
            plugin,
            store,
            dispatcher,
        }
    }

    /// Bring the plugin session up. May return an authorization request the
    /// host must relay to an operator, see [`PluginRunner::resume_bootstrap`].
    pub async fn initialize(&mut self) -> Result<Bootstrap> {
        Ok(self.credentials.initialize().await?)
    }

    /// Complete an interactive bootstrap with the operator-supplied code.
    pub async fn resume_bootstrap(&mut self, code: &str) -> Result<()> {
        Ok(self.credentials.resume_bootstrap(code).await?)
    }

    /// One message poll cycle: revalidate credentials, then drain the inbox.
    pub async fn poll_once(&mut self) -> Result<()> {
        if !self.plugin.identity().is_logged_in {
            debug!(
                plugin = %self.plugin.identity().name,
                "anonymous plugin, skipping message poll"
            );
            return Ok(());
        }
        self.credentials.refresh(false).await?;
        let session = self.credentials.session()?;
        self.dispatcher
            .poll_once(session.as_ref(), self.plugin.as_ref(), self.store.as_ref())
            .await
    }

    /// Route one content item to the plugin's handlers.
    pub async fn dispatch_content(&mut self, item: &ContentItem) -> Result<()> {
        if self.plugin.identity().is_logged_in {
            self.credentials.refresh(false).await?;
        }
        router::dispatch(self.plugin.as_ref(), item).await
    }
}
