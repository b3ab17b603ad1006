use std::path::PathBuf;

use {secrecy::Secret, tracing::info};

use rover_oauth::RefreshTokenSink;

use crate::loader::{load_config, save_config};

/// Writes a freshly bootstrapped refresh token back into the config file so
/// later starts skip the interactive exchange.
///
/// Bootstrap is a single-operator, single-session affair, so plain
/// read-modify-write of the file is sufficient.
#[derive(Debug, Clone)]
pub struct FileTokenSink {
    path: PathBuf,
}

impl FileTokenSink {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RefreshTokenSink for FileTokenSink {
    fn persist_refresh_token(
        &self,
        plugin_name: &str,
        refresh_token: &Secret<String>,
    ) -> anyhow::Result<()> {
        let mut config = load_config(&self.path)?;
        let section = config.plugins.get_mut(plugin_name).ok_or_else(|| {
            anyhow::anyhow!("no `[plugins.{plugin_name}]` section in {}", self.path.display())
        })?;
        section.refresh_token = Some(refresh_token.clone());
        save_config(&self.path, &config)?;
        info!(
            plugin = plugin_name,
            path = %self.path.display(),
            "refresh token persisted to config"
        );
        Ok(())
    }
}
