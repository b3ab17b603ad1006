//! Config schema: one `[plugins.<name>]` section per plugin instance.

use std::collections::BTreeMap;

use {
    secrecy::Secret,
    serde::{Deserialize, Serialize},
};

use {
    rover_oauth::{Credential, serialize_option_secret},
    rover_plugins::PluginIdentity,
};

use crate::error::{Error, Result};

/// Root configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoverConfig {
    pub plugins: BTreeMap<String, PluginConfig>,
}

/// Static per-plugin section.
///
/// `app_key`, `app_secret` and `username` are required for login plugins and
/// ignored otherwise. `refresh_token` is written back here after a
/// successful interactive bootstrap.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Sent as client identification on every request.
    pub description: String,
    pub is_logged_in: bool,
    /// Skip events authored by the plugin's own account.
    pub self_ignore: bool,
    pub username: Option<String>,
    pub app_key: Option<String>,
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub app_secret: Option<Secret<String>>,
    #[serde(
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token: Option<Secret<String>>,
    /// Override for the access-token validity window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_validity_secs: Option<u64>,
}

impl std::fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginConfig")
            .field("description", &self.description)
            .field("is_logged_in", &self.is_logged_in)
            .field("self_ignore", &self.self_ignore)
            .field("username", &self.username)
            .field("app_key", &self.app_key)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[REDACTED]"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish_non_exhaustive()
    }
}

impl PluginConfig {
    /// Build the immutable identity for this section, checking required keys.
    pub fn identity(&self, name: &str) -> Result<PluginIdentity> {
        if self.description.is_empty() {
            return Err(Error::missing_key(name, "description"));
        }
        if self.is_logged_in && self.username.is_none() {
            return Err(Error::missing_key(name, "username"));
        }
        Ok(PluginIdentity {
            name: name.to_string(),
            description: self.description.clone(),
            is_logged_in: self.is_logged_in,
            self_ignore: self.self_ignore,
            username: self.username.clone(),
        })
    }

    /// Build the OAuth credential for this section.
    ///
    /// Returns `None` for non-login plugins; a login plugin missing its
    /// application key pair is a fatal configuration error.
    pub fn credential(&self, name: &str) -> Result<Option<Credential>> {
        if !self.is_logged_in {
            return Ok(None);
        }
        let app_key = self
            .app_key
            .clone()
            .ok_or_else(|| Error::missing_key(name, "app_key"))?;
        let app_secret = self
            .app_secret
            .clone()
            .ok_or_else(|| Error::missing_key(name, "app_secret"))?;

        let mut credential = Credential::new(app_key, app_secret, self.refresh_token.clone());
        if let Some(validity_secs) = self.token_validity_secs {
            credential.validity_secs = validity_secs;
        }
        Ok(Some(credential))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const EXAMPLE: &str = r#"
        [plugins.ExampleBot]
        description        = "ExampleBot v1 by example"
        is_logged_in       = true
        self_ignore        = true
        username           = "ExampleBot"
        app_key            = "key"
        app_secret         = "s3cret"
        refresh_token      = "refresh"
        token_validity_secs = 1800

        [plugins.ReadOnlyBot]
        description  = "read-only watcher"
        is_logged_in = false
    "#;

    #[test]
    fn parses_plugin_sections() {
        let config: RoverConfig = toml::from_str(EXAMPLE).unwrap();
        assert_eq!(config.plugins.len(), 2);

        let section = &config.plugins["ExampleBot"];
        let identity = section.identity("ExampleBot").unwrap();
        assert!(identity.is_logged_in);
        assert_eq!(identity.username.as_deref(), Some("ExampleBot"));

        let credential = section.credential("ExampleBot").unwrap().unwrap();
        assert_eq!(credential.app_key, "key");
        assert_eq!(credential.validity_secs, 1800);
        assert!(credential.refresh_token.is_some());
    }

    #[test]
    fn non_login_plugin_has_no_credential() {
        let config: RoverConfig = toml::from_str(EXAMPLE).unwrap();
        let section = &config.plugins["ReadOnlyBot"];
        assert!(section.credential("ReadOnlyBot").unwrap().is_none());
    }

    #[test]
    fn login_plugin_missing_secret_is_fatal() {
        let raw = r#"
            [plugins.Broken]
            description  = "broken"
            is_logged_in = true
            username     = "Broken"
            app_key      = "key"
        "#;
        let config: RoverConfig = toml::from_str(raw).unwrap();
        let err = config.plugins["Broken"].credential("Broken").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingKey { ref key, .. } if key == "app_secret"
        ));
    }

    #[test]
    fn login_plugin_missing_username_is_fatal() {
        let raw = r#"
            [plugins.Broken]
            description  = "broken"
            is_logged_in = true
        "#;
        let config: RoverConfig = toml::from_str(raw).unwrap();
        assert!(config.plugins["Broken"].identity("Broken").is_err());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config: RoverConfig = toml::from_str(EXAMPLE).unwrap();
        let rendered = format!("{:?}", config.plugins["ExampleBot"]);
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
