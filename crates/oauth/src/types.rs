use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Default access-token validity window in seconds. Platform tokens live for
/// 60 minutes; renewing after 59 keeps an error margin.
pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 3540;

/// OAuth credential state for one plugin session.
///
/// Owned exclusively by [`crate::CredentialManager`] and mutated only by a
/// successful refresh. Invariant: whenever `access_token` is set,
/// `expires_at` is set to issue time plus `validity_secs`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    pub app_key: String,
    #[serde(serialize_with = "serialize_secret")]
    pub app_secret: Secret<String>,
    #[serde(
        default,
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<Secret<String>>,
    #[serde(
        default,
        serialize_with = "serialize_option_secret",
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token: Option<Secret<String>>,
    /// Unix timestamp when the held access token stops being used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
    #[serde(default = "default_validity_secs")]
    pub validity_secs: u64,
}

fn default_validity_secs() -> u64 {
    DEFAULT_TOKEN_VALIDITY_SECS
}

impl Credential {
    #[must_use]
    pub fn new(
        app_key: impl Into<String>,
        app_secret: Secret<String>,
        refresh_token: Option<Secret<String>>,
    ) -> Self {
        Self {
            app_key: app_key.into(),
            app_secret,
            access_token: None,
            refresh_token,
            expires_at: None,
            validity_secs: DEFAULT_TOKEN_VALIDITY_SECS,
        }
    }

    /// No usable access token is held at instant `now` (unix seconds).
    #[must_use]
    pub fn is_expired(&self, now: u64) -> bool {
        match (self.access_token.as_ref(), self.expires_at) {
            (Some(_), Some(expires_at)) => now >= expires_at,
            _ => true,
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("app_key", &self.app_key)
            .field("app_secret", &"[REDACTED]")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_at", &self.expires_at)
            .field("validity_secs", &self.validity_secs)
            .finish()
    }
}

// ── Serde helpers for Secret<String> ────────────────────────────────────────

/// Serialize a `Secret<String>` by exposing its inner value.
/// Use only for fields that must round-trip through storage (config files).
pub fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Serialize an `Option<Secret<String>>` by exposing its inner value.
pub fn serialize_option_secret<S: serde::Serializer>(
    secret: &Option<Secret<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(s) => serializer.serialize_some(s.expose_secret()),
        None => serializer.serialize_none(),
    }
}
