//! Credential lifecycle: keeps a valid access token bound to the live
//! session and recovers from one class of hard failure by rebuilding the
//! session from scratch.

use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use {
    secrecy::Secret,
    tracing::{debug, info, warn},
};

use {
    rover_common::RetryPolicy,
    rover_platform::{Error as PlatformError, PlatformClient, SessionFactory},
    rover_plugins::PluginIdentity,
};

use crate::{
    error::{Context as _, Error, Result},
    scopes::OAUTH_SCOPES,
    types::Credential,
};

/// Where a plugin session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    /// Session absent by design: the plugin does not log in.
    Anonymous,
    /// Waiting for an operator to complete the authorization-code exchange.
    Bootstrapping,
    Authenticated {
        /// Unix timestamp the held access token stops being used.
        valid_until: u64,
    },
    /// A hard refresh failure occurred; the session is being rebuilt.
    Reauthenticating,
    /// Authentication could not be re-established. Terminal for the current
    /// operation only; a later `refresh` may leave this state again.
    Failed,
}

/// Outcome of [`CredentialManager::initialize`].
#[derive(Debug)]
pub enum Bootstrap {
    /// The session is ready (authenticated, or anonymous by design).
    Ready,
    /// No refresh token is on file. The host must send an operator to
    /// `authorize_url` out-of-band and pass the resulting code to
    /// [`CredentialManager::resume_bootstrap`].
    AwaitingAuthorization { authorize_url: String },
}

/// Persists a freshly bootstrapped refresh token back to configuration.
pub trait RefreshTokenSink: Send + Sync {
    fn persist_refresh_token(
        &self,
        plugin_name: &str,
        refresh_token: &Secret<String>,
    ) -> anyhow::Result<()>;
}

/// Owns the credential and the live session handle for one plugin instance.
///
/// Driven by exactly one poll loop, so it takes `&mut self` everywhere and
/// needs no internal locking.
pub struct CredentialManager {
    identity: PluginIdentity,
    credential: Option<Credential>,
    session: Option<Arc<dyn PlatformClient>>,
    factory: Arc<dyn SessionFactory>,
    sink: Option<Arc<dyn RefreshTokenSink>>,
    retry: RetryPolicy,
    state: SessionState,
}

impl CredentialManager {
    #[must_use]
    pub fn new(
        identity: PluginIdentity,
        credential: Option<Credential>,
        factory: Arc<dyn SessionFactory>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            identity,
            credential,
            session: None,
            factory,
            sink: None,
            retry,
            state: SessionState::Uninitialized,
        }
    }

    /// Attach a sink that receives the refresh token after bootstrap.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn RefreshTokenSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    /// The live session handle. Precondition error when none exists.
    pub fn session(&self) -> Result<Arc<dyn PlatformClient>> {
        self.session
            .clone()
            .ok_or_else(|| Error::precondition("no live session for this plugin"))
    }

    /// Construct the session for a login-required plugin, entering the
    /// bootstrap state when no refresh token exists in configuration. For a
    /// non-login plugin this only marks the session absent by design.
    pub async fn initialize(&mut self) -> Result<Bootstrap> {
        if !self.identity.is_logged_in {
            debug!(plugin = %self.identity.name, "plugin runs anonymously, no session built");
            self.state = SessionState::Anonymous;
            return Ok(Bootstrap::Ready);
        }
        if self.credential.is_none() {
            return Err(Error::precondition(
                "login-required plugin constructed without a credential",
            ));
        }

        self.connect().await?;

        let has_refresh_token = self
            .credential
            .as_ref()
            .is_some_and(|c| c.refresh_token.is_some());
        if !has_refresh_token {
            let session = self.session()?;
            let authorize_url = session.build_authorize_url(OAUTH_SCOPES, &self.identity.name)?;
            self.state = SessionState::Bootstrapping;
            info!(
                plugin = %self.identity.name,
                "no refresh token on file, operator must authorize out-of-band"
            );
            return Ok(Bootstrap::AwaitingAuthorization { authorize_url });
        }

        self.refresh(true).await?;
        Ok(Bootstrap::Ready)
    }

    /// Complete bootstrap with the authorization code the operator brought
    /// back: exchange it, persist the refresh token, then force a refresh.
    pub async fn resume_bootstrap(&mut self, code: &str) -> Result<()> {
        if self.state != SessionState::Bootstrapping {
            return Err(Error::precondition(
                "resume_bootstrap called outside the bootstrap state",
            ));
        }
        let session = self.session()?;
        let grant = session.exchange_auth_code(code).await?;

        if let Some(sink) = &self.sink {
            sink.persist_refresh_token(&self.identity.name, &grant.refresh_token)
                .context("persisting refresh token")?;
        }
        if let Some(credential) = self.credential.as_mut() {
            credential.refresh_token = Some(grant.refresh_token);
        }
        info!(plugin = %self.identity.name, "authorization code exchanged, refresh token stored");

        self.refresh(true).await
    }

    /// Guarantee a currently-valid access token.
    ///
    /// Refreshes when forced, when no token is held, or when the validity
    /// window has passed; otherwise idempotent and free. Transient failures
    /// are retried with the configured budget. A missing session or refresh
    /// token is a precondition violation, not a runtime condition.
    pub async fn ensure_valid(&mut self, force: bool) -> Result<()> {
        let session = self
            .session
            .clone()
            .ok_or_else(|| Error::precondition("cannot refresh, session is missing"))?;
        let (refresh_token, expired, validity_secs) = {
            let credential = self
                .credential
                .as_ref()
                .ok_or_else(|| Error::precondition("cannot refresh, credential is missing"))?;
            let refresh_token = credential
                .refresh_token
                .clone()
                .ok_or_else(|| Error::precondition("cannot refresh, no refresh token held"))?;
            (
                refresh_token,
                credential.is_expired(unix_now()),
                credential.validity_secs,
            )
        };

        if !force && !expired {
            return Ok(());
        }

        let refreshed = self
            .retry
            .run(
                "refresh access token",
                || session.refresh_access_token(&refresh_token),
                PlatformError::is_transient,
            )
            .await?;
        session.bind_access_token(&refreshed.access_token).await?;

        let valid_until = unix_now() + validity_secs;
        if let Some(credential) = self.credential.as_mut() {
            credential.access_token = Some(refreshed.access_token);
            credential.expires_at = Some(valid_until);
        }
        self.state = SessionState::Authenticated { valid_until };
        debug!(plugin = %self.identity.name, valid_until, "access token refreshed");
        Ok(())
    }

    /// Caller-facing refresh with one-shot recovery: when `ensure_valid`
    /// fails even after its internal retries, rebuild the session from
    /// scratch and try once more with `force`. A second failure surfaces as
    /// a hard authentication failure, never looped.
    pub async fn refresh(&mut self, force: bool) -> Result<()> {
        let first = match self.ensure_valid(force).await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };
        if !first.warrants_session_rebuild() {
            return Err(first);
        }

        warn!(
            plugin = %self.identity.name,
            error = %first,
            "token refresh failed, rebuilding session from scratch"
        );
        self.state = SessionState::Reauthenticating;

        if let Err(e) = self.connect().await {
            self.state = SessionState::Failed;
            return Err(Error::authentication_failed(e));
        }
        match self.ensure_valid(true).await {
            Ok(()) => Ok(()),
            Err(second) => {
                self.state = SessionState::Failed;
                Err(Error::authentication_failed(second))
            },
        }
    }

    async fn connect(&mut self) -> Result<()> {
        let credential = self
            .credential
            .as_ref()
            .ok_or_else(|| Error::precondition("cannot connect without a credential"))?;
        let session = self
            .factory
            .connect(
                &self.identity.description,
                &credential.app_key,
                &credential.app_secret,
            )
            .await?;
        self.session = Some(session);
        Ok(())
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
