//! One poll cycle over the unread inbox.

use {
    anyhow::Result,
    tracing::{debug, error, warn},
};

use {
    rover_common::RetryPolicy,
    rover_platform::{Error as PlatformError, PlatformClient},
    rover_plugins::Plugin,
    rover_store::Store,
};

use crate::ban::{BanCommandProcessor, BanOutcome};

/// Drains the unread inbox once: mark each message consumed, try the ban
/// protocol, and hand everything else to the plugin's message handler.
///
/// Delivery is at-most-once: a message is marked read before dispatch, so a
/// crashed dispatch loses the message rather than replaying it.
pub struct MessageDispatcher {
    ban: BanCommandProcessor,
    retry: RetryPolicy,
}

impl MessageDispatcher {
    #[must_use]
    pub fn new(plugin_name: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            ban: BanCommandProcessor::new(plugin_name),
            retry,
        }
    }

    /// Run one poll cycle. Fetch or mark-read failures end the cycle early
    /// with a warning; they never abort the host process.
    pub async fn poll_once(
        &self,
        session: &dyn PlatformClient,
        plugin: &dyn Plugin,
        store: &dyn Store,
    ) -> Result<()> {
        let messages = match self
            .retry
            .run(
                "fetch unread messages",
                || session.fetch_unread(),
                PlatformError::is_transient,
            )
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                warn!(error = %e, "fetching unread messages failed, ending poll cycle");
                return Ok(());
            },
        };
        debug!(count = messages.len(), "fetched unread messages");

        for message in &messages {
            // Mark consumed before dispatch so a failing handler cannot wedge
            // the inbox on the same message forever.
            if let Err(e) = session.mark_read(message).await {
                warn!(
                    message_id = %message.id,
                    error = %e,
                    "marking message read failed, ending poll cycle early"
                );
                return Ok(());
            }

            match self.ban.process(plugin, session, store, message).await {
                Ok(BanOutcome::Ignored) => {
                    if let Err(e) = plugin.on_new_message(message).await {
                        error!(
                            message_id = %message.id,
                            error = %e,
                            "message handler failed"
                        );
                    }
                },
                Ok(_) => {},
                Err(e) => {
                    error!(
                        message_id = %message.id,
                        error = %e,
                        "ban processing failed"
                    );
                },
            }
        }

        Ok(())
    }
}
