//! The in-band opt-out protocol: parse a ban directive out of a private
//! message, authorize it against the sender, and record the opt-out.

use std::sync::LazyLock;

use {
    anyhow::Result,
    regex::Regex,
    tracing::{debug, info, warn},
};

use {
    rover_platform::{InboundMessage, PlatformClient},
    rover_plugins::Plugin,
    rover_store::Store,
};

/// `ban /r/<community>` or `ban /u/<user>`, case-insensitive, first match
/// anywhere in the body.
const BAN_PATTERN: &str = r"(?i)ban /([ru])/([A-Za-z0-9_]+)";

static BAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(BAN_PATTERN).expect("ban pattern is a valid regex")
});

/// What ban processing did with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanOutcome {
    /// No directive present, or it failed authorization. Always silent.
    Ignored,
    UserBanned { username: String },
    CommunityBanned { community: String },
}

/// Parses and authorizes self-service opt-outs for one plugin.
pub struct BanCommandProcessor {
    plugin_name: String,
}

impl BanCommandProcessor {
    #[must_use]
    pub fn new(plugin_name: impl Into<String>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
        }
    }

    /// Examine one message for a ban directive.
    ///
    /// The acting principal is the human author when present, otherwise the
    /// originating community. A directive is honored only when all of these
    /// hold:
    /// - the message is a top-level private message, not a comment reply;
    /// - the principal's own identifier appears in the body (cheap
    ///   substring pre-filter before the regex);
    /// - the directive type matches the principal: `/r/` for communities,
    ///   `/u/` for humans (a user cannot ban "as" a community or vice versa);
    /// - the named subject equals the principal (case-insensitive): strictly
    ///   a self-opt-out, never a tool for banning others;
    /// - the matching toggle on the plugin allows that opt-out type.
    ///
    /// Every other combination is a silent no-op; the sender never gets an
    /// error response.
    pub async fn process(
        &self,
        plugin: &dyn Plugin,
        session: &dyn PlatformClient,
        store: &dyn Store,
        message: &InboundMessage,
    ) -> Result<BanOutcome> {
        let (principal, human) = match (&message.author, &message.community) {
            (Some(author), _) => (author.to_lowercase(), true),
            (None, Some(community)) => (community.to_lowercase(), false),
            (None, None) => return Ok(BanOutcome::Ignored),
        };

        if message.was_comment {
            if BAN_RE.is_match(&message.body) {
                // Unclear whether community notices can ever arrive as
                // comment replies; keep the top-level-only gate and trace it.
                debug!(
                    plugin = %self.plugin_name,
                    message_id = %message.id,
                    "ban directive inside a comment reply, ignoring"
                );
            }
            return Ok(BanOutcome::Ignored);
        }
        if !message.body.to_lowercase().contains(&principal) {
            return Ok(BanOutcome::Ignored);
        }

        let Some(caps) = BAN_RE.captures(&message.body) else {
            return Ok(BanOutcome::Ignored);
        };
        let kind = caps[1].to_lowercase();
        let subject = caps[2].to_lowercase();

        // A user may only ban as /u/, a community only as /r/.
        let type_consistent = (kind == "r" && !human) || (kind == "u" && human);
        if !type_consistent || subject != principal {
            return Ok(BanOutcome::Ignored);
        }

        if human && plugin.user_banning_allowed() {
            let Some(username) = message.author.clone() else {
                return Ok(BanOutcome::Ignored);
            };
            store.add_user_ban(&username, &self.plugin_name).await?;
            let text = format!(
                "Successfully banned /u/{username} from {}. \
                 The bot should ignore you from now on.\n\nHave a nice day!",
                self.plugin_name
            );
            self.acknowledge(session, message, &text).await;
            info!(
                plugin = %self.plugin_name,
                username = %username,
                "banned user on message request"
            );
            return Ok(BanOutcome::UserBanned { username });
        }
        if !human && plugin.subreddit_banning_allowed() {
            let Some(community) = message.community.clone() else {
                return Ok(BanOutcome::Ignored);
            };
            store
                .add_community_ban(&community, &self.plugin_name)
                .await?;
            let text = format!(
                "Successfully banned /r/{community} from {}. \
                 The bot should ignore this subreddit from now on.\n\nHave a nice day!",
                self.plugin_name
            );
            self.acknowledge(session, message, &text).await;
            info!(
                plugin = %self.plugin_name,
                community = %community,
                "banned subreddit on message request"
            );
            return Ok(BanOutcome::CommunityBanned { community });
        }

        Ok(BanOutcome::Ignored)
    }

    /// The opt-out's effect, not its acknowledgment, is authoritative: a
    /// failed confirmation reply is logged and never rolls the record back.
    async fn acknowledge(
        &self,
        session: &dyn PlatformClient,
        message: &InboundMessage,
        text: &str,
    ) {
        if let Err(e) = session.reply(message, text).await {
            warn!(
                plugin = %self.plugin_name,
                message_id = %message.id,
                error = %e,
                "ban recorded but confirmation reply failed"
            );
        }
    }
}
