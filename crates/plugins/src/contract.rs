use {anyhow::Result, async_trait::async_trait};

use rover_platform::{ContentItem, InboundMessage};

use crate::{identity::PluginIdentity, update::UpdateRequest};

/// The capability set every plugin implements.
///
/// The content router and message dispatcher are written against this trait
/// only; concrete plugins are selected at startup by configuration. Stub
/// (no-op) implementations of individual handlers are valid.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Identity the framework routes and authorizes with.
    fn identity(&self) -> &PluginIdentity;

    /// Handle a self/text post with a non-empty body.
    async fn execute_submission(&self, post: &ContentItem) -> Result<()>;

    /// Handle a link post.
    async fn execute_link(&self, post: &ContentItem) -> Result<()>;

    /// Handle a self post whose body is empty.
    async fn execute_title_post(&self, post: &ContentItem) -> Result<()>;

    /// Handle a comment.
    async fn execute_comment(&self, comment: &ContentItem) -> Result<()>;

    /// Handle a private message that did not carry a ban directive.
    async fn on_new_message(&self, message: &InboundMessage) -> Result<()>;

    /// Revisit a previously posted item whose re-check timer fired.
    async fn update_procedure(&self, request: UpdateRequest) -> Result<()>;

    /// Whether users may opt themselves out via the ban command.
    fn user_banning_allowed(&self) -> bool {
        true
    }

    /// Whether communities may opt themselves out via the ban command.
    fn subreddit_banning_allowed(&self) -> bool {
        true
    }
}
