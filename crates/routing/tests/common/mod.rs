#![allow(dead_code, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use {async_trait::async_trait, secrecy::Secret};

use {
    rover_platform::{
        ContentItem, Error as PlatformError, InboundMessage, PlatformClient,
        Result as PlatformResult, SessionFactory, TokenGrant, TokenRefresh,
    },
    rover_plugins::{Plugin, PluginIdentity, UpdateRequest},
};

/// Shared ordered log so tests can assert the relative order of session and
/// plugin activity.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn record(events: &EventLog, entry: impl Into<String>) {
    events.lock().unwrap().push(entry.into());
}

pub fn entries(events: &EventLog) -> Vec<String> {
    events.lock().unwrap().clone()
}

// ── Session fake ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeSession {
    pub events: EventLog,
    pub unread: Mutex<Vec<InboundMessage>>,
    /// Message id whose mark-read call fails with a transient error.
    pub fail_mark_read_for: Option<String>,
    /// Fail every fetch with a transient error.
    pub fail_fetch: bool,
    /// Fail every reply with a transient error.
    pub fail_reply: bool,
    pub replies: Mutex<Vec<(String, String)>>,
}

impl FakeSession {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    pub fn with_unread(self, messages: Vec<InboundMessage>) -> Self {
        *self.unread.lock().unwrap() = messages;
        self
    }

    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformClient for FakeSession {
    fn build_authorize_url(&self, _scopes: &[&str], state: &str) -> PlatformResult<String> {
        Ok(format!("https://platform.example/authorize?state={state}"))
    }

    async fn exchange_auth_code(&self, code: &str) -> PlatformResult<TokenGrant> {
        Ok(TokenGrant {
            access_token: Secret::new(format!("access-for-{code}")),
            refresh_token: Secret::new(format!("refresh-for-{code}")),
        })
    }

    async fn refresh_access_token(
        &self,
        _refresh_token: &Secret<String>,
    ) -> PlatformResult<TokenRefresh> {
        record(&self.events, "refresh");
        Ok(TokenRefresh {
            access_token: Secret::new("access".into()),
            expires_in: Some(3600),
        })
    }

    async fn bind_access_token(&self, _access_token: &Secret<String>) -> PlatformResult<()> {
        Ok(())
    }

    async fn fetch_unread(&self) -> PlatformResult<Vec<InboundMessage>> {
        if self.fail_fetch {
            return Err(PlatformError::transient("inbox unavailable"));
        }
        Ok(self.unread.lock().unwrap().clone())
    }

    async fn mark_read(&self, message: &InboundMessage) -> PlatformResult<()> {
        if self.fail_mark_read_for.as_deref() == Some(message.id.as_str()) {
            return Err(PlatformError::transient("mark-read rejected"));
        }
        record(&self.events, format!("mark_read:{}", message.id));
        Ok(())
    }

    async fn reply(&self, message: &InboundMessage, text: &str) -> PlatformResult<()> {
        if self.fail_reply {
            return Err(PlatformError::transient("reply rejected"));
        }
        record(&self.events, format!("reply:{}", message.id));
        self.replies
            .lock()
            .unwrap()
            .push((message.id.clone(), text.to_string()));
        Ok(())
    }

    async fn fetch_content(&self, _id: &str) -> PlatformResult<ContentItem> {
        Err(PlatformError::message("not scripted"))
    }
}

pub struct FakeFactory {
    pub session: Arc<FakeSession>,
}

#[async_trait]
impl SessionFactory for FakeFactory {
    async fn connect(
        &self,
        _user_agent: &str,
        _app_key: &str,
        _app_secret: &Secret<String>,
    ) -> PlatformResult<Arc<dyn PlatformClient>> {
        Ok(self.session.clone())
    }
}

// ── Plugin fake ─────────────────────────────────────────────────────────────

pub struct RecordingPlugin {
    pub identity: PluginIdentity,
    pub events: EventLog,
    pub allow_user_bans: bool,
    pub allow_community_bans: bool,
    /// Message id whose handler invocation fails.
    pub fail_message_id: Option<String>,
}

impl RecordingPlugin {
    pub fn new(events: EventLog) -> Self {
        Self {
            identity: test_identity(),
            events,
            allow_user_bans: true,
            allow_community_bans: true,
            fail_message_id: None,
        }
    }
}

#[async_trait]
impl Plugin for RecordingPlugin {
    fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    async fn execute_submission(&self, post: &ContentItem) -> anyhow::Result<()> {
        record(&self.events, format!("submission:{}", post.id));
        Ok(())
    }

    async fn execute_link(&self, post: &ContentItem) -> anyhow::Result<()> {
        record(&self.events, format!("link:{}", post.id));
        Ok(())
    }

    async fn execute_title_post(&self, post: &ContentItem) -> anyhow::Result<()> {
        record(&self.events, format!("title:{}", post.id));
        Ok(())
    }

    async fn execute_comment(&self, comment: &ContentItem) -> anyhow::Result<()> {
        record(&self.events, format!("comment:{}", comment.id));
        Ok(())
    }

    async fn on_new_message(&self, message: &InboundMessage) -> anyhow::Result<()> {
        if self.fail_message_id.as_deref() == Some(message.id.as_str()) {
            anyhow::bail!("handler blew up");
        }
        record(&self.events, format!("message:{}", message.id));
        Ok(())
    }

    async fn update_procedure(&self, request: UpdateRequest) -> anyhow::Result<()> {
        record(&self.events, format!("update:{}", request.id));
        Ok(())
    }

    fn user_banning_allowed(&self) -> bool {
        self.allow_user_bans
    }

    fn subreddit_banning_allowed(&self) -> bool {
        self.allow_community_bans
    }
}

// ── Builders ────────────────────────────────────────────────────────────────

pub fn test_identity() -> PluginIdentity {
    PluginIdentity {
        name: "ExampleBot".into(),
        description: "ExampleBot integration test".into(),
        is_logged_in: true,
        self_ignore: true,
        username: Some("ExampleBot".into()),
    }
}

pub fn message(
    id: &str,
    author: Option<&str>,
    community: Option<&str>,
    body: &str,
    was_comment: bool,
) -> InboundMessage {
    InboundMessage {
        id: id.into(),
        author: author.map(str::to_string),
        community: community.map(str::to_string),
        body: body.into(),
        was_comment,
        thread_id: None,
    }
}

pub fn post(id: &str, author: Option<&str>, is_self_post: bool, body: Option<&str>) -> ContentItem {
    ContentItem {
        id: id.into(),
        author: author.map(str::to_string),
        community: "pics".into(),
        title: Some("a title".into()),
        body: body.map(str::to_string),
        is_self_post,
        is_comment: false,
    }
}

pub fn comment(id: &str, author: Option<&str>, body: &str) -> ContentItem {
    ContentItem {
        id: id.into(),
        author: author.map(str::to_string),
        community: "pics".into(),
        title: None,
        body: Some(body.into()),
        is_self_post: false,
        is_comment: true,
    }
}
