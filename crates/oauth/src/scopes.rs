/// Scopes requested when building the interactive-bootstrap authorization
/// URL. Broad on purpose: one grant covers everything any plugin may do.
pub const OAUTH_SCOPES: &[&str] = &[
    "identity",
    "account",
    "edit",
    "flair",
    "history",
    "livemanage",
    "modconfig",
    "modflair",
    "modlog",
    "modothers",
    "modposts",
    "modself",
    "modwiki",
    "mysubreddits",
    "privatemessages",
    "read",
    "report",
    "save",
    "submit",
    "subscribe",
    "vote",
    "wikiedit",
    "wikiread",
];
