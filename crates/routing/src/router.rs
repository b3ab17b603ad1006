//! Shape-based dispatch of content items to plugin handlers.

use {anyhow::Result, tracing::debug};

use {rover_platform::ContentItem, rover_plugins::Plugin};

/// The four content shapes a plugin can handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    Comment,
    /// Self post with a non-empty text body.
    SelfText,
    /// Self post with an empty body.
    TitleOnly,
    Link,
}

/// Classify a content item using exactly two predicates: is-self-post and
/// has-body-text. The order matters: a self post with an empty body is a
/// title-only post, not a link post.
#[must_use]
pub fn classify(item: &ContentItem) -> ContentClass {
    if item.is_comment {
        ContentClass::Comment
    } else if item.is_self_post && item.body.as_deref().is_some_and(|body| !body.is_empty()) {
        ContentClass::SelfText
    } else if item.is_self_post {
        ContentClass::TitleOnly
    } else {
        ContentClass::Link
    }
}

/// Route one content item to the matching plugin handler.
///
/// Items authored by the plugin's own account are skipped when the plugin
/// asked to ignore itself.
pub async fn dispatch(plugin: &dyn Plugin, item: &ContentItem) -> Result<()> {
    let identity = plugin.identity();
    if identity.self_ignore
        && item
            .author
            .as_deref()
            .is_some_and(|author| identity.is_own_account(author))
    {
        debug!(plugin = %identity.name, item_id = %item.id, "skipping own content");
        return Ok(());
    }

    match classify(item) {
        ContentClass::Comment => plugin.execute_comment(item).await,
        ContentClass::SelfText => plugin.execute_submission(item).await,
        ContentClass::TitleOnly => plugin.execute_title_post(item).await,
        ContentClass::Link => plugin.execute_link(item).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(is_self_post: bool, is_comment: bool, body: Option<&str>) -> ContentItem {
        ContentItem {
            id: "t3_abc".into(),
            author: Some("alice".into()),
            community: "pics".into(),
            title: Some("a title".into()),
            body: body.map(str::to_string),
            is_self_post,
            is_comment,
        }
    }

    #[test]
    fn comments_win_over_every_other_predicate() {
        assert_eq!(classify(&item(true, true, Some("text"))), ContentClass::Comment);
        assert_eq!(classify(&item(false, true, None)), ContentClass::Comment);
    }

    #[test]
    fn self_post_with_body_is_self_text() {
        assert_eq!(classify(&item(true, false, Some("text"))), ContentClass::SelfText);
    }

    #[test]
    fn self_post_without_body_is_title_only() {
        assert_eq!(classify(&item(true, false, None)), ContentClass::TitleOnly);
        assert_eq!(classify(&item(true, false, Some(""))), ContentClass::TitleOnly);
    }

    #[test]
    fn non_self_post_is_a_link() {
        assert_eq!(classify(&item(false, false, None)), ContentClass::Link);
        // Body text on a link post does not make it a self post.
        assert_eq!(classify(&item(false, false, Some("text"))), ContentClass::Link);
    }
}
