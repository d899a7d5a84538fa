use futures::future::{BoxFuture, FutureExt};

use crate::api::SharedApi;
use crate::stream::action::StreamAction;

/// Side effect for a stream action, if it has one.
///
/// The returned future resolves to exactly one result action.
pub fn epic(api: SharedApi, action: &StreamAction) -> Option<BoxFuture<'static, StreamAction>> {
    match action {
        StreamAction::RequestUnreadFeeds => Some(
            async move {
                match api.load_unread_feeds().await {
                    Ok(feeds) => {
                        tracing::info!(count = feeds.len(), "Loaded unread feeds");
                        StreamAction::RequestUnreadFeedsSucceeded { feeds }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "Loading unread feeds failed");
                        StreamAction::RequestUnreadFeedsFailed { error }
                    }
                }
            }
            .boxed(),
        ),
        StreamAction::RequestUnreadFeedsBySource { source_uuid } => {
            let source_uuid = *source_uuid;
            Some(
                async move {
                    match api.load_unread_feeds_by_source(source_uuid).await {
                        Ok(feeds) => {
                            tracing::info!(count = feeds.len(), %source_uuid, "Loaded unread feeds for source");
                            StreamAction::RequestUnreadFeedsBySourceSucceeded { feeds }
                        }
                        Err(error) => {
                            tracing::warn!(%error, %source_uuid, "Loading unread feeds for source failed");
                            StreamAction::RequestUnreadFeedsBySourceFailed { error }
                        }
                    }
                }
                .boxed(),
            )
        }
        StreamAction::ReadFeed { feed } => {
            let feed = feed.clone();
            Some(
                async move {
                    match api.read_feed(&feed).await {
                        Ok(feed) => StreamAction::ReadFeedSucceeded { feed },
                        Err(error) => {
                            tracing::warn!(%error, url = %feed.url, "Marking feed read failed");
                            StreamAction::ReadFeedFailed { error }
                        }
                    }
                }
                .boxed(),
            )
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::domain::{ApiError, Feed};

    #[tokio::test]
    async fn test_load_unread_feeds_success() {
        let fake = Arc::new(FakeApi::default());
        let feeds = vec![Feed::new("https://example.com/1")];
        fake.feeds.lock().unwrap().push_back(Ok(feeds.clone()));

        let result = epic(fake.clone(), &StreamAction::RequestUnreadFeeds)
            .unwrap()
            .await;
        assert_eq!(result, StreamAction::RequestUnreadFeedsSucceeded { feeds });
        assert_eq!(fake.calls(), vec!["load_unread_feeds"]);
    }

    #[tokio::test]
    async fn test_by_source_failure_forwards_error() {
        let fake = Arc::new(FakeApi::default());
        let error = ApiError::single("unknown source");
        fake.feeds.lock().unwrap().push_back(Err(error.clone()));

        let source_uuid = uuid::Uuid::new_v4();
        let result = epic(
            fake.clone(),
            &StreamAction::RequestUnreadFeedsBySource { source_uuid },
        )
        .unwrap()
        .await;
        assert_eq!(result, StreamAction::RequestUnreadFeedsBySourceFailed { error });
        assert_eq!(
            fake.calls(),
            vec![format!("load_unread_feeds_by_source:{}", source_uuid)]
        );
    }

    #[tokio::test]
    async fn test_read_feed_result() {
        let fake = Arc::new(FakeApi::default());
        let feed = Feed::new("https://example.com/1");
        fake.read.lock().unwrap().push_back(Ok(feed.clone()));

        let result = epic(fake, &StreamAction::ReadFeed { feed: feed.clone() })
            .unwrap()
            .await;
        assert_eq!(result, StreamAction::ReadFeedSucceeded { feed });
    }

    #[test]
    fn test_navigation_has_no_effect() {
        let fake: SharedApi = Arc::new(FakeApi::default());
        assert!(epic(fake.clone(), &StreamAction::Advance).is_none());
        assert!(epic(fake, &StreamAction::Retreat).is_none());
    }
}
