use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ApiError, Feed};

/// Intents and results understood by the stream reducer.
///
/// Serialized with a `type` discriminator so actions can be logged or
/// replayed in the same shape the backend tooling uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StreamAction {
    #[serde(rename = "LOAD_UNREADED_FEEDS")]
    RequestUnreadFeeds,
    #[serde(rename = "LOAD_UNREADED_FEEDS_SUCCESS")]
    RequestUnreadFeedsSucceeded { feeds: Vec<Feed> },
    #[serde(rename = "LOAD_UNREADED_FEEDS_ERROR")]
    RequestUnreadFeedsFailed { error: ApiError },

    #[serde(rename = "LOAD_UNREADED_FEEDS_BY_SOURCE", rename_all = "camelCase")]
    RequestUnreadFeedsBySource { source_uuid: Uuid },
    #[serde(rename = "LOAD_UNREADED_FEEDS_BY_SOURCE_SUCCESS")]
    RequestUnreadFeedsBySourceSucceeded { feeds: Vec<Feed> },
    #[serde(rename = "LOAD_UNREADED_FEEDS_BY_SOURCE_ERROR")]
    RequestUnreadFeedsBySourceFailed { error: ApiError },

    #[serde(rename = "READ_FEED")]
    ReadFeed { feed: Feed },
    #[serde(rename = "READ_FEED_SUCCESS")]
    ReadFeedSucceeded { feed: Feed },
    #[serde(rename = "READ_FEED_ERROR")]
    ReadFeedFailed { error: ApiError },

    /// Move the front of the queue onto the history.
    #[serde(rename = "NEXT_FEED")]
    Advance,
    /// Move the most recent history entry back to the front of the queue.
    #[serde(rename = "PREVIOUS_FEED")]
    Retreat,
}

impl StreamAction {
    pub fn kind(&self) -> &'static str {
        match self {
            StreamAction::RequestUnreadFeeds => "LOAD_UNREADED_FEEDS",
            StreamAction::RequestUnreadFeedsSucceeded { .. } => "LOAD_UNREADED_FEEDS_SUCCESS",
            StreamAction::RequestUnreadFeedsFailed { .. } => "LOAD_UNREADED_FEEDS_ERROR",
            StreamAction::RequestUnreadFeedsBySource { .. } => "LOAD_UNREADED_FEEDS_BY_SOURCE",
            StreamAction::RequestUnreadFeedsBySourceSucceeded { .. } => {
                "LOAD_UNREADED_FEEDS_BY_SOURCE_SUCCESS"
            }
            StreamAction::RequestUnreadFeedsBySourceFailed { .. } => {
                "LOAD_UNREADED_FEEDS_BY_SOURCE_ERROR"
            }
            StreamAction::ReadFeed { .. } => "READ_FEED",
            StreamAction::ReadFeedSucceeded { .. } => "READ_FEED_SUCCESS",
            StreamAction::ReadFeedFailed { .. } => "READ_FEED_ERROR",
            StreamAction::Advance => "NEXT_FEED",
            StreamAction::Retreat => "PREVIOUS_FEED",
        }
    }
}
