use std::collections::VecDeque;

use crate::domain::{ApiError, Feed};
use crate::stream::action::StreamAction;

/// State of the feed stream.
///
/// `loading` and `error` are independent flags: an error survives later
/// successful loads until another failure replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamState {
    /// Front is the next feed to show.
    pub unread: VecDeque<Feed>,
    /// Front is the most recently viewed feed.
    pub history: VecDeque<Feed>,
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl StreamState {
    /// The feed currently on screen.
    pub fn current(&self) -> Option<&Feed> {
        self.unread.front()
    }
}

/// Apply one action. Pure: the result depends only on the inputs.
pub fn reduce(state: StreamState, action: &StreamAction) -> StreamState {
    match action {
        StreamAction::RequestUnreadFeeds
        | StreamAction::RequestUnreadFeedsBySource { .. }
        | StreamAction::ReadFeed { .. } => StreamState {
            loading: true,
            ..state
        },

        StreamAction::RequestUnreadFeedsSucceeded { feeds }
        | StreamAction::RequestUnreadFeedsBySourceSucceeded { feeds } => StreamState {
            unread: feeds.iter().cloned().collect(),
            loading: false,
            ..state
        },

        StreamAction::ReadFeedSucceeded { .. } => StreamState {
            loading: false,
            ..state
        },

        StreamAction::RequestUnreadFeedsFailed { error }
        | StreamAction::RequestUnreadFeedsBySourceFailed { error }
        | StreamAction::ReadFeedFailed { error } => StreamState {
            loading: false,
            error: Some(error.clone()),
            ..state
        },

        StreamAction::Advance => advance(state),
        StreamAction::Retreat => retreat(state),
    }
}

// An empty queue leaves the state untouched.
fn advance(mut state: StreamState) -> StreamState {
    if let Some(first) = state.unread.pop_front() {
        state.history.push_front(first);
    }
    state
}

fn retreat(mut state: StreamState) -> StreamState {
    if let Some(first) = state.history.pop_front() {
        state.unread.push_front(first);
    }
    state
}
