use crate::domain::{ApiError, Source};
use crate::sources::action::SourcesAction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcesState {
    pub unfollowed: Vec<Source>,
    /// Sources the user follows, as last loaded plus any acknowledged since.
    pub followed: Vec<Source>,
    /// Requests dispatched but not yet answered.
    pub pending: usize,
    /// `pending > 0`.
    pub loading: bool,
    pub error: Option<ApiError>,
}

impl SourcesState {
    fn started(self) -> Self {
        let pending = self.pending + 1;
        SourcesState {
            pending,
            loading: true,
            ..self
        }
    }

    fn finished(self) -> Self {
        let pending = self.pending.saturating_sub(1);
        SourcesState {
            pending,
            loading: pending > 0,
            ..self
        }
    }
}

pub fn reduce(state: SourcesState, action: &SourcesAction) -> SourcesState {
    match action {
        SourcesAction::AddSource { .. }
        | SourcesAction::LoadUnfollowedSources
        | SourcesAction::LoadFollowedSources
        | SourcesAction::FollowSource { .. } => state.started(),

        SourcesAction::AddSourceSucceeded { source } => {
            let mut state = state.finished();
            state.followed.push(source.clone());
            state
        }

        SourcesAction::LoadUnfollowedSourcesSucceeded { sources } => SourcesState {
            unfollowed: sources.clone(),
            ..state.finished()
        },

        SourcesAction::LoadFollowedSourcesSucceeded { sources } => SourcesState {
            followed: sources.clone(),
            ..state.finished()
        },

        SourcesAction::FollowSourceSucceeded { source } => {
            let mut state = state.finished();
            state.unfollowed.retain(|s| s.uuid != source.uuid);
            state.followed.push(source.clone());
            state
        }

        SourcesAction::AddSourceFailed { error }
        | SourcesAction::LoadUnfollowedSourcesFailed { error }
        | SourcesAction::LoadFollowedSourcesFailed { error }
        | SourcesAction::FollowSourceFailed { error } => SourcesState {
            error: Some(error.clone()),
            ..state.finished()
        },
    }
}
