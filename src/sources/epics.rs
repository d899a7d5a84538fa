use futures::future::{BoxFuture, FutureExt};

use crate::api::SharedApi;
use crate::sources::action::SourcesAction;

/// Side effect for a sources action, if it has one.
///
/// Each intent yields exactly one success or error action. Errors from the
/// API are forwarded untouched; nothing is retried.
pub fn epic(api: SharedApi, action: &SourcesAction) -> Option<BoxFuture<'static, SourcesAction>> {
    match action {
        SourcesAction::AddSource { source_url } => {
            let source_url = source_url.clone();
            Some(
                async move {
                    match api.add_source(&source_url).await {
                        Ok(source) => {
                            tracing::info!(url = %source_url, "Source added");
                            SourcesAction::AddSourceSucceeded { source }
                        }
                        Err(error) => {
                            tracing::warn!(%error, url = %source_url, "Adding source failed");
                            SourcesAction::AddSourceFailed { error }
                        }
                    }
                }
                .boxed(),
            )
        }
        SourcesAction::LoadUnfollowedSources => Some(
            async move {
                match api.load_unfollowed_sources().await {
                    Ok(sources) => SourcesAction::LoadUnfollowedSourcesSucceeded { sources },
                    Err(error) => {
                        tracing::warn!(%error, "Loading unfollowed sources failed");
                        SourcesAction::LoadUnfollowedSourcesFailed { error }
                    }
                }
            }
            .boxed(),
        ),
        SourcesAction::LoadFollowedSources => Some(
            async move {
                match api.load_followed_sources().await {
                    Ok(sources) => SourcesAction::LoadFollowedSourcesSucceeded { sources },
                    Err(error) => {
                        tracing::warn!(%error, "Loading followed sources failed");
                        SourcesAction::LoadFollowedSourcesFailed { error }
                    }
                }
            }
            .boxed(),
        ),
        SourcesAction::FollowSource { source } => {
            let source = source.clone();
            Some(
                async move {
                    match api.follow_source(&source).await {
                        Ok(source) => {
                            tracing::info!(url = %source.xml_url, "Source followed");
                            SourcesAction::FollowSourceSucceeded { source }
                        }
                        Err(error) => {
                            tracing::warn!(%error, url = %source.xml_url, "Following source failed");
                            SourcesAction::FollowSourceFailed { error }
                        }
                    }
                }
                .boxed(),
            )
        }
        _ => None,
    }
}
