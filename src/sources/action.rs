use serde::{Deserialize, Serialize};

use crate::domain::{ApiError, Source};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SourcesAction {
    #[serde(rename = "ADD_SOURCE", rename_all = "camelCase")]
    AddSource { source_url: String },
    #[serde(rename = "ADD_SOURCE_SUCCESS")]
    AddSourceSucceeded { source: Source },
    #[serde(rename = "ADD_SOURCE_ERROR")]
    AddSourceFailed { error: ApiError },

    #[serde(rename = "LOAD_UNFOLLOWED_SOURCES")]
    LoadUnfollowedSources,
    #[serde(rename = "LOAD_UNFOLLOWED_SOURCES_SUCCESS")]
    LoadUnfollowedSourcesSucceeded { sources: Vec<Source> },
    #[serde(rename = "LOAD_UNFOLLOWED_SOURCES_ERROR")]
    LoadUnfollowedSourcesFailed { error: ApiError },

    #[serde(rename = "LOAD_FOLLOWED_SOURCES")]
    LoadFollowedSources,
    #[serde(rename = "LOAD_FOLLOWED_SOURCES_SUCCESS")]
    LoadFollowedSourcesSucceeded { sources: Vec<Source> },
    #[serde(rename = "LOAD_FOLLOWED_SOURCES_ERROR")]
    LoadFollowedSourcesFailed { error: ApiError },

    // The wire tags keep the backend's historical spelling.
    #[serde(rename = "FALLOW_SOURCE")]
    FollowSource { source: Source },
    #[serde(rename = "FALLOW_SOURCE_SUCCESS")]
    FollowSourceSucceeded { source: Source },
    #[serde(rename = "FALLOW_SOURCE_ERROR")]
    FollowSourceFailed { error: ApiError },
}

impl SourcesAction {
    pub fn kind(&self) -> &'static str {
        match self {
            SourcesAction::AddSource { .. } => "ADD_SOURCE",
            SourcesAction::AddSourceSucceeded { .. } => "ADD_SOURCE_SUCCESS",
            SourcesAction::AddSourceFailed { .. } => "ADD_SOURCE_ERROR",
            SourcesAction::LoadUnfollowedSources => "LOAD_UNFOLLOWED_SOURCES",
            SourcesAction::LoadUnfollowedSourcesSucceeded { .. } => {
                "LOAD_UNFOLLOWED_SOURCES_SUCCESS"
            }
            SourcesAction::LoadUnfollowedSourcesFailed { .. } => "LOAD_UNFOLLOWED_SOURCES_ERROR",
            SourcesAction::LoadFollowedSources => "LOAD_FOLLOWED_SOURCES",
            SourcesAction::LoadFollowedSourcesSucceeded { .. } => "LOAD_FOLLOWED_SOURCES_SUCCESS",
            SourcesAction::LoadFollowedSourcesFailed { .. } => "LOAD_FOLLOWED_SOURCES_ERROR",
            SourcesAction::FollowSource { .. } => "FALLOW_SOURCE",
            SourcesAction::FollowSourceSucceeded { .. } => "FALLOW_SOURCE_SUCCESS",
            SourcesAction::FollowSourceFailed { .. } => "FALLOW_SOURCE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_source_payload_is_source_url() {
        let action = SourcesAction::AddSource {
            source_url: "http://x".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value, json!({ "type": "ADD_SOURCE", "sourceUrl": "http://x" }));
    }

    #[test]
    fn test_follow_source_tag() {
        let action = SourcesAction::FollowSource {
            source: Source::new("https://example.com/rss"),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "FALLOW_SOURCE");
        assert_eq!(value["source"]["xmlUrl"], "https://example.com/rss");
        assert_eq!(action.kind(), "FALLOW_SOURCE");
    }

    #[test]
    fn test_load_followed_sources_tag() {
        let value = serde_json::to_value(SourcesAction::LoadFollowedSources).unwrap();
        assert_eq!(value, json!({ "type": "LOAD_FOLLOWED_SOURCES" }));
        let parsed: SourcesAction =
            serde_json::from_value(json!({ "type": "LOAD_FOLLOWED_SOURCES_SUCCESS", "sources": [] }))
                .unwrap();
        assert_eq!(
            parsed,
            SourcesAction::LoadFollowedSourcesSucceeded { sources: vec![] }
        );
    }
}
