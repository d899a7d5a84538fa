use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unread entry in the stream.
///
/// The backend owns the schema; the client only moves feeds between the
/// unread queue and the history, so everything beyond `uuid` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub uuid: Uuid,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source_uuid: Option<Uuid>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Feed {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            url: url.into(),
            title: None,
            content: None,
            source_uuid: None,
            published_at: None,
        }
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }

    pub fn display_content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
