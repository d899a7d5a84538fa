use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One message of an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub message: String,
}

/// Error value produced by the API layer and carried verbatim by every
/// `*_ERROR` action.
///
/// Serializes as the GraphQL error envelope `{ "errors": [{ "message": .. }] }`.
/// Always holds at least one entry; an empty envelope is rejected on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(try_from = "RawApiError")]
#[error("{}", self.joined())]
pub struct ApiError {
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct RawApiError {
    errors: Vec<ErrorEntry>,
}

impl TryFrom<RawApiError> for ApiError {
    type Error = String;

    fn try_from(raw: RawApiError) -> Result<Self, Self::Error> {
        if raw.errors.is_empty() {
            Err("error envelope must contain at least one message".to_string())
        } else {
            Ok(Self { errors: raw.errors })
        }
    }
}

impl ApiError {
    /// Build an error from messages. An empty list gets a generic message so
    /// the value is never empty.
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors: Vec<ErrorEntry> = messages
            .into_iter()
            .map(|m| ErrorEntry { message: m.into() })
            .collect();
        if errors.is_empty() {
            errors.push(ErrorEntry {
                message: "unknown error".to_string(),
            });
        }
        Self { errors }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self::new([message.into()])
    }

    /// Wrap entries received from the backend, keeping their order.
    pub fn from_entries(entries: Vec<ErrorEntry>) -> Self {
        Self::new(entries.into_iter().map(|e| e.message))
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.errors
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }

    /// All messages joined by ", " in their original order.
    pub fn joined(&self) -> String {
        self.messages().collect::<Vec<_>>().join(", ")
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::single(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_keeps_order() {
        let error = ApiError::new(["invalid url", "already exists"]);
        assert_eq!(error.joined(), "invalid url, already exists");
        assert_eq!(error.to_string(), "invalid url, already exists");
    }

    #[test]
    fn test_empty_messages_are_never_empty() {
        let error = ApiError::new(Vec::<String>::new());
        assert_eq!(error.entries().len(), 1);
    }

    #[test]
    fn test_deserialize_graphql_envelope() {
        let json = r#"{"errors":[{"message":"invalid url"}]}"#;
        let error: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(error, ApiError::single("invalid url"));
    }

    #[test]
    fn test_deserialize_rejects_empty_envelope() {
        assert!(serde_json::from_str::<ApiError>(r#"{"errors":[]}"#).is_err());
    }

    #[test]
    fn test_error_action_with_empty_envelope_is_rejected() {
        let json = r#"{"type":"ADD_SOURCE_ERROR","error":{"errors":[]}}"#;
        assert!(serde_json::from_str::<crate::store::Action>(json).is_err());
    }

    #[test]
    fn test_from_entries_keeps_order() {
        let entries = vec![
            ErrorEntry {
                message: "first".to_string(),
            },
            ErrorEntry {
                message: "second".to_string(),
            },
        ];
        assert_eq!(ApiError::from_entries(entries).joined(), "first, second");
    }
}
