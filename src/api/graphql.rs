use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

use crate::api::{Api, ApiResult};
use crate::app::Result;
use crate::config::ApiConfig;
use crate::domain::{ApiError, ErrorEntry, Feed, Source};

const SOURCE_FIELDS: &str = "uuid xmlUrl title";
const FEED_FIELDS: &str = "uuid url title content sourceUuid publishedAt";

/// reqwest-based client for the mindstream GraphQL backend.
///
/// Authenticated operations are nested under `auth(token: ..)`, so the
/// client keeps the session token handed out by `login`.
pub struct GraphqlApi {
    client: Client,
    endpoint: Url,
    token: RwLock<Option<String>>,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

impl GraphqlApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: RwLock::new(None),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    fn require_token(&self) -> ApiResult<String> {
        self.token()
            .ok_or_else(|| ApiError::single("not authenticated"))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        path: &[&str],
    ) -> ApiResult<T> {
        let body = json!({ "query": query, "variables": variables });
        tracing::debug!(endpoint = %self.endpoint, operation = path.last().copied().unwrap_or(""), "GraphQL request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        response.error_for_status_ref()?;

        let envelope: GraphqlResponse = response.json().await?;
        extract(envelope, path)
    }

    /// Run an operation nested under `auth(token: $token)`.
    async fn execute_authed<T: DeserializeOwned>(
        &self,
        query: &str,
        mut variables: Value,
        field: &str,
    ) -> ApiResult<T> {
        let token = self.require_token()?;
        if let Value::Object(ref mut map) = variables {
            map.insert("token".to_string(), Value::String(token));
        }
        self.execute(query, variables, &["auth", field]).await
    }
}

fn extract<T: DeserializeOwned>(envelope: GraphqlResponse, path: &[&str]) -> ApiResult<T> {
    if !envelope.errors.is_empty() {
        return Err(ApiError::from_entries(envelope.errors));
    }

    let mut value = envelope
        .data
        .ok_or_else(|| ApiError::single("empty response"))?;
    for key in path {
        value = match value {
            Value::Object(mut map) => map
                .remove(*key)
                .ok_or_else(|| ApiError::single(format!("missing field `{}` in response", key)))?,
            _ => return Err(ApiError::single(format!("missing field `{}` in response", key))),
        };
    }

    serde_json::from_value(value).map_err(|e| ApiError::single(e.to_string()))
}

#[async_trait]
impl Api for GraphqlApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let token: String = self
            .execute(
                "mutation Login($email: String!, $password: String!) { login(email: $email, password: $password) }",
                json!({ "email": email, "password": password }),
                &["login"],
            )
            .await?;
        self.set_token(Some(token.clone()));
        Ok(token)
    }

    async fn signup(&self, login: &str, email: &str, password: &str) -> ApiResult<String> {
        let token: String = self
            .execute(
                "mutation Signup($login: String!, $email: String!, $password: String!) { signup(login: $login, email: $email, password: $password) }",
                json!({ "login": login, "email": email, "password": password }),
                &["signup"],
            )
            .await?;
        self.set_token(Some(token.clone()));
        Ok(token)
    }

    async fn add_source(&self, url: &str) -> ApiResult<Source> {
        let query = format!(
            "mutation AddSource($token: String!, $xmlUrl: String!) {{ auth(token: $token) {{ addFeedSource(xmlUrl: $xmlUrl) {{ {} }} }} }}",
            SOURCE_FIELDS
        );
        self.execute_authed(&query, json!({ "xmlUrl": url }), "addFeedSource")
            .await
    }

    async fn load_unfollowed_sources(&self) -> ApiResult<Vec<Source>> {
        let query = format!(
            "query UnfollowedSources($token: String!) {{ auth(token: $token) {{ unfollowedSources {{ {} }} }} }}",
            SOURCE_FIELDS
        );
        self.execute_authed(&query, json!({}), "unfollowedSources")
            .await
    }

    async fn load_followed_sources(&self) -> ApiResult<Vec<Source>> {
        let query = format!(
            "query MySources($token: String!) {{ auth(token: $token) {{ mySources {{ {} }} }} }}",
            SOURCE_FIELDS
        );
        self.execute_authed(&query, json!({}), "mySources").await
    }

    async fn follow_source(&self, source: &Source) -> ApiResult<Source> {
        let query = format!(
            "mutation FollowSource($token: String!, $sourceUuid: String!) {{ auth(token: $token) {{ followSource(sourceUuid: $sourceUuid) {{ {} }} }} }}",
            SOURCE_FIELDS
        );
        self.execute_authed(
            &query,
            json!({ "sourceUuid": source.uuid.to_string() }),
            "followSource",
        )
        .await
    }

    async fn load_unread_feeds(&self) -> ApiResult<Vec<Feed>> {
        let query = format!(
            "query UnreadFeeds($token: String!) {{ auth(token: $token) {{ unreadedFeeds {{ {} }} }} }}",
            FEED_FIELDS
        );
        self.execute_authed(&query, json!({}), "unreadedFeeds").await
    }

    async fn load_unread_feeds_by_source(&self, source_uuid: Uuid) -> ApiResult<Vec<Feed>> {
        let query = format!(
            "query UnreadFeedsBySource($token: String!, $sourceUuid: String!) {{ auth(token: $token) {{ unreadedFeedsBySource(sourceUuid: $sourceUuid) {{ {} }} }} }}",
            FEED_FIELDS
        );
        self.execute_authed(
            &query,
            json!({ "sourceUuid": source_uuid.to_string() }),
            "unreadedFeedsBySource",
        )
        .await
    }

    async fn read_feed(&self, feed: &Feed) -> ApiResult<Feed> {
        let query = format!(
            "mutation ReadFeed($token: String!, $feedUuid: String!) {{ auth(token: $token) {{ readFeed(feedUuid: $feedUuid) {{ {} }} }} }}",
            FEED_FIELDS
        );
        self.execute_authed(
            &query,
            json!({ "feedUuid": feed.uuid.to_string() }),
            "readFeed",
        )
        .await
    }
}
