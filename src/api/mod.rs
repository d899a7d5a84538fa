pub mod graphql;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ApiError, Feed, Source};

pub use graphql::GraphqlApi;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API handle shared between the store and in-flight epics.
pub type SharedApi = Arc<dyn Api + Send + Sync>;

/// Backend operations consumed by the epics.
///
/// Every failure, transport or application level, comes back as an
/// [`ApiError`] so it can travel inside an action unchanged.
#[async_trait]
pub trait Api {
    async fn login(&self, email: &str, password: &str) -> ApiResult<String>;
    async fn signup(&self, login: &str, email: &str, password: &str) -> ApiResult<String>;

    async fn add_source(&self, url: &str) -> ApiResult<Source>;
    async fn load_unfollowed_sources(&self) -> ApiResult<Vec<Source>>;
    async fn load_followed_sources(&self) -> ApiResult<Vec<Source>>;
    async fn follow_source(&self, source: &Source) -> ApiResult<Source>;

    async fn load_unread_feeds(&self) -> ApiResult<Vec<Feed>>;
    async fn load_unread_feeds_by_source(&self, source_uuid: Uuid) -> ApiResult<Vec<Feed>>;
    async fn read_feed(&self, feed: &Feed) -> ApiResult<Feed>;
}
