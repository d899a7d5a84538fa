//! State container.
//!
//! The [`Store`] owns the whole [`AppState`] and is driven from a single
//! loop. `dispatch` runs the pure reducers, then starts the matching epic
//! (if any) on the tokio runtime. Every epic sends exactly one result action
//! back over a channel, which the owner feeds into `dispatch` again through
//! [`Store::drain`] or [`Store::settle`].

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::SharedApi;
use crate::login::{self, LoginAction, LoginField, LoginFormHandler, LoginState};
use crate::sources::{self, SourcesAction, SourcesState};
use crate::stream::{self, StreamAction, StreamState};

/// Any action the store understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Action {
    Stream(StreamAction),
    Sources(SourcesAction),
    Login(LoginAction),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Stream(a) => a.kind(),
            Action::Sources(a) => a.kind(),
            Action::Login(a) => a.kind(),
        }
    }
}

impl From<StreamAction> for Action {
    fn from(action: StreamAction) -> Self {
        Action::Stream(action)
    }
}

impl From<SourcesAction> for Action {
    fn from(action: SourcesAction) -> Self {
        Action::Sources(action)
    }
}

impl From<LoginAction> for Action {
    fn from(action: LoginAction) -> Self {
        Action::Login(action)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub stream: StreamState,
    pub sources: SourcesState,
    pub login: LoginState,
}

/// Root reducer: each slice only sees its own actions.
pub fn reduce(state: AppState, action: &Action) -> AppState {
    match action {
        Action::Stream(a) => AppState {
            stream: stream::reduce(state.stream, a),
            ..state
        },
        Action::Sources(a) => AppState {
            sources: sources::reduce(state.sources, a),
            ..state
        },
        Action::Login(a) => AppState {
            login: login::reduce(state.login, a),
            ..state
        },
    }
}

fn effect(api: SharedApi, action: &Action) -> Option<BoxFuture<'static, Action>> {
    match action {
        Action::Stream(a) => stream::epics::epic(api, a).map(|f| f.map(Action::Stream).boxed()),
        Action::Sources(a) => {
            sources::epics::epic(api, a).map(|f| f.map(Action::Sources).boxed())
        }
        Action::Login(a) => login::epics::epic(api, a).map(|f| f.map(Action::Login).boxed()),
    }
}

pub struct Store {
    state: AppState,
    api: SharedApi,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    in_flight: usize,
}

impl Store {
    pub fn new(api: SharedApi) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of epics whose result has not been dispatched yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Mark the session as logged in with a token obtained earlier.
    pub fn restore_session(&mut self, token: String) {
        self.dispatch(LoginAction::LoginSucceeded { token });
    }

    /// Apply an action and start its side effect.
    ///
    /// Must be called from within a tokio runtime when the action has an
    /// epic. Effects are never cancelled or de-duplicated.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::debug!(action = action.kind(), "Dispatch");

        self.state = reduce(std::mem::take(&mut self.state), &action);

        if let Some(effect) = effect(self.api.clone(), &action) {
            self.in_flight += 1;
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = effect.await;
                if tx.send(result).is_err() {
                    tracing::debug!("Store dropped before effect completed");
                }
            });
        }
    }

    /// Dispatch every result that is already available, without waiting.
    pub fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Ok(result) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.dispatch(result);
            count += 1;
        }
        count
    }

    /// Wait until no effect is in flight, dispatching results as they arrive.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(result) => {
                    self.in_flight -= 1;
                    self.dispatch(result);
                }
                None => break,
            }
        }
    }
}

impl LoginFormHandler for Store {
    fn on_change(&mut self, field: LoginField, value: String) {
        self.dispatch(LoginAction::ChangeField { field, value });
    }

    fn on_submit(&mut self, email: &str, password: &str) {
        self.dispatch(LoginAction::Login {
            email: email.to_string(),
            password: password.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::domain::{ApiError, Feed, Source};
    use crate::login::LoginForm;

    fn store_with(fake: &Arc<FakeApi>) -> Store {
        Store::new(fake.clone())
    }

    #[tokio::test]
    async fn test_add_source_error_scenario() {
        let fake = Arc::new(FakeApi::default());
        let error: ApiError =
            serde_json::from_value(json!({ "errors": [{ "message": "invalid url" }] })).unwrap();
        fake.added.lock().unwrap().push_back(Err(error.clone()));

        let mut store = store_with(&fake);
        store.dispatch(SourcesAction::AddSource {
            source_url: "http://x".to_string(),
        });
        assert!(store.state().sources.loading);
        assert_eq!(store.in_flight(), 1);

        store.settle().await;
        assert_eq!(store.in_flight(), 0);
        assert!(!store.state().sources.loading);
        assert_eq!(store.state().sources.error, Some(error));
    }

    #[tokio::test]
    async fn test_concurrent_intents_resolve_in_completion_order() {
        let fake = Arc::new(FakeApi::default());
        fake.add_delays.lock().unwrap().extend([
            ("https://slow.example/rss".to_string(), Duration::from_millis(50)),
            ("https://fast.example/rss".to_string(), Duration::from_millis(1)),
        ]);

        let mut store = store_with(&fake);
        store.dispatch(SourcesAction::AddSource {
            source_url: "https://slow.example/rss".to_string(),
        });
        store.dispatch(SourcesAction::AddSource {
            source_url: "https://fast.example/rss".to_string(),
        });
        assert_eq!(store.in_flight(), 2);

        store.settle().await;
        let followed: Vec<&str> = store
            .state()
            .sources
            .followed
            .iter()
            .map(|s| s.xml_url.as_str())
            .collect();
        assert_eq!(
            followed,
            vec!["https://fast.example/rss", "https://slow.example/rss"]
        );
    }

    #[tokio::test]
    async fn test_sources_loading_until_last_intent_completes() {
        let fake = Arc::new(FakeApi::default());
        fake.add_delays.lock().unwrap().extend([
            ("https://slow.example/rss".to_string(), Duration::from_millis(300)),
            ("https://fast.example/rss".to_string(), Duration::from_millis(1)),
        ]);

        let mut store = store_with(&fake);
        store.dispatch(SourcesAction::AddSource {
            source_url: "https://slow.example/rss".to_string(),
        });
        store.dispatch(SourcesAction::AddSource {
            source_url: "https://fast.example/rss".to_string(),
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.drain(), 1);
        assert_eq!(store.state().sources.followed.len(), 1);
        assert_eq!(store.state().sources.pending, 1);
        assert!(store.state().sources.loading);

        store.settle().await;
        assert_eq!(store.state().sources.pending, 0);
        assert!(!store.state().sources.loading);
    }

    #[tokio::test]
    async fn test_load_then_navigate() {
        let fake = Arc::new(FakeApi::default());
        let feeds = vec![Feed::new("https://a.example/1"), Feed::new("https://a.example/2")];
        fake.feeds.lock().unwrap().push_back(Ok(feeds.clone()));

        let mut store = store_with(&fake);
        store.dispatch(StreamAction::RequestUnreadFeeds);
        store.settle().await;
        assert_eq!(store.state().stream.current(), Some(&feeds[0]));

        store.dispatch(StreamAction::Advance);
        assert_eq!(store.state().stream.current(), Some(&feeds[1]));
        store.dispatch(StreamAction::Retreat);
        assert_eq!(store.state().stream.current(), Some(&feeds[0]));
        assert_eq!(store.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_follow_flow_updates_sources() {
        let fake = Arc::new(FakeApi::default());
        let source = Source::new("https://a.example/rss");
        fake.unfollowed
            .lock()
            .unwrap()
            .push_back(Ok(vec![source.clone()]));
        fake.followed.lock().unwrap().push_back(Ok(source.clone()));

        let mut store = store_with(&fake);
        store.dispatch(SourcesAction::LoadUnfollowedSources);
        store.settle().await;
        assert_eq!(store.state().sources.unfollowed, vec![source.clone()]);

        store.dispatch(SourcesAction::FollowSource {
            source: source.clone(),
        });
        store.settle().await;
        assert!(store.state().sources.unfollowed.is_empty());
        assert_eq!(store.state().sources.followed, vec![source]);
    }

    #[tokio::test]
    async fn test_login_form_drives_store() {
        let fake = Arc::new(FakeApi::default());
        fake.login.lock().unwrap().push_back(Ok("jwt".to_string()));

        let mut store = store_with(&fake);
        let form = LoginForm::from_state(&store.state().login, LoginField::Email);
        form.change(LoginField::Email, "me@example.com".to_string(), &mut store);
        form.change(LoginField::Password, "hunter2".to_string(), &mut store);

        let form = LoginForm::from_state(&store.state().login, LoginField::Password);
        form.submit(&mut store);
        assert!(store.state().login.loading);

        // A second submit while loading is swallowed by the form.
        let form = LoginForm::from_state(&store.state().login, LoginField::Password);
        form.submit(&mut store);
        assert_eq!(store.in_flight(), 1);

        store.settle().await;
        assert_eq!(store.state().login.token.as_deref(), Some("jwt"));
        assert_eq!(fake.calls(), vec!["login:me@example.com"]);
    }

    #[tokio::test]
    async fn test_drain_is_non_blocking() {
        let fake = Arc::new(FakeApi::default());
        let mut store = store_with(&fake);
        assert_eq!(store.drain(), 0);

        store.dispatch(StreamAction::RequestUnreadFeeds);
        // Unscripted fake responds with an error.
        while store.in_flight() > 0 {
            if store.drain() == 0 {
                tokio::task::yield_now().await;
            }
        }
        assert!(store.state().stream.error.is_some());
        assert!(!store.state().stream.loading);
    }

    #[test]
    fn test_restore_session_needs_no_runtime() {
        let fake = Arc::new(FakeApi::default());
        let mut store = store_with(&fake);
        store.restore_session("jwt".to_string());
        assert_eq!(store.state().login.token.as_deref(), Some("jwt"));
    }

    #[test]
    fn test_action_untagged_roundtrip_by_type() {
        let action: Action = serde_json::from_value(json!({ "type": "NEXT_FEED" })).unwrap();
        assert_eq!(action, Action::Stream(StreamAction::Advance));

        let action: Action =
            serde_json::from_value(json!({ "type": "ADD_SOURCE", "sourceUrl": "http://x" }))
                .unwrap();
        assert_eq!(action.kind(), "ADD_SOURCE");

        let action: Action =
            serde_json::from_value(json!({ "type": "LOGIN_SUCCESS", "token": "t" })).unwrap();
        assert!(matches!(action, Action::Login(_)));
    }

    #[test]
    fn test_root_reducer_touches_only_its_slice() {
        let state = reduce(AppState::default(), &Action::Stream(StreamAction::RequestUnreadFeeds));
        assert!(state.stream.loading);
        assert!(!state.sources.loading);
        assert!(!state.login.loading);
    }
}
