//! Subcommand handlers.
//!
//! Each handler is split in two: a store-driven helper that dispatches the
//! actions and reads the settled state back, and a thin printing wrapper
//! that owns the [`AppContext`].

use uuid::Uuid;

use crate::app::{AppContext, MindstreamError, Result};
use crate::domain::{ApiError, Feed, Source};
use crate::login::LoginAction;
use crate::sources::SourcesAction;
use crate::store::Store;
use crate::stream::StreamAction;

fn require_login(ctx: &AppContext) -> Result<()> {
    if ctx.is_logged_in() {
        Ok(())
    } else {
        Err(MindstreamError::NotAuthenticated)
    }
}

/// Turn the error slot of a state slice into a command failure.
fn check(error: Option<&ApiError>) -> Result<()> {
    match error {
        Some(error) => Err(MindstreamError::Api(error.clone())),
        None => Ok(()),
    }
}

fn session_token(store: &Store) -> Result<String> {
    let state = &store.state().login;
    check(state.error.as_ref())?;
    state.token.clone().ok_or(MindstreamError::NotAuthenticated)
}

pub async fn login_token(store: &mut Store, email: &str, password: &str) -> Result<String> {
    store.dispatch(LoginAction::Login {
        email: email.to_string(),
        password: password.to_string(),
    });
    store.settle().await;
    session_token(store)
}

pub async fn signup_token(
    store: &mut Store,
    login: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    store.dispatch(LoginAction::Signup {
        login: login.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    });
    store.settle().await;
    session_token(store)
}

pub async fn added_source(store: &mut Store, url: &str) -> Result<Source> {
    store.dispatch(SourcesAction::AddSource {
        source_url: url.to_string(),
    });
    store.settle().await;

    let state = &store.state().sources;
    check(state.error.as_ref())?;
    state
        .followed
        .last()
        .cloned()
        .ok_or_else(|| MindstreamError::SourceNotFound(url.to_string()))
}

pub async fn unfollowed_sources(store: &mut Store) -> Result<Vec<Source>> {
    store.dispatch(SourcesAction::LoadUnfollowedSources);
    store.settle().await;

    let state = &store.state().sources;
    check(state.error.as_ref())?;
    Ok(state.unfollowed.clone())
}

pub async fn followed_sources(store: &mut Store) -> Result<Vec<Source>> {
    store.dispatch(SourcesAction::LoadFollowedSources);
    store.settle().await;

    let state = &store.state().sources;
    check(state.error.as_ref())?;
    Ok(state.followed.clone())
}

/// Follow a source picked from the unfollowed list by uuid or url.
pub async fn followed_source(store: &mut Store, needle: &str) -> Result<Source> {
    let source = unfollowed_sources(store)
        .await?
        .into_iter()
        .find(|s| s.matches(needle))
        .ok_or_else(|| MindstreamError::SourceNotFound(needle.to_string()))?;

    store.dispatch(SourcesAction::FollowSource { source });
    store.settle().await;

    let state = &store.state().sources;
    check(state.error.as_ref())?;
    state
        .followed
        .last()
        .cloned()
        .ok_or_else(|| MindstreamError::SourceNotFound(needle.to_string()))
}

pub async fn unread_feeds(store: &mut Store, source: Option<Uuid>) -> Result<Vec<Feed>> {
    match source {
        Some(source_uuid) => store.dispatch(StreamAction::RequestUnreadFeedsBySource { source_uuid }),
        None => store.dispatch(StreamAction::RequestUnreadFeeds),
    }
    store.settle().await;

    let state = &store.state().stream;
    check(state.error.as_ref())?;
    Ok(state.unread.iter().cloned().collect())
}

pub async fn marked_read(store: &mut Store, uuid: Uuid) -> Result<Feed> {
    let feed = unread_feeds(store, None)
        .await?
        .into_iter()
        .find(|f| f.uuid == uuid)
        .ok_or_else(|| MindstreamError::FeedNotFound(uuid.to_string()))?;

    store.dispatch(StreamAction::ReadFeed { feed: feed.clone() });
    store.settle().await;
    check(store.state().stream.error.as_ref())?;
    Ok(feed)
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let mut store = Store::new(ctx.api.clone());
    let token = login_token(&mut store, email, password).await?;
    ctx.save_session(&token)?;
    println!("Logged in as {}", email);
    Ok(())
}

pub async fn signup(ctx: &AppContext, login: &str, email: &str, password: &str) -> Result<()> {
    let mut store = Store::new(ctx.api.clone());
    let token = signup_token(&mut store, login, email, password).await?;
    ctx.save_session(&token)?;
    println!("Signed up as {}", login);
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.clear_session()?;
    println!("Logged out");
    Ok(())
}

pub async fn add_source(ctx: &AppContext, url: &str) -> Result<()> {
    require_login(ctx)?;
    let source = added_source(&mut ctx.store(), url).await?;
    println!("Added source: {} ({})", source.display_title(), source.uuid);
    Ok(())
}

fn print_sources(sources: &[Source], empty: &str) {
    if sources.is_empty() {
        println!("{}", empty);
        return;
    }
    for source in sources {
        println!("{}  {}  {}", source.uuid, source.display_title(), source.xml_url);
    }
}

pub async fn list_unfollowed(ctx: &AppContext) -> Result<()> {
    require_login(ctx)?;
    let sources = unfollowed_sources(&mut ctx.store()).await?;
    print_sources(&sources, "No unfollowed sources");
    Ok(())
}

pub async fn list_followed(ctx: &AppContext) -> Result<()> {
    require_login(ctx)?;
    let sources = followed_sources(&mut ctx.store()).await?;
    print_sources(&sources, "Not following any source");
    Ok(())
}

pub async fn follow_source(ctx: &AppContext, needle: &str) -> Result<()> {
    require_login(ctx)?;
    let source = followed_source(&mut ctx.store(), needle).await?;
    println!("Following: {}", source.display_title());
    Ok(())
}

pub async fn list_stream(ctx: &AppContext, source: Option<Uuid>) -> Result<()> {
    require_login(ctx)?;
    let feeds = unread_feeds(&mut ctx.store(), source).await?;
    if feeds.is_empty() {
        println!("No unread feeds");
        return Ok(());
    }
    for feed in &feeds {
        let date = feed
            .published_at
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "          ".to_string());
        println!("{}  {}  {}", feed.uuid, date, feed.display_title());
    }
    println!("{} unread", feeds.len());
    Ok(())
}

pub async fn read_feed(ctx: &AppContext, uuid: Uuid) -> Result<()> {
    require_login(ctx)?;
    let feed = marked_read(&mut ctx.store(), uuid).await?;
    println!("Marked read: {}", feed.display_title());
    Ok(())
}
