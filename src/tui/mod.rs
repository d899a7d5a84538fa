pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::login::LoginForm;
use crate::sources::SourcesAction;
use crate::store::Store;
use crate::stream::StreamAction;

use self::app::{Screen, TuiApp};
use self::event::{AppEvent, EventHandler, KeyAction};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext) -> Result<()> {
    let mut store = ctx.store();
    let mut tui_app = if ctx.is_logged_in() {
        store.dispatch(StreamAction::RequestUnreadFeeds);
        TuiApp::new(Screen::Stream)
    } else {
        TuiApp::new(Screen::Login)
    };
    let event_handler = EventHandler::new(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| {
            layout::render(frame, &mut tui_app, store.state(), &ctx.config.keybindings)
        })?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                tui_app.clear_status();
                match tui_app.screen {
                    Screen::Login => handle_login_key(&mut tui_app, &mut store, key),
                    Screen::Stream | Screen::Sources => {
                        let action = ctx.config.keybindings.get_action(&key);
                        handle_action(&mut tui_app, &mut store, action);
                    }
                }
            }
            AppEvent::Tick => {}
        }

        // Let API results that finished meanwhile reach the reducers.
        let was_logged_in = store.state().login.token.is_some();
        store.drain();
        if !was_logged_in {
            if let Some(token) = store.state().login.token.clone() {
                ctx.save_session(&token)?;
                tui_app.screen = Screen::Stream;
                tui_app.set_status("Logged in".to_string());
                store.dispatch(StreamAction::RequestUnreadFeeds);
            }
        }
        tui_app.clamp_source_index(store.state().sources.unfollowed.len());

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_login_key(tui_app: &mut TuiApp, store: &mut Store, key: KeyEvent) {
    let form = LoginForm::from_state(&store.state().login, tui_app.login_focus);
    let field = tui_app.login_focus;

    match key.code {
        KeyCode::Esc => tui_app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            tui_app.should_quit = true;
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            tui_app.login_focus = field.next();
        }
        KeyCode::Enter => form.submit(store),
        KeyCode::Backspace => {
            let mut value = form.value(field).to_string();
            value.pop();
            form.change(field, value, store);
        }
        KeyCode::Char(c) => {
            let mut value = form.value(field).to_string();
            value.push(c);
            form.change(field, value, store);
        }
        _ => {}
    }
}

fn handle_action(tui_app: &mut TuiApp, store: &mut Store, action: KeyAction) {
    match (tui_app.screen, action) {
        (_, KeyAction::Quit) => tui_app.should_quit = true,
        (_, KeyAction::ToggleSources) => {
            tui_app.toggle_sources();
            if tui_app.screen == Screen::Sources {
                store.dispatch(SourcesAction::LoadUnfollowedSources);
                store.dispatch(SourcesAction::LoadFollowedSources);
            }
        }

        (Screen::Stream, KeyAction::NextFeed) => store.dispatch(StreamAction::Advance),
        (Screen::Stream, KeyAction::PreviousFeed) => store.dispatch(StreamAction::Retreat),
        (Screen::Stream, KeyAction::ReadFeed) => {
            if let Some(feed) = store.state().stream.current().cloned() {
                store.dispatch(StreamAction::ReadFeed { feed });
                store.dispatch(StreamAction::Advance);
            }
        }
        (Screen::Stream, KeyAction::Reload) => store.dispatch(StreamAction::RequestUnreadFeeds),
        (Screen::Stream, KeyAction::OpenInBrowser) => {
            if let Some(feed) = store.state().stream.current() {
                if let Err(e) = open::that(&feed.url) {
                    tui_app.set_status(format!("Failed to open browser: {}", e));
                }
            }
        }

        (Screen::Sources, KeyAction::NextFeed) => {
            tui_app.move_source_down(store.state().sources.unfollowed.len());
        }
        (Screen::Sources, KeyAction::PreviousFeed) => tui_app.move_source_up(),
        (Screen::Sources, KeyAction::FollowSource) => {
            if let Some(source) = tui_app
                .selected_source(&store.state().sources.unfollowed)
                .cloned()
            {
                tui_app.set_status(format!("Following {}...", source.display_title()));
                store.dispatch(SourcesAction::FollowSource { source });
            }
        }
        (Screen::Sources, KeyAction::ReadFeed) => {
            if let Some(source) = tui_app.selected_source(&store.state().sources.unfollowed) {
                let source_uuid = source.uuid;
                store.dispatch(StreamAction::RequestUnreadFeedsBySource { source_uuid });
                tui_app.screen = Screen::Stream;
            }
        }
        (Screen::Sources, KeyAction::Reload) => {
            store.dispatch(SourcesAction::LoadUnfollowedSources);
            store.dispatch(SourcesAction::LoadFollowedSources);
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::fake::FakeApi;
    use crate::domain::{Feed, Source};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_typing_and_submitting_login() {
        let fake = Arc::new(FakeApi::default());
        fake.login.lock().unwrap().push_back(Ok("jwt".to_string()));
        let mut store = Store::new(fake.clone());
        let mut app = TuiApp::new(Screen::Login);

        for c in "a@b.c".chars() {
            handle_login_key(&mut app, &mut store, key(KeyCode::Char(c)));
        }
        handle_login_key(&mut app, &mut store, key(KeyCode::Tab));
        for c in "pwx".chars() {
            handle_login_key(&mut app, &mut store, key(KeyCode::Char(c)));
        }
        handle_login_key(&mut app, &mut store, key(KeyCode::Backspace));
        assert_eq!(store.state().login.email, "a@b.c");
        assert_eq!(store.state().login.password, "pw");

        handle_login_key(&mut app, &mut store, key(KeyCode::Enter));
        handle_login_key(&mut app, &mut store, key(KeyCode::Enter));
        store.settle().await;
        assert_eq!(fake.calls(), vec!["login:a@b.c"]);
        assert_eq!(store.state().login.token.as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_read_marks_current_and_advances() {
        let fake = Arc::new(FakeApi::default());
        let a = Feed::new("https://example.com/a");
        let b = Feed::new("https://example.com/b");
        fake.read.lock().unwrap().push_back(Ok(a.clone()));
        let mut store = Store::new(fake.clone());
        store.dispatch(StreamAction::RequestUnreadFeedsSucceeded {
            feeds: vec![a.clone(), b.clone()],
        });

        let mut app = TuiApp::new(Screen::Stream);
        handle_action(&mut app, &mut store, KeyAction::ReadFeed);
        assert_eq!(store.state().stream.current(), Some(&b));

        store.settle().await;
        assert!(!store.state().stream.loading);
        assert_eq!(fake.calls(), vec!["read_feed:https://example.com/a"]);
    }

    #[tokio::test]
    async fn test_follow_selected_source() {
        let fake = Arc::new(FakeApi::default());
        let a = Source::new("https://a.example/rss");
        let b = Source::new("https://b.example/rss");
        fake.followed.lock().unwrap().push_back(Ok(b.clone()));
        let mut store = Store::new(fake.clone());
        store.dispatch(SourcesAction::LoadUnfollowedSourcesSucceeded {
            sources: vec![a.clone(), b.clone()],
        });

        let mut app = TuiApp::new(Screen::Sources);
        handle_action(&mut app, &mut store, KeyAction::NextFeed);
        handle_action(&mut app, &mut store, KeyAction::FollowSource);
        store.settle().await;

        assert_eq!(store.state().sources.unfollowed, vec![a]);
        assert_eq!(store.state().sources.followed, vec![b]);
    }

    #[tokio::test]
    async fn test_entering_sources_loads_both_lists() {
        let fake = Arc::new(FakeApi::default());
        let open = Source::new("https://open.example/rss");
        let mine = Source::new("https://mine.example/rss");
        fake.unfollowed.lock().unwrap().push_back(Ok(vec![open.clone()]));
        fake.mine.lock().unwrap().push_back(Ok(vec![mine.clone()]));
        let mut store = Store::new(fake.clone());

        let mut app = TuiApp::new(Screen::Stream);
        handle_action(&mut app, &mut store, KeyAction::ToggleSources);
        assert_eq!(app.screen, Screen::Sources);
        assert_eq!(store.state().sources.pending, 2);

        store.settle().await;
        assert_eq!(store.state().sources.unfollowed, vec![open]);
        assert_eq!(store.state().sources.followed, vec![mine]);
        assert!(!store.state().sources.loading);
    }

    #[test]
    fn test_quit_from_any_screen() {
        let fake = Arc::new(FakeApi::default());
        let mut store = Store::new(fake);
        let mut app = TuiApp::new(Screen::Sources);
        handle_action(&mut app, &mut store, KeyAction::Quit);
        assert!(app.should_quit);
    }
}
