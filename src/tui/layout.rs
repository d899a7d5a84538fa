use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::keybindings::hint;
use crate::config::KeybindingConfig;
use crate::login::LoginForm;
use crate::store::AppState;
use crate::tui::app::{Screen, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, state: &AppState, keys: &KeybindingConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main pane
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match app.screen {
        Screen::Login => render_login(frame, app, state, chunks[0]),
        Screen::Stream => render_stream(frame, state, keys, chunks[0]),
        Screen::Sources => render_sources(frame, app, state, chunks[0]),
    }
    render_status_bar(frame, app, state, keys, chunks[1]);
}

fn render_login(frame: &mut Frame, app: &TuiApp, state: &AppState, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(12),
            Constraint::Min(0),
        ])
        .split(columns[1]);

    let form = LoginForm::from_state(&state.login, app.login_focus);
    frame.render_widget(&form, rows[1]);
}

fn render_stream(frame: &mut Frame, state: &AppState, keys: &KeybindingConfig, area: Rect) {
    let stream = &state.stream;
    let title = format!(
        " Stream [{} unread | {} viewed] ",
        stream.unread.len(),
        stream.history.len()
    );

    let content = if let Some(feed) = stream.current() {
        let mut lines = Vec::new();

        lines.push(Line::from(Span::styled(
            feed.display_title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        if let Some(date) = feed.published_at {
            lines.push(Line::from(Span::styled(
                format!("Date: {}", date.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("Link: {}", feed.url),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(
            "─".repeat(area.width.saturating_sub(2) as usize),
        ));
        lines.push(Line::from(""));

        let content_text = strip_html(feed.display_content());
        for line in content_text.lines() {
            lines.push(Line::from(line.to_string()));
        }

        Text::from(lines)
    } else if stream.loading {
        Text::from("Loading feeds...")
    } else {
        Text::from(format!(
            "Nothing left to read. Press {} to reload.",
            hint(&keys.reload)
        ))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_sources(frame: &mut Frame, app: &mut TuiApp, state: &AppState, area: Rect) {
    let sources = &state.sources;
    let items: Vec<ListItem> = sources
        .unfollowed
        .iter()
        .map(|source| {
            ListItem::new(format!("{}  {}", source.display_title(), source.xml_url))
        })
        .collect();

    let title = format!(
        " Unfollowed sources ({}) | following {} ",
        sources.unfollowed.len(),
        sources.followed.len()
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.source_list_state);
}

fn render_status_bar(
    frame: &mut Frame,
    app: &TuiApp,
    state: &AppState,
    keys: &KeybindingConfig,
    area: Rect,
) {
    let (loading, error) = match app.screen {
        Screen::Login => (state.login.loading, None),
        Screen::Stream => (state.stream.loading, state.stream.error.as_ref()),
        Screen::Sources => (state.sources.loading, state.sources.error.as_ref()),
    };

    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if loading {
        "Loading...".to_string()
    } else if let Some(error) = error {
        format!("Error: {}", error.joined())
    } else {
        key_hints(app.screen, keys)
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Status bar help line, built from the configured bindings.
fn key_hints(screen: Screen, keys: &KeybindingConfig) -> String {
    let quit = hint(&keys.quit);
    let toggle = hint(&keys.toggle_sources);
    let reload = hint(&keys.reload);
    match screen {
        // The login form has a fixed keymap.
        Screen::Login => "Tab:Field  Enter:Login  Esc:Quit".to_string(),
        Screen::Stream => format!(
            "{}:Next  {}:Previous  {}:Read  {}:Open  {}:Reload  {}:Sources  {}:Quit",
            hint(&keys.next_feed),
            hint(&keys.previous_feed),
            hint(&keys.read_feed),
            hint(&keys.open_in_browser),
            reload,
            toggle,
            quit
        ),
        Screen::Sources => format!(
            "{}/{}:Nav  {}:Follow  {}:Feeds of source  {}:Reload  {}:Stream  {}:Quit",
            hint(&keys.next_feed),
            hint(&keys.previous_feed),
            hint(&keys.follow_source),
            hint(&keys.read_feed),
            reload,
            toggle,
            quit
        ),
    }
}

/// Drop tags, collapse whitespace and decode entities.
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;
    let mut last_was_space = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => {
                if c.is_whitespace() {
                    if !last_was_space {
                        result.push(' ');
                        last_was_space = true;
                    }
                } else {
                    result.push(c);
                    last_was_space = false;
                }
            }
            _ => {}
        }
    }

    html_escape::decode_html_entities(result.trim()).into_owned()
}
