//! Keybinding configuration for the TUI.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::KeyAction;

/// Keys bound to each action of the Stream and Sources screens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub next_feed: Vec<String>,
    pub previous_feed: Vec<String>,
    pub read_feed: Vec<String>,
    pub reload: Vec<String>,
    pub open_in_browser: Vec<String>,
    pub toggle_sources: Vec<String>,
    pub follow_source: Vec<String>,
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            next_feed: keys(&["n", "j", "Right"]),
            previous_feed: keys(&["p", "k", "Left"]),
            read_feed: keys(&["r", "Enter"]),
            reload: keys(&["R"]),
            open_in_browser: keys(&["o"]),
            toggle_sources: keys(&["Tab"]),
            follow_source: keys(&["f"]),
        }
    }
}

impl KeybindingConfig {
    /// Action bound to a key event. The first matching action wins.
    pub fn get_action(&self, key: &KeyEvent) -> KeyAction {
        let table = [
            (&self.quit, KeyAction::Quit),
            (&self.next_feed, KeyAction::NextFeed),
            (&self.previous_feed, KeyAction::PreviousFeed),
            (&self.read_feed, KeyAction::ReadFeed),
            (&self.reload, KeyAction::Reload),
            (&self.open_in_browser, KeyAction::OpenInBrowser),
            (&self.toggle_sources, KeyAction::ToggleSources),
            (&self.follow_source, KeyAction::FollowSource),
        ];
        table
            .into_iter()
            .find(|(bindings, _)| any_matches(bindings, key))
            .map(|(_, action)| action)
            .unwrap_or(KeyAction::None)
    }
}

fn any_matches(bindings: &[String], key: &KeyEvent) -> bool {
    bindings
        .iter()
        .filter_map(|b| b.parse::<KeyBinding>().ok())
        .any(|b| b.matches(key))
}

/// Label shown in the status bar for an action: its first valid binding.
pub fn hint(bindings: &[String]) -> &str {
    bindings
        .iter()
        .find(|b| b.parse::<KeyBinding>().is_ok())
        .map(String::as_str)
        .unwrap_or("?")
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Shift is ignored when the binding doesn't ask for it, so "R" matches
    /// the Shift+R event terminals report.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Accepted forms: a single character ("a", "R", "/"), one of Enter, Tab,
/// BackTab, Up, Down, Left, Right, Esc, Space, optionally prefixed by
/// `Ctrl+`, `Shift+` or `Alt+` ("Ctrl+c").
impl FromStr for KeyBinding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (prefix, key) = match s.rsplit_once('+') {
            // A lone "+" is the plus key.
            Some((prefix, "")) if prefix.is_empty() => ("", "+"),
            Some(split) => split,
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for name in prefix.split('+').filter(|n| !n.is_empty()) {
            modifiers |= match name.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "shift" => KeyModifiers::SHIFT,
                "alt" => KeyModifiers::ALT,
                _ => return Err(format!("Unknown modifier: {}", name)),
            };
        }

        Ok(KeyBinding {
            code: key_code(key)?,
            modifiers,
        })
    }
}

fn key_code(name: &str) -> Result<KeyCode, String> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let code = match name.to_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        _ => return Err(format!("Unknown key: {}", name)),
    };
    Ok(code)
}
