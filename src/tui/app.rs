use ratatui::widgets::ListState;

use crate::domain::Source;
use crate::login::LoginField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Stream,
    Sources,
}

/// View-only state. Everything the backend knows about lives in the store.
pub struct TuiApp {
    pub screen: Screen,
    pub login_focus: LoginField,
    pub source_index: usize,
    pub source_list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new(screen: Screen) -> Self {
        Self {
            screen,
            login_focus: LoginField::Email,
            source_index: 0,
            source_list_state: ListState::default(),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn selected_source<'a>(&self, sources: &'a [Source]) -> Option<&'a Source> {
        sources.get(self.source_index)
    }

    pub fn move_source_up(&mut self) {
        if self.source_index > 0 {
            self.source_index -= 1;
        }
        self.source_list_state.select(Some(self.source_index));
    }

    pub fn move_source_down(&mut self, len: usize) {
        if len > 0 && self.source_index < len - 1 {
            self.source_index += 1;
        }
        self.source_list_state.select(Some(self.source_index));
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp_source_index(&mut self, len: usize) {
        if len == 0 {
            self.source_index = 0;
            self.source_list_state.select(None);
        } else {
            self.source_index = self.source_index.min(len - 1);
            self.source_list_state.select(Some(self.source_index));
        }
    }

    pub fn toggle_sources(&mut self) {
        self.screen = match self.screen {
            Screen::Sources => Screen::Stream,
            _ => Screen::Sources,
        };
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_selection_bounds() {
        let mut app = TuiApp::new(Screen::Sources);
        app.move_source_up();
        assert_eq!(app.source_index, 0);

        app.move_source_down(2);
        app.move_source_down(2);
        assert_eq!(app.source_index, 1);

        app.clamp_source_index(1);
        assert_eq!(app.source_index, 0);
        app.clamp_source_index(0);
        assert_eq!(app.source_list_state.selected(), None);
    }

    #[test]
    fn test_toggle_sources() {
        let mut app = TuiApp::new(Screen::Stream);
        app.toggle_sources();
        assert_eq!(app.screen, Screen::Sources);
        app.toggle_sources();
        assert_eq!(app.screen, Screen::Stream);
    }
}
