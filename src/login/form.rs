use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::domain::ApiError;
use crate::login::action::LoginField;
use crate::login::reducer::LoginState;

/// Receives the form's intents. The form never mutates its own props.
pub trait LoginFormHandler {
    fn on_change(&mut self, field: LoginField, value: String);
    fn on_submit(&mut self, email: &str, password: &str);
}

/// Stateless login form: props in, intents out.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn from_state(state: &LoginState, focus: LoginField) -> Self {
        Self {
            email: state.email.clone(),
            password: state.password.clone(),
            loading: state.loading,
            error: state.error.clone(),
            focus,
        }
    }

    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    pub fn change<H: LoginFormHandler + ?Sized>(
        &self,
        field: LoginField,
        value: String,
        handler: &mut H,
    ) {
        handler.on_change(field, value);
    }

    /// Submit the current credentials. Ignored while a login is in flight.
    pub fn submit<H: LoginFormHandler + ?Sized>(&self, handler: &mut H) {
        if !self.loading {
            handler.on_submit(&self.email, &self.password);
        }
    }

    /// Every error message joined by ", ", or `None` when there is nothing to show.
    pub fn error_message(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(ApiError::joined)
            .filter(|m| !m.is_empty())
    }

    fn field_block(&self, field: LoginField, title: &'static str) -> Block<'static> {
        let border_style = if self.focus == field {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
    }
}

impl Widget for &LoginForm {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Email
                Constraint::Length(3), // Password
                Constraint::Length(1), // Submit
                Constraint::Min(1),    // Error
            ])
            .split(area);

        Paragraph::new(self.email.as_str())
            .block(self.field_block(LoginField::Email, " Email "))
            .render(chunks[0], buf);

        Paragraph::new("*".repeat(self.password.chars().count()))
            .block(self.field_block(LoginField::Password, " Password "))
            .render(chunks[1], buf);

        let (label, style) = if self.loading {
            ("[ Logging in... ]", Style::default().fg(Color::DarkGray))
        } else {
            (
                "[ Login ]",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        };
        Paragraph::new(label).style(style).render(chunks[2], buf);

        let message = self.error_message().unwrap_or_default();
        Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);
    }
}
