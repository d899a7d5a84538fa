use crate::domain::ApiError;
use crate::login::action::{LoginAction, LoginField};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<ApiError>,
    /// Session token once the backend accepted the credentials.
    pub token: Option<String>,
}

pub fn reduce(state: LoginState, action: &LoginAction) -> LoginState {
    match action {
        LoginAction::ChangeField { field, value } => match field {
            LoginField::Email => LoginState {
                email: value.clone(),
                ..state
            },
            LoginField::Password => LoginState {
                password: value.clone(),
                ..state
            },
        },
        LoginAction::Login { .. } | LoginAction::Signup { .. } => LoginState {
            loading: true,
            ..state
        },
        LoginAction::LoginSucceeded { token } | LoginAction::SignupSucceeded { token } => LoginState {
            loading: false,
            error: None,
            token: Some(token.clone()),
            password: String::new(),
            ..state
        },
        LoginAction::LoginFailed { error } | LoginAction::SignupFailed { error } => LoginState {
            loading: false,
            error: Some(error.clone()),
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_fields() {
        let state = reduce(
            LoginState::default(),
            &LoginAction::ChangeField {
                field: LoginField::Email,
                value: "me@example.com".to_string(),
            },
        );
        let state = reduce(
            state,
            &LoginAction::ChangeField {
                field: LoginField::Password,
                value: "hunter2".to_string(),
            },
        );
        assert_eq!(state.email, "me@example.com");
        assert_eq!(state.password, "hunter2");
    }

    #[test]
    fn test_login_failure_then_success() {
        let login = LoginAction::Login {
            email: "me@example.com".to_string(),
            password: "bad".to_string(),
        };
        let state = reduce(LoginState::default(), &login);
        assert!(state.loading);

        let state = reduce(
            state,
            &LoginAction::LoginFailed {
                error: ApiError::single("WrongCredentials"),
            },
        );
        assert!(!state.loading);
        assert!(state.token.is_none());

        let state = reduce(state, &login);
        let state = reduce(
            state,
            &LoginAction::LoginSucceeded {
                token: "jwt".to_string(),
            },
        );
        assert_eq!(state.token.as_deref(), Some("jwt"));
        assert!(state.error.is_none());
        assert!(state.password.is_empty());
    }

    #[test]
    fn test_signup_success_yields_session() {
        let state = reduce(
            LoginState::default(),
            &LoginAction::Signup {
                login: "me".to_string(),
                email: "me@example.com".to_string(),
                password: "secret".to_string(),
            },
        );
        assert!(state.loading);

        let state = reduce(
            state,
            &LoginAction::SignupFailed {
                error: ApiError::single("email already taken"),
            },
        );
        assert!(!state.loading);
        assert_eq!(state.error, Some(ApiError::single("email already taken")));

        let state = reduce(
            state,
            &LoginAction::SignupSucceeded {
                token: "jwt".to_string(),
            },
        );
        assert_eq!(state.token.as_deref(), Some("jwt"));
        assert!(state.error.is_none());
    }
}
