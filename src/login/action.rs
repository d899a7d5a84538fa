use serde::{Deserialize, Serialize};

use crate::domain::ApiError;

/// Editable fields of the login form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    pub fn as_str(self) -> &'static str {
        match self {
            LoginField::Email => "email",
            LoginField::Password => "password",
        }
    }

    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoginAction {
    #[serde(rename = "CHANGE_FIELD")]
    ChangeField { field: LoginField, value: String },
    #[serde(rename = "LOGIN")]
    Login { email: String, password: String },
    #[serde(rename = "LOGIN_SUCCESS")]
    LoginSucceeded { token: String },
    #[serde(rename = "LOGIN_ERROR")]
    LoginFailed { error: ApiError },
    #[serde(rename = "SIGNUP")]
    Signup {
        login: String,
        email: String,
        password: String,
    },
    #[serde(rename = "SIGNUP_SUCCESS")]
    SignupSucceeded { token: String },
    #[serde(rename = "SIGNUP_ERROR")]
    SignupFailed { error: ApiError },
}

impl LoginAction {
    pub fn kind(&self) -> &'static str {
        match self {
            LoginAction::ChangeField { .. } => "CHANGE_FIELD",
            LoginAction::Login { .. } => "LOGIN",
            LoginAction::LoginSucceeded { .. } => "LOGIN_SUCCESS",
            LoginAction::LoginFailed { .. } => "LOGIN_ERROR",
            LoginAction::Signup { .. } => "SIGNUP",
            LoginAction::SignupSucceeded { .. } => "SIGNUP_SUCCESS",
            LoginAction::SignupFailed { .. } => "SIGNUP_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_field_wire_shape() {
        let action = LoginAction::ChangeField {
            field: LoginField::Password,
            value: "secret".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({ "type": "CHANGE_FIELD", "field": "password", "value": "secret" })
        );
    }

    #[test]
    fn test_signup_wire_shape() {
        let action = LoginAction::Signup {
            login: "me".to_string(),
            email: "me@example.com".to_string(),
            password: "secret".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({ "type": "SIGNUP", "login": "me", "email": "me@example.com", "password": "secret" })
        );
        assert_eq!(action.kind(), "SIGNUP");
    }

    #[test]
    fn test_field_cycle() {
        assert_eq!(LoginField::Email.next(), LoginField::Password);
        assert_eq!(LoginField::Password.next(), LoginField::Email);
        assert_eq!(LoginField::Email.as_str(), "email");
    }
}
