use futures::future::{BoxFuture, FutureExt};

use crate::api::SharedApi;
use crate::login::action::LoginAction;

pub fn epic(api: SharedApi, action: &LoginAction) -> Option<BoxFuture<'static, LoginAction>> {
    match action {
        LoginAction::Login { email, password } => {
            let email = email.clone();
            let password = password.clone();
            Some(
                async move {
                    match api.login(&email, &password).await {
                        Ok(token) => {
                            tracing::info!(%email, "Logged in");
                            LoginAction::LoginSucceeded { token }
                        }
                        Err(error) => {
                            tracing::warn!(%error, %email, "Login failed");
                            LoginAction::LoginFailed { error }
                        }
                    }
                }
                .boxed(),
            )
        }
        LoginAction::Signup {
            login,
            email,
            password,
        } => {
            let login = login.clone();
            let email = email.clone();
            let password = password.clone();
            Some(
                async move {
                    match api.signup(&login, &email, &password).await {
                        Ok(token) => {
                            tracing::info!(%login, %email, "Signed up");
                            LoginAction::SignupSucceeded { token }
                        }
                        Err(error) => {
                            tracing::warn!(%error, %email, "Signup failed");
                            LoginAction::SignupFailed { error }
                        }
                    }
                }
                .boxed(),
            )
        }
        _ => None,
    }
}
