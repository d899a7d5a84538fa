//! Login: credential state, the login request, and the form view contract.

pub mod action;
pub mod epics;
pub mod form;
pub mod reducer;

pub use action::{LoginAction, LoginField};
pub use form::{LoginForm, LoginFormHandler};
pub use reducer::{reduce, LoginState};
