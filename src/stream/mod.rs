//! The MindStream: a queue of unread feeds plus the history of feeds already
//! shown, navigable in both directions.

pub mod action;
pub mod epics;
pub mod reducer;

pub use action::StreamAction;
pub use reducer::{reduce, StreamState};
