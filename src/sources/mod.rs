//! Source management: add a source by url, list the sources the user does
//! not follow yet, follow one of them.

pub mod action;
pub mod epics;
pub mod reducer;

pub use action::SourcesAction;
pub use reducer::{reduce, SourcesState};
