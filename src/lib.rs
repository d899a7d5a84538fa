//! # Mindstream
//!
//! A terminal client for the mindstream feed reader.
//!
//! ## Architecture
//!
//! State lives in a single [`Store`](store::Store) and changes only through
//! pure reducers, one action at a time. Network calls happen in epics:
//!
//! ```text
//! intent → dispatch → reducers → new state
//!                   ↘ epic → Api → result action → dispatch
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! mindstream login --email me@example.com --password secret
//! mindstream sources add https://blog.rust-lang.org/feed.xml
//! mindstream stream
//! mindstream tui
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the configuration, the API client
/// and the stored session together.
pub mod app;

/// Backend access.
///
/// - [`Api`](api::Api): async trait with every backend call the epics make
/// - [`GraphqlApi`](api::GraphqlApi): reqwest implementation over GraphQL
pub mod api;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/mindstream/config.toml`.
pub mod config;

/// Value types shared by every module: [`Feed`](domain::Feed),
/// [`Source`](domain::Source), [`ApiError`](domain::ApiError).
pub mod domain;

/// Credentials, the login request and the login form.
pub mod login;

/// Adding, listing and following sources.
pub mod sources;

/// State container, root reducer and epic runner.
pub mod store;

/// The stream of unread feeds with next/previous navigation.
pub mod stream;

/// Terminal user interface.
///
/// Login, stream and sources screens. Keybindings come from the config:
/// n/p navigate, r reads, R reloads, Tab switches to sources, q quits.
pub mod tui;
