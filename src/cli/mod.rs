pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mindstream")]
#[command(about = "A terminal client for the mindstream feed reader", long_about = None)]
pub struct Cli {
    /// Path to an alternative config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and store the session token
    Signup {
        #[arg(short, long)]
        login: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Manage sources
    Sources {
        #[command(subcommand)]
        action: SourcesCommand,
    },
    /// List unread feeds
    Stream {
        /// Only feeds from this source
        #[arg(short, long)]
        source: Option<uuid::Uuid>,
    },
    /// Mark a feed as read
    Read {
        /// UUID of the feed
        uuid: uuid::Uuid,
    },
    /// Launch the TUI
    Tui,
}

#[derive(Subcommand)]
pub enum SourcesCommand {
    /// Add a new source by the url of its RSS/Atom document
    Add {
        url: String,
    },
    /// List sources you don't follow yet
    Unfollowed,
    /// List sources you follow
    Followed,
    /// Follow a source
    Follow {
        /// UUID or xml url of an unfollowed source
        source: String,
    },
}
