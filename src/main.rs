use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mindstream::app::AppContext;
use mindstream::cli::{commands, Cli, Commands, SourcesCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::login(&ctx, &email, &password).await?;
        }
        Commands::Signup {
            login,
            email,
            password,
        } => {
            commands::signup(&ctx, &login, &email, &password).await?;
        }
        Commands::Logout => {
            commands::logout(&ctx)?;
        }
        Commands::Sources { action } => match action {
            SourcesCommand::Add { url } => {
                commands::add_source(&ctx, &url).await?;
            }
            SourcesCommand::Unfollowed => {
                commands::list_unfollowed(&ctx).await?;
            }
            SourcesCommand::Followed => {
                commands::list_followed(&ctx).await?;
            }
            SourcesCommand::Follow { source } => {
                commands::follow_source(&ctx, &source).await?;
            }
        },
        Commands::Stream { source } => {
            commands::list_stream(&ctx, source).await?;
        }
        Commands::Read { uuid } => {
            commands::read_feed(&ctx, uuid).await?;
        }
        Commands::Tui => {
            mindstream::tui::run(&ctx).await?;
        }
    }

    Ok(())
}
