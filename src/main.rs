//! JFlix CLI
//!
//! Resolve embed URLs and drive the player navigation from the terminal.

use clap::Parser;
use jflix_player::cli::{
    args::{Cli, Commands, GuideAction},
    commands::{self, guide, play, providers, resolve},
};
use jflix_player::core::registry::ProviderRegistry;
use jflix_player::core::resolver::PlaybackResolver;
use jflix_player::models::config::load_config;
use jflix_player::services::tmdb::TmdbClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = load_config();
    let site = cli.site.unwrap_or(config.site);
    let registry = ProviderRegistry::with_default(site, config.default_provider.as_deref());

    // Run the appropriate command
    match cli.command {
        Commands::Providers => {
            providers::list_providers(&registry)?;
        }

        Commands::Resolve {
            id,
            kind,
            season,
            episode,
            provider,
            title,
            format,
        } => {
            let request = resolve::ResolveRequest {
                id,
                kind,
                season,
                episode,
                provider,
                title,
            };
            resolve::resolve(&PlaybackResolver::new(registry), &request, &format)?;
        }

        Commands::Play {
            id,
            kind,
            provider,
            season,
            episode,
            ephemeral,
            format,
        } => {
            let tmdb = match TmdbClient::from_config(&config.tmdb) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("{}", e);
                    None
                }
            };
            let store = commands::open_store(&config.state_file, ephemeral);
            let request = play::PlayRequest {
                id,
                kind,
                provider,
                season,
                episode,
            };
            play::play(
                PlaybackResolver::new(registry),
                tmdb.as_ref(),
                store,
                &request,
                &format,
            )
            .await?;
        }

        Commands::Guide { action } => {
            let mut store = commands::open_store(&config.state_file, false);
            match action {
                GuideAction::Status => {
                    guide::status(&registry, &*store)?;
                }
                GuideAction::Ack { provider } => {
                    guide::acknowledge(&registry, &mut *store, &provider)?;
                }
            }
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("jflix_player=debug")
    } else {
        EnvFilter::new("jflix_player=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
