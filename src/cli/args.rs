//! Command line argument definitions.

use crate::core::registry::SiteVariant;
use crate::models::media::MediaKind;
use clap::{Parser, Subcommand};

/// JFlix - resolve and navigate third-party embed players
#[derive(Parser, Debug)]
#[command(name = "jflix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Site variant (standard or premium); defaults to the configured site
    #[arg(long, global = true)]
    pub site: Option<SiteVariant>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the providers offered on a site
    Providers,

    /// Resolve the embed URL and frame attributes for a title
    Resolve {
        /// TMDB id
        #[arg(long)]
        id: String,

        /// Media kind: movie, tv, anime, korean, cartoon
        #[arg(short, long, default_value = "movie")]
        kind: MediaKind,

        /// Season number
        #[arg(short, long)]
        season: Option<u32>,

        /// Episode number
        #[arg(short, long)]
        episode: Option<u32>,

        /// Provider id or alias
        #[arg(short, long)]
        provider: Option<String>,

        /// Display title (needed for anime slugs)
        #[arg(short, long)]
        title: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Fetch metadata and drive the player navigation
    Play {
        /// TMDB id
        #[arg(long)]
        id: String,

        /// Media kind: movie, tv, anime, korean, cartoon
        #[arg(short, long, default_value = "tv")]
        kind: MediaKind,

        /// Provider id or alias
        #[arg(short, long)]
        provider: Option<String>,

        /// Season to open
        #[arg(short, long)]
        season: Option<u32>,

        /// Episode to play
        #[arg(short, long)]
        episode: Option<u32>,

        /// Do not read or write the local state file
        #[arg(long)]
        ephemeral: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Manage provider usage guides
    Guide {
        #[command(subcommand)]
        action: GuideAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum GuideAction {
    /// Show whether each provider guide would be displayed
    Status,

    /// Acknowledge a provider guide for 30 days
    Ack {
        /// Provider id or alias
        #[arg(value_name = "PROVIDER")]
        provider: String,
    },
}
