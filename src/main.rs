//! CLI entry point for bad-lemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bad-lemon")]
#[command(version)]
#[command(about = "Build-time content pipeline for a markdown technical blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate posts.json, search.json and feed.xml
    #[command(alias = "g")]
    Generate,

    /// List site information
    List {
        /// Type of content to list (post, tag, category, archive)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Search posts by title, description, tag, category or body
    Search {
        /// Search query
        query: String,
    },

    /// Show a post's metadata and table of contents
    Show {
        /// Post id
        id: String,
    },

    /// List recently viewed posts
    Recent {
        /// Forget recently viewed posts
        #[arg(long)]
        clear: bool,
    },

    /// Show or set the theme preference
    Theme {
        /// light, dark or toggle
        value: Option<String>,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bad_lemon=debug,info"
    } else {
        "bad_lemon=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    if let Commands::Version = cli.command {
        println!("bad-lemon version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let blog = bad_lemon::Blog::new(&base_dir)?;

    match cli.command {
        Commands::Generate => {
            tracing::info!("Generating from {:?}...", blog.posts_dir);
            blog.generate()?;
            println!("Generated successfully!");
        }

        Commands::List { r#type } => {
            bad_lemon::commands::list::run(&blog, &r#type)?;
        }

        Commands::Search { query } => {
            bad_lemon::commands::search::run(&blog, &query)?;
        }

        Commands::Show { id } => {
            bad_lemon::commands::show::run(&blog, &id)?;
        }

        Commands::Recent { clear } => {
            bad_lemon::commands::recent::run(&blog, clear)?;
        }

        Commands::Theme { value } => {
            bad_lemon::commands::theme::run(&blog, value.as_deref())?;
        }

        Commands::Clean => {
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {}
    }

    Ok(())
}
