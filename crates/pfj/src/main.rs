//! pfj - render chart markup and look up design catalogs.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "pfj")]
#[command(about = "Render chart markup and look up icons, tokens and snippets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to pfj.toml config file
    #[arg(short, long, default_value = "pfj.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default pfj.toml and an example chart
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Render a markup file and print the render passes as JSON
    Render {
        /// Markup file containing chart elements
        file: PathBuf,

        /// Deliver change notifications synchronously
        #[arg(long)]
        sync: bool,

        /// Print compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List the chart tags and the components they render
    Tags,

    /// Show an icon
    Icon {
        /// Icon set (e.g. "fas", "patternfly")
        set: String,

        /// Icon id
        id: String,
    },

    /// Show a design token
    Token {
        /// Token name
        name: String,
    },

    /// Print a code snippet
    Snippet {
        /// Snippet name
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => commands::init::run(&cli.config, yes),
        Commands::Render {
            file,
            sync,
            compact,
        } => {
            let config = config::load_config(&cli.config)?;
            commands::render::run(&file, &config, sync, compact)
        }
        Commands::Tags => commands::tags::run(),
        Commands::Icon { set, id } => {
            let config = config::load_config(&cli.config)?;
            commands::catalog::icon(&config, &set, &id)
        }
        Commands::Token { name } => {
            let config = config::load_config(&cli.config)?;
            commands::catalog::token(&config, &name)
        }
        Commands::Snippet { name } => {
            let config = config::load_config(&cli.config)?;
            commands::catalog::snippet(&config, &name)
        }
    }
}
