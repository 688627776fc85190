//! gofast-site CLI - builds the Gofast documentation site.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use gofast_site_config::CONFIG_FILENAME;

mod commands;

#[derive(Parser)]
#[command(name = "gofast-site")]
#[command(about = "Static documentation site generator for Gofast")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to site.toml config file
    #[arg(short, long, global = true, default_value = CONFIG_FILENAME)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a site in the config file's directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the static site
    Build {
        /// Output directory (defaults to config or "build")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,

        /// Build a single locale
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Write translation catalogs with the default messages
    WriteTranslations {
        /// Only write this locale
        #[arg(short, long)]
        locale: Option<String>,
    },

    /// Remove the build output
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build {
            output,
            no_minify,
            locale,
        } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, output, minify, locale).await?;
        }
        Commands::WriteTranslations { locale } => {
            commands::write_translations::run(&cli.config, locale).await?;
        }
        Commands::Clear => {
            commands::clear::run(&cli.config).await?;
        }
    }

    Ok(())
}
