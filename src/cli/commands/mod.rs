//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod projects;
mod resolve;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "vidfolio")]
#[command(about = "Portfolio backend for freelance video editors")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides config file and VIDFOLIO_DATA_DIR)
    #[arg(long, short = 'd', global = true)]
    data: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: 127.0.0.1:3030)
        bind: Option<String>,

        /// Keep all data in memory (nothing is written to disk)
        #[arg(long)]
        ephemeral: bool,
    },

    /// Resolve a video link to its platform, ID and thumbnail
    Resolve {
        /// YouTube or Google Drive link, or a bare video ID
        link: String,

        /// Treat the input as a Google Drive link or bare Drive ID
        #[arg(long)]
        drive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the project gallery
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List all projects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration (secrets redacted)
    Show,

    /// Get a single configuration value by dotted path (e.g. llm.model)
    Get {
        /// Setting path
        setting: String,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        data_dir: cli.data,
    };
    let (settings, config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Serve { bind, ephemeral } => {
            let bind = bind
                .or_else(|| settings.bind.clone())
                .unwrap_or_else(|| "127.0.0.1:3030".to_string());
            serve::cmd_serve(&settings, &bind, ephemeral).await
        }
        Commands::Resolve { link, drive, json } => resolve::cmd_resolve(&link, drive, json),
        Commands::Projects { command } => match command {
            ProjectCommands::List { json } => projects::cmd_projects_list(&settings, json).await,
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&settings, &config),
            ConfigCommands::Get { setting } => config_cmd::cmd_config_get(&config, &setting),
        },
    }
}
