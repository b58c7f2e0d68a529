#![deny(unsafe_code)]

//! Phonebook CLI — an interactive phone directory with prefix search.

mod menu;
mod session;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use phonebook_config::AppConfig;
use phonebook_core::{ContactTrie, NamePolicy, SystemOpener, build_info};

use crate::session::Session;

/// Phonebook — store contacts and find them by name prefix.
#[derive(Parser)]
#[command(name = "phonebook", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "phonebook.toml")]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (the default).
    Run,

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_tracing(cli.verbose, &config.logging.level);

    info!(
        version = %build_info::version_string(),
        built = build_info::BUILD_TIMESTAMP,
        config = %cli.config.display(),
        "phonebook starting"
    );

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(&config)?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
    }

    Ok(())
}

/// Logs go to stderr so they never interleave with the menu on stdout.
/// `RUST_LOG` wins over `-v`, which wins over the config file.
fn init_tracing(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn new_trie(config: &AppConfig) -> Result<ContactTrie> {
    let policy: NamePolicy = config
        .directory
        .name_policy
        .parse()
        .context("invalid directory.name_policy")?;
    Ok(ContactTrie::with_policy(policy))
}

fn cmd_run(config: &AppConfig) -> Result<()> {
    let trie = new_trie(config)?;
    let opener = SystemOpener::from_config(&config.viewer);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(
        trie,
        opener,
        &config.directory.save_file,
        stdin.lock(),
        stdout.lock(),
    )
    .run()
    .context("terminal I/O failed")
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str = toml::to_string_pretty(config).context("failed to render configuration")?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        AppConfig::load(path).with_context(|| format!("failed to load {}", path.display()))
    } else {
        Ok(AppConfig::default())
    }
}
