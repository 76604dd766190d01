//! EstimAI CLI - Command-line interface for the EstimAI estimation service.

use clap::Parser;
use estimai_cli::commands;
use estimai_cli::{Cli, CliError, Command, Config, Formatter};
use estimai_client::ClientConfig;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        if !matches!(e, CliError::Cancelled) {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> estimai_cli::Result<()> {
    // Load or create config
    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path).unwrap_or_else(|e| {
        warn!("Ignoring unreadable config {}: {}", config_path.display(), e);
        Config::unreadable_at(&config_path)
    });

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    // Flags and environment override the active profile
    let overrides = ClientConfig {
        api_url: cli.api_url,
        storage_url: cli.storage_url,
        api_key: cli.api_key,
    };

    match cli.command {
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Command::Share(args) => {
            commands::execute_share(args, config.get_active_profile()?, &formatter)?;
        }
        cmd => {
            let client_config = config
                .get_active_profile()?
                .client_config()
                .merge(overrides.normalized());

            match cmd {
                Command::Estimate(args) => {
                    commands::execute_estimate(args, &client_config, &formatter).await?;
                }
                Command::Submit(args) => {
                    commands::execute_submit(args, &client_config, &formatter).await?;
                }
                Command::Poll(args) => {
                    commands::execute_poll(args, &client_config, &formatter).await?;
                }
                _ => unreachable!(),
            }
        }
    }

    Ok(())
}
