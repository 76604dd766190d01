//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// EstimAI CLI - Turn project requirements into effort estimates.
#[derive(Debug, Parser)]
#[command(name = "estimai")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Estimation service base URL (overrides the profile)
    #[arg(long, global = true, env = "ESTIMAI_API_URL")]
    pub api_url: Option<String>,

    /// Result storage base URL (overrides the profile)
    #[arg(long, global = true, env = "ESTIMAI_STORAGE_URL")]
    pub storage_url: Option<String>,

    /// API key sent as x-api-key (overrides the profile)
    #[arg(long, global = true, env = "ESTIMAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Panels and tables (default)
    Table,
    /// Normalized JSON document
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit requirements and wait for the estimate
    Estimate(EstimateArgs),

    /// Submit requirements and print the job id
    Submit(SubmitArgs),

    /// Wait for the estimate of an existing job
    Poll(PollArgs),

    /// Print the shareable link of a job
    Share(ShareArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Where the requirements text comes from.
#[derive(Debug, Parser)]
pub struct RequirementsInput {
    /// Requirements text
    pub requirements: Option<String>,

    /// Read requirements from a file
    #[arg(long)]
    pub file: Option<String>,

    /// Read requirements from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Additional information (deadlines, budget, team, constraints)
    #[arg(short, long, default_value = "")]
    pub info: String,
}

/// Arguments for the estimate command.
#[derive(Debug, Parser)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub input: RequirementsInput,

    /// Write estimativa_<id>.json into this directory
    #[arg(short, long)]
    pub export: Option<String>,
}

/// Arguments for the submit command.
#[derive(Debug, Parser)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub input: RequirementsInput,
}

/// Arguments for the poll command.
#[derive(Debug, Parser)]
pub struct PollArgs {
    /// Job id returned by submit
    pub id: String,

    /// Write estimativa_<id>.json into this directory
    #[arg(short, long)]
    pub export: Option<String>,
}

/// Arguments for the share command.
#[derive(Debug, Parser)]
pub struct ShareArgs {
    /// Job id
    pub id: String,

    /// Web origin hosting the results page (overrides the profile)
    #[arg(long)]
    pub origin: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Estimation service base URL
        #[arg(long)]
        url: Option<String>,
        /// Result storage base URL
        #[arg(long)]
        storage: Option<String>,
        /// API key
        #[arg(long)]
        key: Option<String>,
        /// Web origin used for share links
        #[arg(long)]
        origin: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_estimate_command() {
        let cli = Cli::try_parse_from([
            "estimai",
            "estimate",
            "Online store with payments",
            "--info",
            "3 devs",
            "--export",
            "/tmp",
        ])
        .unwrap();
        match cli.command {
            Command::Estimate(args) => {
                assert_eq!(args.input.requirements.as_deref(), Some("Online store with payments"));
                assert_eq!(args.input.info, "3 devs");
                assert_eq!(args.export.as_deref(), Some("/tmp"));
            }
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_poll_command_with_global_flags() {
        let cli = Cli::try_parse_from([
            "estimai",
            "poll",
            "job-1",
            "--format",
            "json",
            "--storage-url",
            "https://bucket.example.com",
        ])
        .unwrap();
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.storage_url.as_deref(), Some("https://bucket.example.com"));
        match cli.command {
            Command::Poll(args) => assert_eq!(args.id, "job-1"),
            _ => panic!("Expected Poll command"),
        }
    }

    #[test]
    fn test_profile_set_command() {
        let cli = Cli::try_parse_from([
            "estimai",
            "profile",
            "set",
            "prod",
            "--url",
            "https://api.example.com",
        ])
        .unwrap();
        match cli.command {
            Command::Profile(ProfileArgs {
                action: ProfileAction::Set { name, url, .. },
            }) => {
                assert_eq!(name, "prod");
                assert_eq!(url.as_deref(), Some("https://api.example.com"));
                assert!(cli.api_url.is_none());
            }
            _ => panic!("Expected profile set command"),
        }
    }
}
