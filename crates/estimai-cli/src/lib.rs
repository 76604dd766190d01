//! EstimAI CLI library.
//!
//! This library provides the core functionality for the EstimAI command-line interface,
//! including profile management, command execution, and rendering of estimations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
