//! Main CLI application structure

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use super::catalog_cmd::{self, CatalogKind};
use super::emit_cmd;
use super::logging::init_logging;
use super::output::{Output, OutputFormat};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "azlog")]
#[command(author, version, about = "Format Azure Pipelines logging commands")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format for listings and errors (defaults to the configured one)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default locations
    #[arg(long, global = true, env = "AZLOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a structured `##vso[family.action]` command
    Command {
        /// Command family (artifact, build, release, task)
        family: String,

        /// Action within the family
        action: String,

        /// Property assignment, repeatable
        #[arg(long = "property", short = 'p', value_name = "KEY=VALUE")]
        properties: Vec<String>,

        /// Message following the command
        #[arg(default_value = "", allow_hyphen_values = true)]
        message: String,
    },

    /// Print `##[format]` marker lines, one per message
    Format {
        /// Format name (debug, error, warning, command, group, endgroup, ...)
        name: String,

        /// Messages, one marker line each
        #[arg(allow_hyphen_values = true)]
        messages: Vec<String>,

        /// Split each message on embedded line breaks first
        #[arg(long)]
        split: bool,
    },

    /// List known commands and formats
    Catalog {
        #[arg(value_enum, default_value_t = CatalogKind::All)]
        kind: CatalogKind,
    },
}

/// Main entry point for the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!("azlog starting");

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Output::new(cli.format.unwrap_or_default()).error(&format!("{:#}", e));
            return ExitCode::FAILURE;
        }
    };
    debug!(source = ?config.source, "configuration loaded");

    let output = Output::new(cli.format.unwrap_or(config.settings.default_format));
    match execute(cli.command, &config, &output) {
        Ok(()) => {
            debug!("command completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            output.error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Commands, config: &Config, output: &Output) -> Result<()> {
    match command {
        Commands::Command {
            family,
            action,
            properties,
            message,
        } => emit_cmd::command(output, &family, &action, &properties, &message),

        Commands::Format {
            name,
            messages,
            split,
        } => emit_cmd::format(output, config, &name, &messages, split),

        Commands::Catalog { kind } => catalog_cmd::run(output, config, kind),
    }
}
