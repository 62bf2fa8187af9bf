//! CLI for redirgen.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use redirgen_core::config::{self, Identifiers};
use redirgen_core::error::PipelineError;
use std::path::PathBuf;

use commands::{run_check, run_generate};

/// Top-level CLI: build `netlify.toml` redirects from a Google Sheet.
#[derive(Debug, Parser)]
#[command(name = "redirgen")]
#[command(about = "Validate redirect rules from a Google Sheet and write netlify.toml", long_about = None)]
pub struct Cli {
    /// Settings file (default: ~/.config/redirgen/config.toml, if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Dotenv file loaded before reading DOCUMENT_ID and SHEET_ID.
    #[arg(long, global = true, value_name = "PATH", default_value = ".env")]
    pub env_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch, validate and write the redirect config (default).
    Generate {
        /// Output file (default: netlify.toml, or output_path from settings).
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Fetch and validate only; never writes.
    Check,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<()> {
        config::load_env_file(&self.env_file).map_err(PipelineError::from)?;
        // Identifiers come first so a missing one is reported even if settings are broken.
        let ids = Identifiers::from_env().map_err(PipelineError::from)?;
        let settings = config::load(self.config.as_deref()).map_err(PipelineError::from)?;
        tracing::debug!("loaded settings: {:?}", settings);

        match self.command.unwrap_or(CliCommand::Generate { output: None }) {
            CliCommand::Generate { output } => {
                let output = output.unwrap_or_else(|| settings.output_path.clone());
                run_generate(&ids, &settings, &output)?;
            }
            CliCommand::Check => run_check(&ids, &settings)?,
        }

        Ok(())
    }
}
