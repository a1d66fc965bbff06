//! Command-line argument parsing
//!
//! ```text
//! sheet [-d DELIM] [--config PATH] COMMAND...
//! ```
//!
//! Everything after the options is the command list, passed through
//! verbatim so values such as `-` or `-5` reach the command parser.

use clap::Parser;
use std::path::PathBuf;

use crate::command::{parse_commands, CommandList};
use crate::config::SheetConfig;
use crate::error::Result;
use crate::row::{DelimiterSet, Limits};

/// A streaming table editor
#[derive(Parser, Debug)]
#[command(
    name = "sheet",
    version,
    about = "Edit delimiter-separated tables from stdin"
)]
pub struct CliArgs {
    /// Delimiter characters; the first one is used in the output
    #[arg(short = 'd', long = "delimiters", value_name = "DELIM")]
    pub delimiters: Option<String>,

    /// Read configuration from PATH instead of ~/.config/sheet/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Table editing, selection and data processing commands
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub commands: Vec<String>,
}

/// Everything the pipeline needs, resolved from CLI and config
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub delimiters: DelimiterSet,
    pub limits: Limits,
    pub commands: CommandList,
}

impl CliArgs {
    /// Load the configuration file this invocation points at
    pub fn load_config(&self) -> Result<SheetConfig> {
        match &self.config {
            Some(path) => SheetConfig::load_from(path),
            None => SheetConfig::load(),
        }
    }

    /// Resolve delimiters, limits and the command list
    pub fn into_run_config(self, config: &SheetConfig) -> Result<RunConfig> {
        let delimiters = config.delimiter_set(self.delimiters.as_deref())?;
        let limits = config.limits()?;
        let commands = parse_commands(self.commands.as_slice(), &delimiters)?;
        Ok(RunConfig {
            delimiters,
            limits,
            commands,
        })
    }
}
