use crate::config::DeskConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "circulation-desk")]
#[command(about = "Run circulation desk commands read as JSON lines from stdin")]
pub struct CliArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the loan period from the configuration
    #[arg(long)]
    pub loan_period_days: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl CliArgs {
    /// Loads the configuration file if one was given and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<DeskConfig> {
        let mut config = match &self.config {
            Some(path) => DeskConfig::from_file(path)?,
            None => DeskConfig::default(),
        };

        if let Some(days) = self.loan_period_days {
            config.library.loan_period_days = days;
        }

        Ok(config)
    }
}
