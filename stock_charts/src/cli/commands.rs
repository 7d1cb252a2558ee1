use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{AppConfig, ProviderKind};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a TOML config file (every key is optional)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fallback log filter when RUST_LOG is unset (e.g. "debug")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dataset dashboard: JSON-lines events on stdin, price and volume charts on stdout
    Dashboard {
        /// CSV dataset with identifier, date, open, high, low, close and volume columns
        #[arg(long)]
        data: Option<PathBuf>,

        /// Entity selected at startup
        #[arg(long)]
        symbol: Option<String>,
    },

    /// Live comparison dashboard: JSON-lines events on stdin, one overlay chart on stdout
    Watch(ComparisonArgs),

    /// Interactive comparison prompt
    Compare {
        #[command(flatten)]
        args: ComparisonArgs,

        /// How charts are printed
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args, Debug, Default)]
pub struct ComparisonArgs {
    /// Where series are fetched from
    #[arg(long, value_enum)]
    pub source: Option<ProviderKind>,

    /// CSV dataset used when the source is "dataset"
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// First day fetched and displayed (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day fetched and displayed (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Seconds to wait for one fetch before giving up
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl ComparisonArgs {
    /// Layers these flags over `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(source) = self.source {
            config.provider.kind = source;
        }
        if let Some(data) = &self.data {
            config.dataset.path = data.clone();
        }
        if let Some(start) = self.start {
            config.comparison.start = start;
        }
        if let Some(end) = self.end {
            config.comparison.end = end;
        }
        if let Some(timeout) = self.timeout_secs {
            config.provider.timeout_secs = timeout;
        }
    }
}
