//! Application configuration.
//!
//! Values are resolved as defaults < TOML file < environment; the binary
//! then applies command-line flags on top.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared_utils::{
    config::{ConfigError, load_toml},
    env::get_env_override,
};

use crate::{errors::FilterError, models::selection::DateWindow, providers::yahoo::provider::BASE_URL};

/// Overrides `dataset.path`.
pub const DATASET_ENV: &str = "STOCK_CHARTS_DATASET";
/// Overrides `provider.user_agent`.
pub const USER_AGENT_ENV: &str = "STOCK_CHARTS_USER_AGENT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub dataset: DatasetConfig,
    pub provider: ProviderConfig,
    pub comparison: ComparisonConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dataset: DatasetConfig::default(),
            provider: ProviderConfig::default(),
            comparison: ComparisonConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    pub path: PathBuf,
    /// Entity selected when the dashboard starts. Falls back to the first
    /// entity in sorted order when absent or unknown.
    pub default_symbol: Option<String>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("all_stocks_5yr.csv"),
            default_symbol: Some("GOOGL".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Yahoo,
    Dataset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub base_url: String,
    /// Bounds both the HTTP request and the controller's wait for a fetch.
    pub timeout_secs: u64,
    pub requests_per_second: u32,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            base_url: BASE_URL.to_string(),
            timeout_secs: 10,
            requests_per_second: 2,
            user_agent: concat!("stock-charts/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub title: String,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MAX),
            title: "Stock Comparison".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `path` if given, then applies environment overrides and
    /// validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => load_toml(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Some(path) = get_env_override(DATASET_ENV) {
            self.dataset.path = PathBuf::from(path);
        }
        if let Some(agent) = get_env_override(USER_AGENT_ENV) {
            self.provider.user_agent = agent;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "provider.timeout_secs must be positive".to_string(),
            ));
        }
        if self.provider.requests_per_second == 0 {
            return Err(ConfigError::Invalid(
                "provider.requests_per_second must be positive".to_string(),
            ));
        }
        self.comparison_window()
            .map_err(|e| ConfigError::Invalid(format!("comparison window: {e}")))?;
        Ok(())
    }

    pub fn comparison_window(&self) -> Result<DateWindow, FilterError> {
        DateWindow::new(self.comparison.start, self.comparison.end)
    }

    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.provider.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use shared_utils::config::parse_toml;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config: AppConfig = parse_toml("", "inline").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.dataset.default_symbol.as_deref(), Some("GOOGL"));
        assert_eq!(config.provider.kind, ProviderKind::Yahoo);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: AppConfig = parse_toml(
            r#"
            [provider]
            kind = "dataset"

            [comparison]
            start = "2019-06-01"
            "#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::Dataset);
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(
            config.comparison.start,
            NaiveDate::from_ymd_opt(2019, 6, 1).unwrap()
        );
        assert_eq!(config.comparison.title, "Stock Comparison");
    }

    #[test]
    fn inverted_comparison_window_is_invalid() {
        let mut config = AppConfig::default();
        config.comparison.start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_toml::<AppConfig>("colour = \"red\"", "inline").is_err());
    }
}
