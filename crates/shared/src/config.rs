//! Application configuration management.
//!
//! Every field carries a default, so a run with no config files and no
//! `MARKETDATA__*` variables reads the bundled workbook path and prints a
//! text report.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Spreadsheet source configuration.
    pub source: SourceConfig,
    /// Report catalog configuration.
    pub report: ReportConfig,
    /// Output configuration.
    pub output: OutputConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Spreadsheet source configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the workbook.
    pub path: PathBuf,
    /// Worksheet holding sales transactions.
    pub sales_sheet: String,
    /// Worksheet holding the product catalog.
    pub products_sheet: String,
    /// `chrono` pattern for text date cells.
    pub date_format: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/Cópia de Teste visualização de dados.xlsx"),
            sales_sheet: "vendas".to_string(),
            products_sheet: "produtos".to_string(),
            date_format: "%d-%m-%y".to_string(),
        }
    }
}

/// Report catalog configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Product name used by the best-day-for-product report (exact match).
    pub featured_product: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            featured_product: "Banana".to_string(),
        }
    }
}

/// Output format of the final report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format.
    pub format: OutputFormat,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON log lines instead of the compact format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "marketdata=info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MARKETDATA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
