//! MarketData report runner
//!
//! Loads the configured workbook into an in-memory store, runs the report
//! catalog once and prints the result.

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use marketdata_app::MarketData;
use marketdata_core::reports::ReportService;
use marketdata_shared::config::{LoggingConfig, OutputFormat};
use marketdata_shared::{AppConfig, AppError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {err}");
            return ExitCode::from(AppError::from(err).exit_code());
        }
    };

    init_tracing(&config.logging);

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            err.downcast_ref::<AppError>()
                .map_or(ExitCode::FAILURE, |app| ExitCode::from(app.exit_code()))
        }
    }
}

/// Logs go to stderr so the report on stdout stays machine-readable.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            logging
                .json
                .then(|| fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!logging.json).then(|| fmt::layer().compact().with_writer(std::io::stderr)),
        )
        .init();
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let market = MarketData::new(config.source.clone())
        .await
        .context("Failed to open analytical store")?;

    let sales = market.load_sales().await.context("Failed to load sales")?;
    let products = market
        .load_products()
        .await
        .context("Failed to load products")?;
    info!(sales, products, "Workbook loaded");

    let report = market
        .run_all(&config.report.featured_product)
        .await
        .context("Failed to run reports")?;

    match config.output.format {
        OutputFormat::Text => print!("{}", ReportService::render_text(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
