//! # inflow_outlook
//!
//! Command-line front end for the capital-inflow forecasting engine.

use clap::Parser;
use inflow_forecast::{
    EngineConfig, ErrorMarker, ForecastEngine, InformationCriterion, Outlook, OutlookSummary,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "inflow_outlook")]
#[command(about = "Forecast a country's capital inflows with a VAR model", long_about = None)]
struct Cli {
    /// Country to forecast, as written in the dataset
    #[arg(short, long)]
    country: String,

    /// Number of months to forecast (defaults to the configured horizon)
    #[arg(short, long)]
    steps: Option<usize>,

    /// Dataset CSV file (overrides the config file)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// JSON engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lag selection criterion (aic, bic, hqic, fpe)
    #[arg(long)]
    criterion: Option<InformationCriterion>,

    /// Write the combined result to this CSV file
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inflow_forecast=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a forecast was produced
fn run(cli: Cli) -> inflow_forecast::Result<bool> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }
    if let Some(criterion) = cli.criterion {
        config = config.with_criterion(criterion);
    }

    let steps = cli.steps.unwrap_or(config.default_steps);
    let engine = ForecastEngine::new(config);
    let outlook = engine.forecast(&cli.country, steps)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outlook)?);
    }

    match &outlook {
        Outlook::Ready {
            result,
            signal,
            lag,
        } => {
            if let Some(path) = &cli.export {
                result.to_csv_file(path)?;
            }
            if !cli.json {
                let summary = OutlookSummary::from_result(result)?;
                println!("Market: {}", cli.country);
                println!(
                    "History: {} months, forecast: {} months, lag order: {}{}",
                    result.history().len(),
                    result.forecast().len(),
                    lag.order(),
                    if lag.is_fallback() { " (fallback)" } else { "" }
                );
                println!("Signal: {}", signal);
                print!("{}", summary);
            }
            Ok(true)
        }
        Outlook::Empty { marker } => {
            eprintln!("{}", no_forecast_message(*marker));
            Ok(false)
        }
    }
}

/// Line printed when the dataset cannot support a forecast
fn no_forecast_message(marker: ErrorMarker) -> String {
    format!("No forecast: {}", marker)
}
