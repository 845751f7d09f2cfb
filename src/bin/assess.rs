//! Probix Assess
//!
//! Scores one symbol from a JSON file holding its short, medium and long
//! candle series and prints the assessment as JSON.
//!
//! Usage: assess <SYMBOL> <series.json>

use dotenvy::dotenv;
use probix::config::EngineConfig;
use probix::logging;
use probix::models::TimeframeSeries;
use probix::services::{AssessmentService, StaticMarketDataProvider};
use std::env;
use std::fs;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let (symbol, path) = match args.as_slice() {
        [symbol, path] => (symbol.clone(), path.clone()),
        _ => return Err("usage: assess <SYMBOL> <series.json>".into()),
    };

    let config = EngineConfig::from_env()?;
    config.log_warnings();

    let raw = fs::read_to_string(&path)?;
    let series: TimeframeSeries = serde_json::from_str(&raw)?;
    info!(
        symbol = %symbol,
        short = series.short.len(),
        medium = series.medium.len(),
        long = series.long.len(),
        "Loaded series"
    );

    let provider = Arc::new(StaticMarketDataProvider::new());
    provider.set(&symbol, series).await;

    let service = AssessmentService::from_config(provider, config);
    match service.assess(&symbol).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&*result)?);
            Ok(())
        }
        Err(e) => {
            error!(symbol = %symbol, error = %e, "No assessment");
            Err(e.into())
        }
    }
}
