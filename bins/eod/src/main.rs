//! End-of-day accrual batch trigger.
//!
//! Usage:
//!   eod [--date YYYY-MM-DD]
//!
//! Runs the daily interest accrual over all active accounts and exits
//! non-zero when any account failed, so schedulers can alert on it.

use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corebank_db::repositories::accrual::AccrualRepository;
use corebank_db::connect;
use corebank_shared::AppConfig;

fn parse_args() -> anyhow::Result<NaiveDate> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("--date") => {
            let raw = args
                .next()
                .ok_or_else(|| anyhow::anyhow!("--date requires a value (YYYY-MM-DD)"))?;
            Ok(raw.parse()?)
        }
        Some(other) => anyhow::bail!("unknown argument: {other}"),
        None => Ok(Utc::now().date_naive()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "corebank=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let accrual_date = parse_args()?;

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    let repo = AccrualRepository::new(db, config.accrual.clone());
    let outcome = repo.run_accrual_batch(accrual_date).await?;

    for failure in &outcome.errors {
        error!(account_no = %failure.account_no, error = %failure.error, "account failed");
    }

    info!(
        accrual_date = %outcome.accrual_date,
        processed = outcome.processed,
        skipped = outcome.skipped,
        failed = outcome.errors.len(),
        "EOD accrual run finished"
    );

    if outcome.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
