use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use database::Database;
use dotenv::dotenv;
use risk_engine::ports::RiskStore;
use risk_engine::{summarize_history, RiskCalculator, ScoringConfig};
use risk_worker::config::WorkerConfig;
use risk_worker::jobs::Job;
use risk_worker::tasks::{calculate_risk, schedule};
use risk_worker::RiskWorker;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "risk-worker", about = "Outbreak risk scoring worker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single region
    Calculate {
        #[arg(long)]
        region: Uuid,
        /// Score date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Score every region
    CalculateAll {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Run the daily batch at the configured UTC time
    Schedule {
        /// Also run a batch immediately on startup
        #[arg(long)]
        run_now: bool,
    },
    /// Show the most recent score of every region
    Latest,
    /// Show a region's recent risk trend
    History {
        #[arg(long)]
        region: Uuid,
        /// Days to look back, 1 to 3650
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=3650))]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = WorkerConfig::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    db.health_check().await?;
    tracing::info!("Connected to database");

    let scoring = ScoringConfig::default();
    scoring.validate().context("Invalid scoring configuration")?;
    let calculator = Arc::new(RiskCalculator::new(db.risk_stores(), scoring));
    tracing::info!(
        "Scoring with algorithm version {}",
        calculator.config().algorithm_version
    );

    match cli.command {
        Command::Calculate { region, date } => {
            let result = calculator.calculate_for_region(region, date).await?;
            print_json(&result)?;
        }
        Command::CalculateAll { date } => {
            let (entries, _summary) = calculate_risk::run_batch(&calculator, date).await?;
            print_json(&entries)?;
        }
        Command::Schedule { run_now } => {
            let (tx, rx) = tokio::sync::mpsc::channel::<Job>(16);
            if run_now {
                tx.send(Job::CalculateAll { score_date: None }).await?;
            }
            tokio::spawn(schedule::run_daily(
                tx,
                config.schedule_hour,
                config.schedule_minute,
            ));
            RiskWorker::new(calculator, rx).run().await?;
        }
        Command::Latest => {
            let records = db.risk_stores().risks.latest_per_region().await?;
            print_json(&records)?;
        }
        Command::History { region, days } => {
            let since = Utc::now().date_naive() - Duration::days(i64::from(days));
            let records = db.risk_stores().risks.history(region, since).await?;
            print_json(&summarize_history(&records))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
