//! Fetch NOAA weather alerts into SQLite, then print the reports.

use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use database::Database;
use noaa_feed::FeedClient;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use weather_alerts::{ingest, render_report, report, Args, OutputFormat, Result};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Run failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let db = Database::connect(&args.database_url).await?;
    db.migrate().await?;

    if args.skip_ingest {
        info!("Skipping ingestion");
    } else {
        let client = FeedClient::new(args.feed_config())?;
        let summary = ingest(&client, &db, args.malformed_policy()).await?;
        info!(written = summary.written, "Stored alerts");
    }

    let report = report(&db, Utc::now(), args.report_limit()).await?;
    match args.format {
        OutputFormat::Table => print!("{}", render_report(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    db.close().await;
    Ok(())
}
