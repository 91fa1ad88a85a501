#![allow(async_fn_in_trait)]

mod cli;
mod config;
mod downloader;
mod error;
mod parser;
mod progress;
mod query;
mod remote;
mod retrieval;
mod types;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use config::Registry;
use error::DownloaderError;
use log::{error, info};
use progress::{IndicatifObserver, ProgressHub};
use std::process::ExitCode;
use std::time::Duration;
use types::{DownloadSummary, Location, TaskState};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    info!("Starting Sentinel-5P downloader");

    let cli = Cli::parse();
    info!(
        "CLI arguments parsed: location={}, pollutant={}, parallelism={:?}",
        cli.location, cli.pollutant, cli.parallelism
    );

    match run(cli).await {
        Ok(summary) => {
            print_summary(&summary);
            if summary.is_success() {
                println!("\n{}", "All downloads completed successfully".green());
                ExitCode::SUCCESS
            } else {
                error!("{} downloads failed", summary.failed_downloads);
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("Retrieval failed: {:#}", e);
            eprintln!("{} {:#}", "Retrieval failed:".red(), e);
            if let Some(hint) = e.downcast_ref::<DownloaderError>().and_then(known_names) {
                eprintln!("{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<DownloadSummary> {
    let mut registry = Registry::builtin();
    if let Some(footprint) = cli.footprint {
        registry = registry.with_location(Location {
            name: cli.location.clone(),
            footprint,
        });
    }

    let fetcher = remote::HttpFetch::new(
        &cli.username,
        &cli.password,
        Duration::from_secs(cli.timeout),
    )
    .context("building HTTP client")?;
    let downloader = downloader::Downloader::new(fetcher, cli.parallelism);

    let request = retrieval::Request {
        location: cli.location,
        pollutant: cli.pollutant,
        time_range: cli.range,
        root: cli.root,
        endpoint: cli.endpoint,
        rows: cli.rows,
    };

    let hub = ProgressHub::spawn(IndicatifObserver::new());
    let result = retrieval::retrieve(&registry, &request, &downloader, &hub.sink()).await;
    hub.await_all_settled().await?;

    Ok(result?)
}

fn known_names(e: &DownloaderError) -> Option<String> {
    let registry = Registry::builtin();
    let names: Vec<&str> = match e {
        DownloaderError::UnknownLocation(_) => {
            registry.locations().iter().map(|l| l.name.as_str()).collect()
        }
        DownloaderError::UnknownProduct(_) => {
            registry.products().iter().map(|p| p.key.as_str()).collect()
        }
        _ => return None,
    };
    Some(format!("Known values: {}", names.join(", ")))
}

fn print_summary(summary: &DownloadSummary) {
    let mb = |bytes: u64| bytes as f64 / 1_048_576.0;

    println!("\n{}", "Download Summary:".bold());
    println!("Total downloads: {} files", summary.total_downloads);
    if summary.total_downloads == 0 {
        println!("No datasets matched the search");
        return;
    }

    println!(
        "Success rate: {:.1}% ({} files)",
        (summary.successful_downloads as f64 / summary.total_downloads as f64) * 100.0,
        summary.successful_downloads.to_string().green()
    );
    println!(
        "Failure rate: {:.1}% ({} files)",
        (summary.failed_downloads as f64 / summary.total_downloads as f64) * 100.0,
        summary.failed_downloads.to_string().red()
    );
    println!("Total data transferred: {:.2} MB", mb(summary.total_bytes_downloaded));
    println!("Total duration: {:.2?}", summary.total_duration);

    if summary.successful_downloads > 0 {
        println!("\n{}", "Successful Downloads:".green().bold());
        for report in summary.reports.iter().filter(|r| r.state() == TaskState::Done) {
            println!(
                "✓ {} ({:.2} MB in {:.2?})",
                report.file_name().green(),
                mb(report.task.bytes_received),
                report.duration
            );
        }
    }

    if summary.failed_downloads > 0 {
        println!("\n{}", "Failed Downloads:".red().bold());
        for report in summary.failures() {
            println!(
                "✗ {} - Error: {}",
                report.file_name().red(),
                report.error.as_deref().unwrap_or("unknown")
            );
            println!("  URL: {}", report.task.item.download_link);
        }
    }
}
