use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};

use niche_scout::config::{Args, OutputFormat};
use niche_scout::fetch::YouTubeFetcher;
use niche_scout::orchestrator::run_query;
use niche_scout::render::render_report_markdown;
use niche_scout::viz_export::write_bundle;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize tracing (stderr, so stdout carries only the report)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    info!("Starting niche_scout");

    // Validate everything required before touching the network
    let req = args.to_request()?;
    let params = args.scoring_params();
    debug!("Request - {:?}, params={:?}", req, params);

    let fetcher = YouTubeFetcher::new(req.api_key())?;
    let report = run_query(&fetcher, &req, &params).await?;

    if let Some(ref out) = args.output_dir {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let dir = write_bundle(Path::new(out), &today, &req.query, &report)?;
        info!("Output written - directory={}", dir.display());
    }

    match args.format {
        OutputFormat::Markdown => print!("{}", render_report_markdown(&req.query, &report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
