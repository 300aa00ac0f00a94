//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `domain_longevity` library that handles argument
//! parsing, `.env` loading, logger setup, input/output files and the final
//! summary. A domain that fails to analyze never fails the run.

use std::process;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use domain_longevity::app::{print_batch_summary, print_error_statistics, read_domains, BatchSummary};
use domain_longevity::config::Opt;
use domain_longevity::export::write_reports;
use domain_longevity::initialization::init_logger_with;
use domain_longevity::{Analyzer, Config, LongLiveDomains, ProcessingStats};

#[tokio::main]
async fn main() {
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    if let Err(e) = run(opt).await {
        eprintln!("domain_longevity error: {e:#}");
        process::exit(1);
    }
}

async fn run(opt: Opt) -> Result<()> {
    init_logger_with(opt.log_level.clone().into(), opt.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = Config::from(&opt);
    config.validate().context("Invalid configuration")?;

    let long_live = Arc::new(LongLiveDomains::load(config.long_live_path.as_deref()));
    let domains = read_domains(&opt.file).await?;
    info!("Read {} domains from {}", domains.len(), opt.file.display());

    let start = Instant::now();
    let stats = Arc::new(ProcessingStats::new());
    let mode = config.batch_mode();
    let analyzer = Analyzer::with_stats(config, long_live, Arc::clone(&stats));
    let reports = analyzer.analyze_many(&domains, mode).await;

    let written = write_reports(&reports, opt.format, opt.output.as_deref())?;
    if let Some(path) = &opt.output {
        info!("Wrote {written} reports to {}", path.display());
    }

    print_error_statistics(&stats);
    print_batch_summary(
        &BatchSummary::from_reports(&reports),
        start.elapsed().as_secs_f64(),
    );
    Ok(())
}
