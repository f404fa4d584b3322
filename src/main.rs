mod models;
mod repo;
mod service;
mod utils;

use crate::models::scan_config::{OutputFormat, ScanConfig};
use crate::repo::s3::S3Store;
use crate::service::scan::run_scan;
use crate::utils::progress::{create_spinner, ProgressWriter};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{debug, warn};
use std::io::{self, Write};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "s3-tidy")]
#[command(about = "Cloud governance tool for S3 cleanup")]
#[command(
    long_about = "Enforce retention policies on S3 buckets and estimate the cost savings of removing stale objects."
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off)
    #[arg(
        short = 'l',
        long = "log-level",
        default_value = "warn",
        env = "LOG_LEVEL",
        global = true
    )]
    log_level: String,

    /// Hide the progress spinner
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan bucket for stale objects
    Scan(ScanArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// Target S3 bucket name
    #[arg(short = 'b', long = "bucket", env = "S3_TIDY_BUCKET")]
    bucket: String,

    /// Age threshold in days
    #[arg(short = 'd', long = "days", default_value_t = 30)]
    days: u32,

    /// Simulate deletion without taking action (use --dry-run=false to delete)
    #[arg(
        long = "dry-run",
        action = ArgAction::Set,
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        require_equals = true
    )]
    dry_run: bool,

    /// Generate a cost-savings report without deleting
    #[arg(long = "report")]
    report: bool,

    /// Summary format; json prints one document holding the summary and every stale object
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

impl ScanArgs {
    fn into_config(self) -> ScanConfig {
        ScanConfig::new(self.bucket, self.days)
            .with_dry_run(self.dry_run)
            .with_report_only(self.report)
            .with_output(self.output)
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(&args.log_level);

    match cli_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_level: &str) {
    let log_level = match log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .init();
}

fn cli_main(args: Cli) -> Result<()> {
    let Some(Command::Scan(scan_args)) = args.command else {
        println!("Please use the 'scan' command. Try 's3-tidy scan --help'");
        return Ok(());
    };

    let config = scan_args.into_config();
    config.validate().context("Invalid scan arguments")?;
    debug!("Scan config: {:?}", &config);

    if config.mode().should_delete() {
        warn!("Live mode: stale objects in s3://{} will be deleted", config.bucket);
    }

    let store = S3Store::connect().context("Unable to load AWS SDK config")?;

    let spinner = if args.quiet {
        None
    } else {
        Some(create_spinner(&format!(
            "{}Listing s3://{}...",
            config.mode().progress_prefix(),
            config.bucket
        )))
    };

    let mut out = ProgressWriter::new(io::stdout().lock(), spinner.as_ref());
    let result = run_scan(&store, &config, Utc::now(), &mut out, spinner.as_ref());

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    result.context("Scan aborted")?;
    out.flush().context("Failed to flush scan output")?;
    Ok(())
}
