use crate::models::error::Result;
use crate::models::object_record::ObjectRecord;
use crate::models::scan_config::OutputFormat;
use crate::models::scan_mode::ScanMode;
use crate::models::scan_result::{ScanResult, ScanSummary, PRICE_PER_GB};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::Write;

const SEPARATOR: &str = "------------------------------------------------";

pub fn write_header<W: Write>(
    out: &mut W,
    bucket: &str,
    cutoff: DateTime<Utc>,
    days: u32,
) -> Result<()> {
    writeln!(
        out,
        "🔍 Scanning 's3://{}' for objects older than {} ({} days)...",
        bucket,
        cutoff.format("%Y-%m-%d"),
        days
    )?;
    Ok(())
}

pub fn write_would_delete<W: Write>(out: &mut W, record: &ObjectRecord) -> Result<()> {
    writeln!(
        out,
        "[DRY RUN] Would delete: {} ({}, {:.2} MB)",
        record.key,
        record.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
        record.size_in_mebibytes()
    )?;
    Ok(())
}

pub fn write_deleted<W: Write>(out: &mut W, key: &str) -> Result<()> {
    writeln!(out, "🗑️ DELETED: {}", key)?;
    Ok(())
}

/// Write the end-of-scan summary for the given mode
pub fn write_summary<W: Write>(
    out: &mut W,
    result: &ScanResult,
    mode: ScanMode,
    format: OutputFormat,
    summary: &ScanSummary,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, summary)?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text_summary(out, result, mode)?,
    }
    Ok(())
}

fn write_text_summary<W: Write>(out: &mut W, result: &ScanResult, mode: ScanMode) -> Result<()> {
    let cost = result.cost_estimate();
    writeln!(out, "{}", SEPARATOR)?;

    match mode {
        ScanMode::ReportOnly => {
            writeln!(out, "📊 FINOPS COST REPORT")?;
            writeln!(out, "   • Stale Objects Found: {}", result.stale_count)?;
            writeln!(
                out,
                "   • Total Storage Reclaimable: {:.4} GB",
                cost.gigabytes
            )?;
            writeln!(
                out,
                "   • Estimated Monthly Savings: ${:.4}",
                cost.monthly_savings_usd
            )?;
            writeln!(
                out,
                "   (Based on S3 Standard pricing of ~${}/GB)",
                PRICE_PER_GB
            )?;
        }
        ScanMode::DryRun => {
            writeln!(
                out,
                "✅ Dry run complete. Found {} stale objects ({:.2} GB).",
                result.stale_count, cost.gigabytes
            )?;
            writeln!(out, "   Run with --dry-run=false to execute cleanup.")?;
        }
        ScanMode::Execute => {
            writeln!(
                out,
                "✅ Cleanup complete. Deleted {} objects.",
                result.deleted_count
            )?;
        }
    }
    Ok(())
}
