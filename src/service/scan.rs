use crate::models::error::Result;
use crate::models::object_record::ObjectRecord;
use crate::models::scan_config::{OutputFormat, ScanConfig};
use crate::models::scan_mode::ScanMode;
use crate::models::scan_result::{ScanResult, StaleAction, StaleObjectEntry};
use crate::repo::store::{list_pages, ObjectStore};
use crate::service::report::{write_deleted, write_header, write_summary, write_would_delete};
use crate::utils::progress::format_bytes;
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::io::Write;

/// Scan a bucket for objects older than the configured threshold.
///
/// With text output, per-object lines are streamed to `out` as records are
/// classified. With JSON output, `out` receives a single JSON document and the
/// per-object outcomes are folded into it. Either way the summary is written
/// only once every page has been consumed: a listing failure aborts the scan
/// before any summary is written. A failed delete is logged and the scan moves
/// on to the next record.
pub fn run_scan<S, W>(
    store: &S,
    config: &ScanConfig,
    now: DateTime<Utc>,
    out: &mut W,
    progress: Option<&ProgressBar>,
) -> Result<ScanResult>
where
    S: ObjectStore + ?Sized,
    W: Write,
{
    let mode = config.mode();
    let cutoff = config.cutoff(now)?;
    let streaming = config.output == OutputFormat::Text;

    if streaming {
        write_header(out, &config.bucket, cutoff, config.days)?;
    }
    info!(
        "Scanning s3://{} in {} mode, cutoff {}",
        config.bucket,
        mode.as_str(),
        cutoff.to_rfc3339()
    );

    let mut result = ScanResult::default();
    let mut entries = Vec::new();

    for (page_number, page) in list_pages(store, &config.bucket).enumerate() {
        let records = page?;
        debug!("Page {}: {} objects", page_number + 1, records.len());

        for record in &records {
            result.record_scanned();
            if !record.is_stale(cutoff) {
                continue;
            }

            result.record_stale(record);
            let entry = handle_stale(store, &config.bucket, mode, record, &mut result);
            if streaming {
                match entry.action {
                    StaleAction::WouldDelete => write_would_delete(out, record)?,
                    StaleAction::Deleted => write_deleted(out, &record.key)?,
                    StaleAction::Reported | StaleAction::DeleteFailed => {}
                }
            } else {
                entries.push(entry);
            }
        }

        if let Some(pb) = progress {
            pb.set_message(format!(
                "{}Scanned {} objects, {} stale ({})",
                mode.progress_prefix(),
                result.scanned_count,
                result.stale_count,
                format_bytes(result.stale_bytes)
            ));
        }
    }

    let summary = result.summary(&config.bucket, config.days, cutoff, mode, entries);
    write_summary(out, &result, mode, config.output, &summary)?;

    info!(
        "Scan of s3://{} finished: {} scanned, {} stale, {} deleted, {} failed",
        config.bucket,
        result.scanned_count,
        result.stale_count,
        result.deleted_count,
        result.failed_count
    );
    Ok(result)
}

/// Apply the scan mode to one stale object and report what happened to it
fn handle_stale<S>(
    store: &S,
    bucket: &str,
    mode: ScanMode,
    record: &ObjectRecord,
    result: &mut ScanResult,
) -> StaleObjectEntry
where
    S: ObjectStore + ?Sized,
{
    match mode {
        ScanMode::ReportOnly => StaleObjectEntry::new(record, StaleAction::Reported),
        ScanMode::DryRun => StaleObjectEntry::new(record, StaleAction::WouldDelete),
        ScanMode::Execute => match store.delete_object(bucket, &record.key) {
            Ok(()) => {
                result.record_deleted();
                StaleObjectEntry::new(record, StaleAction::Deleted)
            }
            Err(e) => {
                result.record_failed();
                warn!("⚠️ {}", e);
                StaleObjectEntry::failed(record, e.to_string())
            }
        },
    }
}
