use crate::models::object_record::ObjectRecord;
use crate::models::scan_mode::ScanMode;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// S3 Standard storage price, USD per GB-month
pub const PRICE_PER_GB: f64 = 0.023;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Accumulators for a single scan invocation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanResult {
    pub scanned_count: u64,
    pub stale_count: u64,
    pub stale_bytes: u64,
    pub deleted_count: u64,
    pub failed_count: u64,
}

impl ScanResult {
    pub fn record_scanned(&mut self) {
        self.scanned_count += 1;
    }

    /// Objects without a known size still count as stale but add no bytes
    pub fn record_stale(&mut self, record: &ObjectRecord) {
        self.stale_count += 1;
        if let Some(size) = record.size {
            self.stale_bytes += size;
        }
    }

    pub fn record_deleted(&mut self) {
        self.deleted_count += 1;
    }

    pub fn record_failed(&mut self) {
        self.failed_count += 1;
    }

    pub fn cost_estimate(&self) -> CostEstimate {
        CostEstimate::from_bytes(self.stale_bytes)
    }

    pub fn summary(
        &self,
        bucket: &str,
        days: u32,
        cutoff: DateTime<Utc>,
        mode: ScanMode,
        objects: Vec<StaleObjectEntry>,
    ) -> ScanSummary {
        let cost = self.cost_estimate();
        ScanSummary {
            bucket: bucket.to_string(),
            days,
            cutoff: cutoff.to_rfc3339(),
            mode: mode.as_str(),
            scanned_objects: self.scanned_count,
            stale_objects: self.stale_count,
            stale_bytes: self.stale_bytes,
            reclaimable_gb: cost.gigabytes,
            estimated_monthly_savings_usd: cost.monthly_savings_usd,
            deleted_objects: self.deleted_count,
            failed_deletions: self.failed_count,
            objects,
        }
    }
}

/// What the scan did with one stale object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleAction {
    Reported,
    WouldDelete,
    Deleted,
    DeleteFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaleObjectEntry {
    pub key: String,
    pub last_modified: String,
    pub size: Option<u64>,
    pub action: StaleAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StaleObjectEntry {
    pub fn new(record: &ObjectRecord, action: StaleAction) -> Self {
        Self {
            key: record.key.clone(),
            last_modified: record.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            size: record.size,
            action,
            error: None,
        }
    }

    pub fn failed(record: &ObjectRecord, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(record, StaleAction::DeleteFailed)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEstimate {
    pub gigabytes: f64,
    pub monthly_savings_usd: f64,
}

impl CostEstimate {
    pub fn from_bytes(bytes: u64) -> Self {
        let gigabytes = bytes as f64 / BYTES_PER_GB;
        Self {
            gigabytes,
            monthly_savings_usd: gigabytes * PRICE_PER_GB,
        }
    }
}

/// Machine-readable end-of-scan summary
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub bucket: String,
    pub days: u32,
    pub cutoff: String,
    pub mode: &'static str,
    pub scanned_objects: u64,
    pub stale_objects: u64,
    pub stale_bytes: u64,
    pub reclaimable_gb: f64,
    pub estimated_monthly_savings_usd: f64,
    pub deleted_objects: u64,
    pub failed_deletions: u64,
    /// Per-object outcomes, only filled for JSON output
    pub objects: Vec<StaleObjectEntry>,
}
