use crate::models::error::{Result, TidyError};
use crate::models::scan_mode::ScanMode;
use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;
use log::info;

/// Format of the end-of-scan summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub bucket: String,
    pub days: u32,
    pub dry_run: bool,
    pub report_only: bool,
    pub output: OutputFormat,
}

const MIN_BUCKET_NAME_LEN: usize = 3;
const MAX_BUCKET_NAME_LEN: usize = 63;

impl ScanConfig {
    pub fn new(bucket: impl Into<String>, days: u32) -> Self {
        Self {
            bucket: bucket.into(),
            days,
            dry_run: true,
            report_only: false,
            output: OutputFormat::Text,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_report_only(mut self, report_only: bool) -> Self {
        self.report_only = report_only;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn mode(&self) -> ScanMode {
        ScanMode::from_flags(self.dry_run, self.report_only)
    }

    /// Objects last modified strictly before this instant are stale
    pub fn cutoff(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        Duration::try_days(i64::from(self.days))
            .and_then(|age| now.checked_sub_signed(age))
            .ok_or_else(|| {
                TidyError::InvalidConfig(format!(
                    "age threshold of {} days reaches past the earliest supported date",
                    self.days
                ))
            })
    }

    pub fn validate(&self) -> Result<()> {
        let bucket = self.bucket.trim();
        if bucket.is_empty() {
            return Err(TidyError::InvalidConfig(
                "bucket name must not be empty".to_string(),
            ));
        }

        if bucket.len() != self.bucket.len() {
            return Err(TidyError::InvalidConfig(format!(
                "bucket name '{}' has leading or trailing whitespace",
                self.bucket
            )));
        }

        if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&bucket.len()) {
            return Err(TidyError::InvalidConfig(format!(
                "bucket name '{}' must be between {} and {} characters long",
                bucket, MIN_BUCKET_NAME_LEN, MAX_BUCKET_NAME_LEN
            )));
        }

        self.cutoff(Utc::now())?;

        info!(
            "Scan configuration: bucket={}, days={}, mode={}",
            self.bucket,
            self.days,
            self.mode().as_str()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::new("my-bucket", 30);
        assert!(config.dry_run);
        assert!(!config.report_only);
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.mode(), ScanMode::DryRun);
    }

    #[test]
    fn test_mode_follows_flags() {
        let config = ScanConfig::new("my-bucket", 30).with_dry_run(false);
        assert_eq!(config.mode(), ScanMode::Execute);

        let config = config.with_report_only(true);
        assert_eq!(config.mode(), ScanMode::ReportOnly);
    }

    #[test]
    fn test_cutoff_subtracts_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let config = ScanConfig::new("my-bucket", 30);
        assert_eq!(
            config.cutoff(now).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_zero_days_cutoff_is_now() {
        let now = Utc::now();
        assert_eq!(ScanConfig::new("my-bucket", 0).cutoff(now).unwrap(), now);
    }

    #[test]
    fn test_huge_day_count_is_rejected_not_panicking() {
        let config = ScanConfig::new("my-bucket", 100_000_000);
        assert!(matches!(
            config.cutoff(Utc::now()),
            Err(TidyError::InvalidConfig(_))
        ));
        assert!(matches!(config.validate(), Err(TidyError::InvalidConfig(_))));

        let config = ScanConfig::new("my-bucket", u32::MAX);
        assert!(config.cutoff(Utc::now()).is_err());
    }

    #[test]
    fn test_century_threshold_is_accepted() {
        assert!(ScanConfig::new("my-bucket", 36_500).validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_normal_bucket() {
        assert!(ScanConfig::new("my-bucket", 30).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_bucket_names() {
        let too_long = "a".repeat(64);
        for name in ["", "   ", "ab", " my-bucket", too_long.as_str()] {
            match ScanConfig::new(name, 30).validate() {
                Err(TidyError::InvalidConfig(_)) => {}
                other => panic!("Expected InvalidConfig for '{}', got {:?}", name, other),
            }
        }
    }
}
