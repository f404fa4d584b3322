/// Defines what a scan does with the stale objects it finds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Cost report only - no per-object lines, no deletions
    ReportOnly,

    /// Simulation - print what would be deleted but leave the bucket untouched
    DryRun,

    /// Live cleanup - actually delete stale objects
    Execute,
}

impl ScanMode {
    /// Report-only wins over dry-run, so `--report` never deletes regardless of `--dry-run`
    pub fn from_flags(dry_run: bool, report_only: bool) -> Self {
        if report_only {
            ScanMode::ReportOnly
        } else if dry_run {
            ScanMode::DryRun
        } else {
            ScanMode::Execute
        }
    }

    /// Returns true if stale objects should actually be deleted
    pub fn should_delete(&self) -> bool {
        matches!(self, ScanMode::Execute)
    }

    /// Get display string for progress spinner
    pub fn progress_prefix(&self) -> &'static str {
        match self {
            ScanMode::ReportOnly => "[REPORT] ",
            ScanMode::DryRun => "[DRY RUN] ",
            ScanMode::Execute => "",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScanMode::ReportOnly => "report",
            ScanMode::DryRun => "dry-run",
            ScanMode::Execute => "execute",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_overrides_dry_run() {
        assert_eq!(ScanMode::from_flags(true, true), ScanMode::ReportOnly);
        assert_eq!(ScanMode::from_flags(false, true), ScanMode::ReportOnly);
    }

    #[test]
    fn test_from_flags_without_report() {
        assert_eq!(ScanMode::from_flags(true, false), ScanMode::DryRun);
        assert_eq!(ScanMode::from_flags(false, false), ScanMode::Execute);
    }

    #[test]
    fn test_should_delete() {
        assert!(!ScanMode::ReportOnly.should_delete());
        assert!(!ScanMode::DryRun.should_delete());
        assert!(ScanMode::Execute.should_delete());
    }

    #[test]
    fn test_progress_prefix() {
        assert_eq!(ScanMode::DryRun.progress_prefix(), "[DRY RUN] ");
        assert_eq!(ScanMode::Execute.progress_prefix(), "");
    }
}
