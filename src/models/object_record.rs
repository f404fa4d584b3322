use chrono::{DateTime, Utc};

/// A single entry from a bucket listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub key: String,
    pub last_modified: DateTime<Utc>,
    pub size: Option<u64>,
}

impl ObjectRecord {
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_modified < cutoff
    }

    pub fn size_in_mebibytes(&self) -> f64 {
        self.size.unwrap_or(0) as f64 / 1024.0 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(last_modified: DateTime<Utc>, size: Option<u64>) -> ObjectRecord {
        ObjectRecord {
            key: "logs/app.log".to_string(),
            last_modified,
            size,
        }
    }

    #[test]
    fn test_is_stale_boundary() {
        let cutoff = Utc::now();
        assert!(record(cutoff - Duration::seconds(1), None).is_stale(cutoff));
        // Exactly at the cutoff counts as fresh
        assert!(!record(cutoff, None).is_stale(cutoff));
        assert!(!record(cutoff + Duration::days(1), None).is_stale(cutoff));
    }

    #[test]
    fn test_size_in_mebibytes() {
        let now = Utc::now();
        assert_eq!(record(now, Some(1_572_864)).size_in_mebibytes(), 1.5);
        assert_eq!(record(now, None).size_in_mebibytes(), 0.0);
    }
}
