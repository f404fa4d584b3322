use crate::models::error::{Result, TidyError};
use crate::models::object_record::ObjectRecord;
use crate::repo::store::{ListingPage, ObjectStore};
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::Object;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use log::{debug, info};
use tokio::runtime::{Builder, Runtime};

/// Blocking S3 backend.
///
/// The SDK is async, so the store owns a current-thread runtime and blocks on
/// every request. Calls are issued strictly one at a time.
pub struct S3Store {
    client: Client,
    runtime: Runtime,
}

impl S3Store {
    /// Build a client from the default credential and region chain
    /// (environment, shared config files, SSO, instance metadata).
    pub fn connect() -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TidyError::Runtime)?;

        let sdk_config = runtime.block_on(aws_config::defaults(BehaviorVersion::latest()).load());

        match sdk_config.region() {
            Some(region) => info!("Using AWS region {}", region),
            None => {
                return Err(TidyError::InvalidConfig(
                    "no AWS region configured; set AWS_REGION or a profile region".to_string(),
                ))
            }
        }

        Ok(Self {
            client: Client::new(&sdk_config),
            runtime,
        })
    }
}

impl ObjectStore for S3Store {
    fn list_page(&self, bucket: &str, continuation_token: Option<&str>) -> Result<ListingPage> {
        let mut request = self.client.list_objects_v2().bucket(bucket);
        if let Some(token) = continuation_token {
            request = request.continuation_token(token);
        }

        let response = self
            .runtime
            .block_on(request.send())
            .map_err(|e| TidyError::ListObjects {
                bucket: bucket.to_string(),
                cause: DisplayErrorContext(&e).to_string(),
            })?;

        let records: Vec<ObjectRecord> = response.contents().iter().filter_map(to_record).collect();

        let next_token = if response.is_truncated() == Some(true) {
            response.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        debug!(
            "Listed {} objects from s3://{} (more pages: {})",
            records.len(),
            bucket,
            next_token.is_some()
        );

        Ok(ListingPage {
            records,
            next_token,
        })
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        let request = self.client.delete_object().bucket(bucket).key(key);
        self.runtime
            .block_on(request.send())
            .map_err(|e| TidyError::DeleteObject {
                key: key.to_string(),
                cause: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }
}

fn to_record(object: &Object) -> Option<ObjectRecord> {
    let key = object.key()?;

    let Some(last_modified) = object
        .last_modified()
        .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()))
    else {
        debug!("Skipping {} - no last modified time in listing", key);
        return None;
    };

    Some(ObjectRecord {
        key: key.to_string(),
        last_modified,
        size: object.size().and_then(|s| u64::try_from(s).ok()),
    })
}
