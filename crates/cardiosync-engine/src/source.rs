//! JSON-lines source reading from object storage.
//!
//! The whole batch is read or the run aborts: a single malformed line, an
//! unreadable object, or an empty prefix all fail the read. Records pass
//! through unchanged from source shape to sink shape.

use async_trait::async_trait;
use serde_json::Value;

use cardiosync_types::{JobError, RecordBatch, ValidationResult};

/// Seam over the object-storage reader.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read every JSON-lines record under `path` into one ordered batch.
    async fn read(&self, path: &str) -> Result<RecordBatch, JobError>;

    /// Confirm the path is reachable without reading the full batch.
    async fn validate(&self, path: &str) -> ValidationResult;
}

/// A parsed `s3://bucket/prefix` location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Location {
    pub bucket: String,
    pub prefix: String,
}

impl S3Location {
    /// Parse an `s3://bucket[/prefix]` path.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::SourceRead`] for any other scheme or an empty
    /// bucket name.
    pub fn parse(path: &str) -> Result<Self, JobError> {
        let rest = path
            .strip_prefix("s3://")
            .ok_or_else(|| JobError::source_read(path, "expected an s3://bucket/prefix path"))?;
        let (bucket, prefix) = rest.split_once('/').unwrap_or((rest, ""));
        if bucket.is_empty() {
            return Err(JobError::source_read(path, "bucket name is empty"));
        }
        Ok(Self {
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

/// Decode one object body as JSON-lines.
///
/// Empty lines are skipped; any other unparseable line aborts the decode
/// with the object key and 1-based line number.
fn decode_json_lines(path: &str, object_key: &str, body: &[u8]) -> Result<Vec<Value>, JobError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| JobError::source_read(path, format!("object '{object_key}' is not UTF-8: {e}")))?;

    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(line).map_err(|e| {
            JobError::source_read(
                path,
                format!("object '{}' line {}: {}", object_key, i + 1, e),
            )
        })?;
        records.push(value);
    }
    Ok(records)
}

/// S3 implementation: lists all objects under the prefix and decodes each.
pub struct S3Source {
    client: aws_sdk_s3::Client,
}

impl S3Source {
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }

    async fn list_keys(&self, path: &str, location: &S3Location) -> Result<Vec<String>, JobError> {
        let mut keys = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&location.bucket)
            .prefix(&location.prefix)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| JobError::source_read(path, e.into_service_error()))?;
            for object in page.contents() {
                // Skip directory markers.
                if let Some(key) = object.key() {
                    if !key.ends_with('/') {
                        keys.push(key.to_string());
                    }
                }
            }
        }
        Ok(keys)
    }

    async fn fetch_object(&self, path: &str, location: &S3Location, key: &str) -> Result<Vec<u8>, JobError> {
        let response = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                JobError::source_read(path, format!("object '{}': {}", key, e.into_service_error()))
            })?;
        let body = response.body.collect().await.map_err(|e| {
            JobError::source_read(path, format!("object '{key}' body read failed: {e}"))
        })?;
        Ok(body.into_bytes().to_vec())
    }
}

#[async_trait]
impl RecordSource for S3Source {
    async fn read(&self, path: &str) -> Result<RecordBatch, JobError> {
        let location = S3Location::parse(path)?;
        let keys = self.list_keys(path, &location).await?;

        let mut records = Vec::new();
        let mut bytes = 0u64;
        for key in &keys {
            let body = self.fetch_object(path, &location, key).await?;
            bytes += body.len() as u64;
            records.extend(decode_json_lines(path, key, &body)?);
        }

        if records.is_empty() {
            return Err(JobError::source_read(path, "no parseable records under path"));
        }

        tracing::info!(
            path,
            objects = keys.len(),
            records = records.len(),
            bytes,
            "Source read complete"
        );
        Ok(RecordBatch::new(records, bytes))
    }

    async fn validate(&self, path: &str) -> ValidationResult {
        let location = match S3Location::parse(path) {
            Ok(location) => location,
            Err(e) => return ValidationResult::failed(e.to_string()),
        };

        let listed = self
            .client
            .list_objects_v2()
            .bucket(&location.bucket)
            .prefix(&location.prefix)
            .max_keys(1)
            .send()
            .await;

        match listed {
            Ok(page) if page.contents().is_empty() => {
                ValidationResult::warning(format!("'{path}' is reachable but empty"))
            }
            Ok(_) => ValidationResult::success(format!("'{path}' is reachable")),
            Err(e) => ValidationResult::failed(format!(
                "listing '{}' failed: {}",
                path,
                e.into_service_error()
            )),
        }
    }
}
