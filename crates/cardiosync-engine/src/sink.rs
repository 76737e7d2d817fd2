//! Document-database sink writer.
//!
//! The MongoDB client is acquired inside each operation and shut down on
//! every exit path, success or failure. Write mode is plain append: no
//! upsert, no dedup, no cross-record ordering guarantee.

use async_trait::async_trait;
use bson::Document;
use mongodb::options::ClientOptions;
use mongodb::Client;

use cardiosync_types::{Credential, JobError, RecordBatch, ValidationResult, WriteSummary};

/// Seam over the document-database sink.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Insert every record of `batch` into `database`.`collection`.
    async fn write(
        &self,
        batch: &RecordBatch,
        credential: &Credential,
        database: &str,
        collection: &str,
    ) -> Result<WriteSummary, JobError>;

    /// Confirm the sink accepts the credential.
    async fn validate(&self, credential: &Credential) -> ValidationResult;
}

/// Build a connected client for `mongodb://<server_addr>`.
pub(crate) async fn connect(credential: &Credential) -> Result<Client, String> {
    let uri = format!("mongodb://{}", credential.server_addr);
    let mut options = ClientOptions::parse(&uri)
        .await
        .map_err(|e| format!("invalid connection target '{uri}': {e}"))?;
    options.app_name = Some("cardiosync".to_string());
    options.credential = Some(
        mongodb::options::Credential::builder()
            .username(credential.username.clone())
            .password(credential.password.clone())
            .build(),
    );
    Client::with_options(options).map_err(|e| format!("client construction failed: {e}"))
}

/// Convert one source record into a BSON document.
///
/// The sink is schemaless but still requires each record to be a JSON
/// object; anything else is rejected.
fn to_document(
    database: &str,
    collection: &str,
    index: usize,
    record: &serde_json::Value,
) -> Result<Document, JobError> {
    if !record.is_object() {
        return Err(JobError::sink_write(
            database,
            collection,
            format!("record {index} is not a JSON object"),
        ));
    }
    bson::to_document(record).map_err(|e| {
        JobError::sink_write(database, collection, format!("record {index}: {e}"))
    })
}

/// MongoDB implementation.
#[derive(Debug, Default)]
pub struct MongoSink;

impl MongoSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecordSink for MongoSink {
    async fn write(
        &self,
        batch: &RecordBatch,
        credential: &Credential,
        database: &str,
        collection: &str,
    ) -> Result<WriteSummary, JobError> {
        let documents = batch
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| to_document(database, collection, i, record))
            .collect::<Result<Vec<_>, _>>()?;

        let client = connect(credential)
            .await
            .map_err(|e| JobError::sink_write(database, collection, e))?;

        let insert_result = client
            .database(database)
            .collection::<Document>(collection)
            .insert_many(documents, None)
            .await;
        client.shutdown().await;

        let inserted = insert_result
            .map_err(|e| JobError::sink_write(database, collection, e))?;

        let summary = WriteSummary {
            records_written: inserted.inserted_ids.len() as u64,
        };
        tracing::info!(
            database,
            collection,
            records = summary.records_written,
            "Sink write complete"
        );
        Ok(summary)
    }

    async fn validate(&self, credential: &Credential) -> ValidationResult {
        let client = match connect(credential).await {
            Ok(client) => client,
            Err(e) => return ValidationResult::failed(e),
        };

        let ping = client
            .database("admin")
            .run_command(bson::doc! {"ping": 1}, None)
            .await;
        client.shutdown().await;

        match ping {
            Ok(_) => ValidationResult::success(format!(
                "connected to mongodb://{} as {}",
                credential.server_addr, credential.username
            )),
            Err(e) => ValidationResult::failed(format!("ping failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_record_converts() {
        let doc = to_document("db", "coll", 0, &json!({"id": 7, "risk": "high"})).unwrap();
        assert_eq!(doc.get_i64("id").unwrap(), 7);
        assert_eq!(doc.get_str("risk").unwrap(), "high");
    }

    #[test]
    fn nested_record_converts() {
        let doc =
            to_document("db", "coll", 0, &json!({"vitals": {"bpm": 88, "bp": [120, 80]}})).unwrap();
        assert!(doc.get_document("vitals").is_ok());
    }

    #[test]
    fn non_object_record_is_rejected() {
        let err = to_document("db", "coll", 3, &json!([1, 2, 3])).unwrap_err();
        match err {
            JobError::SinkWrite { message, .. } => assert!(message.contains("record 3")),
            other => panic!("expected SinkWrite, got {other}"),
        }
    }
}
