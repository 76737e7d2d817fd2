//! Sequential job execution: credentials, source read, sink write.
//!
//! One logical thread of control. Each phase either completes or fails the
//! run; nothing is retried and no phase starts before the previous one has
//! finished, so the sink write never begins without both the credential and
//! the full batch.

use std::time::Instant;

use cardiosync_types::{JobError, JobParameters, RunSummary};

use crate::secret::{load_secret, SecretStore};
use crate::sink::RecordSink;
use crate::source::RecordSource;

/// The run's collaborators, passed in explicitly instead of living in any
/// ambient context.
pub struct JobContext<'a> {
    pub secrets: &'a dyn SecretStore,
    pub source: &'a dyn RecordSource,
    pub sink: &'a dyn RecordSink,
}

/// Execute one load job: secret → source read → sink write.
///
/// # Errors
///
/// Propagates the failing phase's [`JobError`] unchanged; the run is over
/// at the first failure.
pub async fn run_job(
    params: &JobParameters,
    ctx: JobContext<'_>,
) -> Result<RunSummary, JobError> {
    let started = Instant::now();
    tracing::info!(
        job = %params.job_name,
        source = %params.source_path,
        database = %params.db_name,
        collection = %params.collection_name,
        "Starting load job"
    );

    let credential = load_secret(ctx.secrets, &params.secret_name).await?;

    let batch = ctx.source.read(&params.source_path).await?;

    let write = ctx
        .sink
        .write(&batch, &credential, &params.db_name, &params.collection_name)
        .await?;

    let summary = RunSummary {
        job_name: params.job_name.clone(),
        records_read: batch.len() as u64,
        records_written: write.records_written,
        bytes_read: batch.bytes(),
        duration_secs: started.elapsed().as_secs_f64(),
    };
    tracing::info!(
        job = %params.job_name,
        records = summary.records_written,
        duration_secs = summary.duration_secs,
        "Load job complete"
    );
    Ok(summary)
}
