use anyhow::Result;

use cardiosync_engine::runner::{run_job, JobContext};
use cardiosync_engine::{session, AwsSecretStore, MongoSink, S3Source};
use cardiosync_types::JobParameters;

/// Execute the `run` command: resolve parameters, build clients, run the job.
pub async fn execute(args: &[String]) -> Result<()> {
    // Parameters resolve before any client exists.
    let params = JobParameters::from_args(args)?;
    tracing::info!(
        job = %params.job_name,
        source = %params.source_path,
        region = %params.region_name,
        "Job parameters resolved"
    );

    let aws = session::load_aws_config(&params.region_name).await;
    let secrets = AwsSecretStore::new(&aws);
    let source = S3Source::new(&aws);
    let sink = MongoSink::new();

    let summary = run_job(
        &params,
        JobContext {
            secrets: &secrets,
            source: &source,
            sink: &sink,
        },
    )
    .await?;

    println!("Job '{}' completed successfully.", summary.job_name);
    println!("  Records read:    {}", summary.records_read);
    println!("  Records written: {}", summary.records_written);
    println!("  Bytes read:      {}", format_bytes(summary.bytes_read));
    println!("  Duration:        {:.2}s", summary.duration_secs);

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_073_741_824 {
        format!("{:.2} GB", bytes as f64 / 1_073_741_824.0)
    } else if bytes >= 1_048_576 {
        format!("{:.2} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
