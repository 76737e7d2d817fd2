use anyhow::Result;

use cardiosync_engine::check::check_job;
use cardiosync_engine::runner::JobContext;
use cardiosync_engine::{session, AwsSecretStore, MongoSink, S3Source};
use cardiosync_types::{JobParameters, ValidationResult, ValidationStatus};

/// Execute the `check` command: validate parameters and connectivity.
pub async fn execute(args: &[String]) -> Result<()> {
    let params = JobParameters::from_args(args)?;
    println!("Parameters:  OK");

    let aws = session::load_aws_config(&params.region_name).await;
    let secrets = AwsSecretStore::new(&aws);
    let source = S3Source::new(&aws);
    let sink = MongoSink::new();

    let report = check_job(
        &params,
        JobContext {
            secrets: &secrets,
            source: &source,
            sink: &sink,
        },
    )
    .await;

    print_validation("Secret", &report.secret);
    print_validation("Source", &report.source);
    print_validation("Sink", &report.sink);

    if report.all_passed() {
        println!("\nAll checks passed.");
        Ok(())
    } else {
        anyhow::bail!("One or more checks failed")
    }
}

fn print_validation(label: &str, result: &ValidationResult) {
    let status = match result.status {
        ValidationStatus::Success => "OK",
        ValidationStatus::Failed => "FAILED",
        ValidationStatus::Warning => "WARNING",
    };
    println!("{:12} {}", format!("{label}:"), status);
    if !result.message.is_empty() {
        println!("  {}", result.message);
    }
}
