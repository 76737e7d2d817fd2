//! Preflight checks: validate configuration and connectivity without
//! moving any data.

use cardiosync_types::{JobParameters, ValidationResult, ValidationStatus};

use crate::runner::JobContext;
use crate::secret::load_secret;

/// Outcome of the three preflight checks.
#[derive(Debug)]
pub struct CheckReport {
    pub secret: ValidationResult,
    pub source: ValidationResult,
    pub sink: ValidationResult,
}

impl CheckReport {
    /// True when no check failed (warnings pass).
    #[must_use]
    pub fn all_passed(&self) -> bool {
        [&self.secret, &self.source, &self.sink]
            .iter()
            .all(|r| r.status != ValidationStatus::Failed)
    }
}

/// Check the secret, the source location, and the sink connection.
///
/// The sink check only runs when the secret check produced a credential;
/// the source check is independent of both.
pub async fn check_job(params: &JobParameters, ctx: JobContext<'_>) -> CheckReport {
    let (secret, credential) = match load_secret(ctx.secrets, &params.secret_name).await {
        Ok(credential) => (
            ValidationResult::success(format!(
                "secret '{}' yields credentials for {}",
                params.secret_name, credential.server_addr
            )),
            Some(credential),
        ),
        Err(e) => (ValidationResult::failed(e.to_string()), None),
    };

    let source = ctx.source.validate(&params.source_path).await;

    let sink = match credential {
        Some(credential) => ctx.sink.validate(&credential).await,
        None => ValidationResult::failed("skipped: no credential available".to_string()),
    };

    CheckReport {
        secret,
        source,
        sink,
    }
}
