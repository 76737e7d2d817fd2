//! Secret retrieval for the document-database credentials.

use async_trait::async_trait;

use cardiosync_types::{Credential, JobError};

/// Seam over the managed secret store.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the string payload of the named secret.
    async fn get_secret_value(&self, secret_id: &str) -> Result<String, JobError>;
}

/// AWS Secrets Manager implementation.
pub struct AwsSecretStore {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretStore {
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_secretsmanager::Client::new(config),
        }
    }
}

#[async_trait]
impl SecretStore for AwsSecretStore {
    async fn get_secret_value(&self, secret_id: &str) -> Result<String, JobError> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| JobError::secret_access(secret_id, e.into_service_error()))?;

        // Binary-only secrets carry no SecretString.
        response
            .secret_string()
            .map(ToOwned::to_owned)
            .ok_or_else(|| JobError::secret_access(secret_id, "secret has no string payload"))
    }
}

/// Fetch the secret and parse it into a [`Credential`].
///
/// No caching, no fallback: a store failure is [`JobError::SecretAccess`]
/// and a bad payload is [`JobError::MalformedSecret`], both fatal.
pub async fn load_secret(
    store: &dyn SecretStore,
    secret_id: &str,
) -> Result<Credential, JobError> {
    let payload = store.get_secret_value(secret_id).await?;
    let credential = Credential::from_secret_json(secret_id, &payload)?;
    tracing::info!(secret = secret_id, "Loaded sink credentials from secret store");
    Ok(credential)
}
