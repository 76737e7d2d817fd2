//! Error kinds for a cardiosync run.
//!
//! Every kind is fatal: nothing is caught and recovered locally, there is no
//! retry policy, and a failed run is simply re-triggered from scratch by
//! whatever invoked it. Construct via the kind-specific factory methods.

use thiserror::Error;

/// A fatal error raised by one of the run's components.
#[derive(Debug, Error)]
pub enum JobError {
    /// A required job parameter was absent from the argument list.
    #[error("missing required job parameter '{name}'")]
    MissingParameter { name: String },

    /// The secret store call failed (access denied, unknown secret,
    /// connectivity). The underlying message is forwarded unchanged.
    #[error("secret store access failed for '{secret_id}': {message}")]
    SecretAccess { secret_id: String, message: String },

    /// The secret payload was retrieved but is not the expected JSON shape.
    #[error("secret '{secret_id}' is malformed: {message}")]
    MalformedSecret { secret_id: String, message: String },

    /// The source location was unreachable or yielded no parseable records.
    #[error("source read failed for '{path}': {message}")]
    SourceRead { path: String, message: String },

    /// The document database rejected the connection or the write.
    #[error("sink write failed for '{database}.{collection}': {message}")]
    SinkWrite {
        database: String,
        collection: String,
        message: String,
    },

    /// A collection read for the reporting layer failed.
    #[error("collection query failed for '{database}.{collection}': {message}")]
    StoreQuery {
        database: String,
        collection: String,
        message: String,
    },
}

impl JobError {
    #[must_use]
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    #[must_use]
    pub fn secret_access(secret_id: impl Into<String>, message: impl ToString) -> Self {
        Self::SecretAccess {
            secret_id: secret_id.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn malformed_secret(secret_id: impl Into<String>, message: impl ToString) -> Self {
        Self::MalformedSecret {
            secret_id: secret_id.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn source_read(path: impl Into<String>, message: impl ToString) -> Self {
        Self::SourceRead {
            path: path.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn sink_write(
        database: impl Into<String>,
        collection: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::SinkWrite {
            database: database.into(),
            collection: collection.into(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn store_query(
        database: impl Into<String>,
        collection: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        Self::StoreQuery {
            database: database.into(),
            collection: collection.into(),
            message: message.to_string(),
        }
    }
}
