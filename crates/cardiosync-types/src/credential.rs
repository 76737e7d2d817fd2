//! Document-database credentials parsed from a secret store payload.

use serde::Deserialize;

use crate::error::JobError;

/// Credentials for the document-database sink.
///
/// Built once per run from the secret payload and passed forward; never
/// persisted locally.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub server_addr: String,
}

/// Raw secret payload shape. Fields are optional so a missing one can be
/// reported by name instead of as an opaque deserialization failure.
#[derive(Deserialize)]
struct RawSecret {
    username: Option<String>,
    password: Option<String>,
    server_addr: Option<String>,
}

impl Credential {
    /// Parse the JSON secret payload returned by the secret store.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::MalformedSecret`] if the payload is not JSON or
    /// any of `username`, `password`, `server_addr` is absent.
    pub fn from_secret_json(secret_id: &str, payload: &str) -> Result<Self, JobError> {
        let raw: RawSecret = serde_json::from_str(payload)
            .map_err(|e| JobError::malformed_secret(secret_id, format!("not valid JSON: {e}")))?;

        let field = |name: &str, value: Option<String>| {
            value.ok_or_else(|| {
                JobError::malformed_secret(secret_id, format!("missing field '{name}'"))
            })
        };

        Ok(Self {
            username: field("username", raw.username)?,
            password: field("password", raw.password)?,
            server_addr: field("server_addr", raw.server_addr)?,
        })
    }
}

// The password never reaches logs or error messages.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .field("server_addr", &self.server_addr)
            .finish()
    }
}
