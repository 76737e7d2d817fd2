//! Engine crate: the sequential load job, its collaborator seams, preflight
//! checks, and the collection reporting layer.

pub mod cache;
pub mod check;
pub mod report;
pub mod runner;
pub mod secret;
pub mod session;
pub mod sink;
pub mod source;

pub use check::{check_job, CheckReport};
pub use runner::{run_job, JobContext};
pub use secret::{load_secret, AwsSecretStore, SecretStore};
pub use sink::{MongoSink, RecordSink};
pub use source::{RecordSource, S3Source};
