//! Explicit, region-scoped AWS SDK configuration.
//!
//! One config is loaded per invocation from the resolved `region_name` and
//! passed into each client constructor. Credentials come from the standard
//! SDK chain (environment, profile, IMDS, task role).

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Load the shared SDK config for the given region.
pub async fn load_aws_config(region_name: &str) -> SdkConfig {
    aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region_name.to_owned()))
        .load()
        .await
}
