use std::time::Duration;

use anyhow::Result;

use cardiosync_engine::cache::QueryCache;
use cardiosync_engine::report::{fetch_records, render, render_raw, DatasetSummary};
use cardiosync_engine::secret::load_secret;
use cardiosync_engine::{session, AwsSecretStore};
use cardiosync_types::ReportParameters;

pub struct ReportOptions {
    pub limit: Option<usize>,
    pub raw: bool,
    pub watch: bool,
    pub interval_secs: u64,
    pub cache_ttl_secs: u64,
}

/// Execute the `report` command: fetch the collection (through the cache)
/// and render either the field summary or the raw listing.
pub async fn execute(args: &[String], options: &ReportOptions) -> Result<()> {
    let params = ReportParameters::from_args(args)?;

    let aws = session::load_aws_config(&params.region_name).await;
    let secrets = AwsSecretStore::new(&aws);
    let credential = load_secret(&secrets, &params.secret_name).await?;

    let cache = QueryCache::new(Duration::from_secs(options.cache_ttl_secs));

    loop {
        let records = fetch_records(&credential, &params, &cache).await?;

        let output = if options.raw {
            render_raw(&records, options.limit)
        } else {
            let summary = DatasetSummary::compute(&records);
            render(&params.db_name, &params.collection_name, &summary)
        };
        print!("{output}");

        if !options.watch {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_secs(options.interval_secs)).await;
    }
}
