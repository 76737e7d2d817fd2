mod commands;
mod logging;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cardiosync",
    version,
    about = "Batch loader and reporting for the heart-risk dataset"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load JSON-lines records from object storage into the document database
    Run {
        /// Job parameters: --job_name --source_path --db_name
        /// --collection_name --secret_name --region_name
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
    /// Validate parameters and connectivity without moving data
    Check {
        /// Same parameters as `run`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
    /// Summarize the loaded collection
    Report {
        /// Show at most this many records in the raw listing
        #[arg(long)]
        limit: Option<usize>,
        /// List raw documents instead of the field summary
        #[arg(long)]
        raw: bool,
        /// Re-render on an interval instead of exiting
        #[arg(long)]
        watch: bool,
        /// Seconds between renders with --watch
        #[arg(long, default_value_t = 30)]
        interval_secs: u64,
        /// Seconds a fetched collection stays cached
        #[arg(long, default_value_t = 600)]
        cache_ttl_secs: u64,
        /// Report parameters: --db_name --collection_name --secret_name
        /// --region_name
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        params: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run { params } => commands::run::execute(&params).await,
        Commands::Check { params } => commands::check::execute(&params).await,
        Commands::Report {
            limit,
            raw,
            watch,
            interval_secs,
            cache_ttl_secs,
            params,
        } => {
            let options = commands::report::ReportOptions {
                limit,
                raw,
                watch,
                interval_secs,
                cache_ttl_secs,
            };
            commands::report::execute(&params, &options).await
        }
    }
}
