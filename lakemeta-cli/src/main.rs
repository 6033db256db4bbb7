use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use lakemeta_engine::LocalEngineContext;
use lakemeta_metadata::{FileSystemBackedTableMetadata, MetadataConfig, TableMetadata};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lakemeta", version, about = "Inspect the partitions and files of a table", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv). Use -q to quiet.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors. Overrides -v.
    #[arg(short = 'q', long, action = ArgAction::SetTrue, global = true)]
    quiet: bool,

    /// Maximum number of directories listed concurrently.
    #[arg(value_name = "PARALLELISM", short, long, global = true)]
    parallelism: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List partitions, optionally below the given prefixes.
    Partitions {
        #[arg(
            value_name = "PREFIX",
            long = "prefix",
            help = "Relative path prefix to search below. Repeatable."
        )]
        prefixes: Vec<String>,

        #[arg(
            long,
            action = ArgAction::SetTrue,
            help = "Treat every directory three levels below the root as a partition"
        )]
        assume_date_partitioning: bool,
    },
    /// List the data files of partitions.
    Files {
        #[arg(
            value_name = "PARTITION",
            long = "partition",
            required = true,
            help = "Relative partition path. Repeatable."
        )]
        partitions: Vec<String>,
    },
}

fn setup_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => lakemeta_config::CONFIG.log_level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli);

    let config = &*lakemeta_config::CONFIG;
    let mut metadata_config = MetadataConfig::from(config);
    if let Some(parallelism) = cli.parallelism {
        metadata_config = metadata_config.with_listing_parallelism(parallelism);
    }
    if let Commands::Partitions {
        assume_date_partitioning: true,
        ..
    } = cli.command
    {
        metadata_config = metadata_config.with_assume_date_partitioning(true);
    }

    let metadata =
        FileSystemBackedTableMetadata::open(Arc::new(LocalEngineContext::new()), config)
            .map_err(|e| anyhow::anyhow!("Failed to open table {}: {}", config.table_path, e))?
            .with_metadata_config(metadata_config);

    match cli.command {
        Commands::Partitions { prefixes, .. } => {
            commands::list_partitions(&metadata, prefixes).await?
        }
        Commands::Files { partitions } => commands::list_files(&metadata, partitions).await?,
    }

    metadata.close().await?;
    Ok(())
}
