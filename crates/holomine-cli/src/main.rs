use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use holomine_infrastructure::SAMPLE_FILE_NAME;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod display;

#[derive(Parser)]
#[command(name = "holomine")]
#[command(about = "Holomine CLI - mine encrypted datasets without exposing the raw data", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Base URL of the Encryption and Mining services
    #[arg(long, global = true, env = "HOLOMINE_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "HOLOMINE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Config file to read instead of ~/.config/holomine/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where the dataset comes from.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Dataset to upload (.txt, .csv or .json, at most 16 MiB)
    #[arg(long, required_unless_present = "sample", conflicts_with = "sample")]
    pub file: Option<PathBuf>,

    /// Use the bundled sample customer dataset
    #[arg(long)]
    pub sample: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a dataset, mine it and explain the patterns
    Run {
        #[command(flatten)]
        dataset: DatasetArgs,

        /// Mining algorithm (clustering, association, classification, outlier)
        #[arg(long, default_value = "clustering")]
        algorithm: String,
    },
    /// Encrypt a dataset and show the encryption details
    Encrypt {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
    /// Check that the backend is reachable
    Health,
    /// List the available mining algorithms
    Algorithms,
    /// Write the sample dataset to a file
    Sample {
        /// Output path
        #[arg(long, default_value = SAMPLE_FILE_NAME)]
        out: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::Run { dataset, algorithm } => {
            commands::run::execute(&cli.global, &dataset, &algorithm).await?
        }
        Commands::Encrypt { dataset } => commands::encrypt::execute(&cli.global, &dataset).await?,
        Commands::Health => commands::health::execute(&cli.global).await?,
        Commands::Algorithms => commands::algorithms::execute(),
        Commands::Sample { out } => commands::sample::execute(&out).await?,
    }

    Ok(())
}
