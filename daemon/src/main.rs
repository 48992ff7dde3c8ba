//! KYC Daemon - KYC table command line
//!
//! Runs one named operation against the persistent KYC table.
//!
//! # Usage
//!
//! ```bash
//! # Create the KYC table
//! kyc_daemon init
//!
//! # Insert a record
//! kyc_daemon invoke write E1 Alice 2020-01-01 B1 2030-01-01 S1
//!
//! # Query it, evaluated against a fixed date
//! kyc_daemon --today 2021-06-01 invoke query E1
//! ```

use std::{path::Path, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kyc_common::{
    config::VERSION,
    get_cli_styles,
    kyc::{parse_date, StatusEvaluator},
    logger::init_logger,
    time::{Clock, FixedClock, SystemClock},
};
use kyc_daemon::core::{
    config::{Config, StorageBackend},
    ledger::KycLedger,
    storage::{MemoryStorage, SledStorage, Storage},
};
use log::{debug, info};

/// KYC Daemon - KYC table command line
#[derive(Parser)]
#[command(name = "kyc_daemon", version = VERSION, about = "KYC ledger daemon")]
#[command(styles = get_cli_styles())]
struct CliArgs {
    #[clap(flatten)]
    config: Config,

    /// JSON configuration file, replaces the command line configuration
    #[clap(long)]
    config_file: Option<String>,

    /// Evaluation date for queries (YYYY-MM-DD), today in UTC by default
    #[clap(long)]
    today: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the KYC table
    Init,
    /// Run a named operation: write, update or query
    Invoke {
        /// Operation name
        function: String,
        /// Positional arguments of the operation
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

// Load the configuration file if one was given
fn load_config(cli: &CliArgs) -> Result<Config> {
    match &cli.config_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path))?;
            Config::from_json(&content)
                .with_context(|| format!("Failed to parse config file {}", path))
        }
        None => Ok(cli.config.clone()),
    }
}

async fn execute<S: Storage>(
    storage: S,
    evaluator: StatusEvaluator,
    clock: Arc<dyn Clock>,
    command: Command,
) -> Result<()> {
    let ledger = KycLedger::new(storage, evaluator, clock);

    let result = match command {
        Command::Init => ledger.init(&[]).await.map(|_| Vec::new()),
        Command::Invoke { function, args } => ledger.invoke(&function, &args).await,
    };

    // Flush even when the operation failed
    ledger.get_storage().write().await.stop().await?;

    let payload = result?;
    if !payload.is_empty() {
        println!("{}", String::from_utf8_lossy(&payload));
    }
    Ok(())
}

/// Run the application
async fn run() -> Result<()> {
    let cli = CliArgs::parse();
    let config = load_config(&cli)?;

    let log_file = (!config.disable_file_logging).then(|| Path::new(&config.log_filename));
    init_logger(config.log_level, log_file)?;
    debug!("configuration: {:?}", config);

    let clock: Arc<dyn Clock> = match &cli.today {
        Some(today) => Arc::new(FixedClock::new(parse_date(today)?)),
        None => Arc::new(SystemClock),
    };
    let evaluator = StatusEvaluator::new(config.comparison_field);

    info!("using {:?} storage backend", config.storage_backend);
    match config.storage_backend {
        StorageBackend::Memory => {
            execute(MemoryStorage::new(), evaluator, clock, cli.command).await
        }
        StorageBackend::Sled => {
            let storage = SledStorage::new(&config.dir_path, Some(config.cache_size as u64))?;
            execute(storage, evaluator, clock, cli.command).await
        }
        StorageBackend::Rocksdb => {
            #[cfg(feature = "rocksdb")]
            {
                let storage = kyc_daemon::core::storage::RocksStorage::new(
                    &config.dir_path,
                    config.cache_size,
                    &config.rocksdb,
                )?;
                execute(storage, evaluator, clock, cli.command).await
            }
            #[cfg(not(feature = "rocksdb"))]
            {
                anyhow::bail!("kyc_daemon was built without the rocksdb feature")
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
