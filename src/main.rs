use clap::Parser;
use miette::{IntoDiagnostic, Result};
use netprice::application::service::PurchaseConditionsService;
use netprice::config::Settings;
use netprice::domain::ports::{CatalogStoreBox, LineItemStoreBox};
use netprice::infrastructure::in_memory::{InMemoryCatalogStore, InMemoryLineItemStore};
use netprice::interfaces::csv::quote_writer::QuoteWriter;
use netprice::interfaces::json::line_item_reader::LineItemReader;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input line items, one JSON document per line
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Settings file (TOML). Defaults to ./netprice.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refuse line items whose net price is negative
    #[arg(long)]
    reject_negative: bool,

    /// Refuse percentage discounts above this value
    #[arg(long)]
    max_percentage: Option<Decimal>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_max_level(level)
        .init();
}

fn in_memory_stores() -> (LineItemStoreBox, CatalogStoreBox) {
    let line_items: LineItemStoreBox = Box::new(InMemoryLineItemStore::new());
    let catalog: CatalogStoreBox = Box::new(InMemoryCatalogStore::new());
    (line_items, catalog)
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<&Path>) -> Result<(LineItemStoreBox, CatalogStoreBox)> {
    use netprice::infrastructure::rocksdb::RocksDBStore;

    if let Some(db_path) = db_path {
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        tracing::info!(path = %db_path.display(), "using persistent storage");
        let line_items: LineItemStoreBox = Box::new(store.clone());
        let catalog: CatalogStoreBox = Box::new(store);
        return Ok((line_items, catalog));
    }

    Ok(in_memory_stores())
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<&Path>) -> Result<(LineItemStoreBox, CatalogStoreBox)> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }

    Ok(in_memory_stores())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref()).into_diagnostic()?;
    if cli.reject_negative {
        settings.policy.reject_negative = true;
    }
    if let Some(max_percentage) = cli.max_percentage {
        settings.policy.max_percentage = Some(max_percentage);
    }

    let (line_items, catalog) = open_stores(cli.db_path.as_deref())?;
    let service = PurchaseConditionsService::new(line_items, catalog).with_policy(settings.policy);

    // Process line items
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = LineItemReader::new(file);
    for item in reader.line_items() {
        match item {
            Ok(item) => {
                let id = item.id;
                if let Err(e) = service.save(item).await {
                    error!(item = id, "Error saving line item: {}", e);
                }
            }
            Err(e) => {
                error!("Error reading line item: {}", e);
            }
        }
    }

    let items = service.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = QuoteWriter::new(stdout.lock());
    writer.write_quotes(&items).into_diagnostic()?;

    Ok(())
}
