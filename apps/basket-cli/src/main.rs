//! Basket CLI - manage the persisted shopping cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product (repeat to increase its quantity)
//! basket add --id a --name "Apple crate" --price 10.00 --image /img/a.png
//!
//! # Set an absolute quantity (0 removes the line)
//! basket set a 3
//!
//! # Inspect the cart
//! basket show
//! basket show --json
//! basket summary
//!
//! # Remove one product, or everything
//! basket remove a
//! basket clear
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use basket_store::{CartStore, FileSlot, StoreConfig};
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "basket")]
#[command(author, version, about = "Basket cart store")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the cart slot file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product, or bump its quantity by one
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// Unit price, e.g. `12.99`
        #[arg(long)]
        price: String,

        #[arg(long, default_value = "")]
        image: String,
    },
    /// Set a product's quantity; zero or less removes it
    Set {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product
    Remove { id: String },
    /// Empty the cart and delete its slot
    Clear,
    /// Show cart lines and totals
    Show {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the order summary including tax
    Summary,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::load(cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    let data_dir = config
        .data_dir()
        .ok_or("no data directory available; pass --data-dir")?;
    let slot = FileSlot::new(data_dir, config.slot_key());
    debug!(slot = %slot.path().display(), "Opening cart");

    let mut store = CartStore::open(slot, config.shipping);

    let output = match cli.command {
        Commands::Add {
            id,
            name,
            price,
            image,
        } => commands::add(&mut store, &id, &name, &price, &image)?,
        Commands::Set { id, quantity } => commands::set_quantity(&mut store, &id, quantity),
        Commands::Remove { id } => commands::remove(&mut store, &id),
        Commands::Clear => commands::clear(&mut store),
        Commands::Show { json: true } => commands::show_json(&store)?,
        Commands::Show { json: false } => commands::show(&store),
        Commands::Summary => commands::summary(&store, &config.tax),
    };

    println!("{output}");

    commands::ensure_saved(&store)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: command failures
/// - WARN: malformed cart slot, storage failures
/// - INFO: config load, cart hydration
/// - DEBUG: individual cart operations
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,basket=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
