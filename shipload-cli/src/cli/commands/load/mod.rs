//! Load command arguments

mod handler;

pub use handler::{handle_load_command, resolve_config};

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct LoadCommands {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// SQLite database file [default: shipment_database.db]
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Folder containing shipping_data_0.csv .. shipping_data_2.csv [default: ./data]
    #[arg(long = "data")]
    pub data_folder: Option<PathBuf>,

    /// Create the product, shipment and shipment_product tables if missing
    #[arg(long)]
    pub create_schema: bool,

    /// Read and aggregate the spreadsheets without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
