//! Command-line interface

pub mod commands;

use clap::Parser;

pub use commands::load::LoadCommands;

#[derive(Parser, Debug)]
#[command(name = "shipload", version, about = "Load shipping spreadsheets into a SQLite shipment database")]
pub struct Cli {
    #[command(flatten)]
    pub load: LoadCommands,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
