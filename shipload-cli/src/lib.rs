//! Load shipping spreadsheets into a SQLite shipment database.

pub mod cli;
pub mod config;
pub mod ingest;

pub use config::Config;
pub use ingest::{FileRole, LoadSummary, Loader, SourceFile};
