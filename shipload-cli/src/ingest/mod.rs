//! Shipping spreadsheet ingestion
//!
//! Reads the products file and the shipment files of a data folder,
//! aggregates them in memory and writes the result to the shipment database.

pub mod aggregate;
pub mod loader;
pub mod reader;
pub mod types;

pub use aggregate::{Aggregates, ShipmentAggregate, ShipmentRowOutcome};
pub use loader::{LoadSummary, Loader};
pub use reader::{read_source, read_sources};
pub use types::*;
