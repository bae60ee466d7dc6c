//! Source file descriptions and column layouts

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Number of spreadsheets in a standard shipping data folder
pub const STANDARD_FILE_COUNT: usize = 3;

/// How the rows of a source file are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Every row contributes one product name
    Products,
    /// Every row contributes one product occurrence to a shipment
    Shipments,
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileRole::Products => write!(f, "products"),
            FileRole::Shipments => write!(f, "shipments"),
        }
    }
}

/// A CSV file paired with the role its rows play in the load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub role: FileRole,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, role: FileRole) -> Self {
        Self {
            path: path.into(),
            role,
        }
    }

    /// The three spreadsheets of a shipping data folder, in read order.
    ///
    /// `shipping_data_0.csv` holds products, `shipping_data_1.csv` and
    /// `shipping_data_2.csv` hold shipment rows.
    pub fn standard_set(folder: &Path) -> Vec<SourceFile> {
        (0..STANDARD_FILE_COUNT)
            .map(|index| {
                let role = if index == 0 {
                    FileRole::Products
                } else {
                    FileRole::Shipments
                };
                SourceFile::new(folder.join(standard_file_name(index)), role)
            })
            .collect()
    }
}

/// File name of the spreadsheet at `index` in a shipping data folder
pub fn standard_file_name(index: usize) -> String {
    format!("shipping_data_{}.csv", index)
}

/// Zero-based column positions used when reading rows
///
/// The defaults reproduce the historical layout where column 1 doubles as
/// the shipment origin (first occurrence) and the product name (every row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShipmentColumns {
    /// Product name column in a products file
    pub product_name: usize,
    /// Shipment id column in a shipments file
    pub shipment_id: usize,
    pub origin: usize,
    pub destination: usize,
    /// Product column in a shipments file
    pub product: usize,
}

impl Default for ShipmentColumns {
    fn default() -> Self {
        Self {
            product_name: 2,
            shipment_id: 0,
            origin: 1,
            destination: 2,
            product: 1,
        }
    }
}

impl ShipmentColumns {
    /// Minimum number of fields a row needs for the given role
    pub fn required_width(&self, role: FileRole) -> usize {
        match role {
            FileRole::Products => self.product_name + 1,
            FileRole::Shipments => {
                self.shipment_id
                    .max(self.origin)
                    .max(self.destination)
                    .max(self.product)
                    + 1
            }
        }
    }
}
