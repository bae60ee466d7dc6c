//! Loader configuration
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags. Every key is optional; missing keys take the
//! defaults below.

pub mod repository;

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::ShipmentColumns;

pub const DEFAULT_DATABASE: &str = "shipment_database.db";
pub const DEFAULT_DATA_FOLDER: &str = "./data";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file
    pub database: PathBuf,
    /// Folder holding shipping_data_0.csv .. shipping_data_2.csv
    pub data_folder: PathBuf,
    /// Create missing tables before loading
    pub create_schema: bool,
    pub columns: ShipmentColumns,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            data_folder: PathBuf::from(DEFAULT_DATA_FOLDER),
            create_schema: false,
            columns: ShipmentColumns::default(),
        }
    }
}

impl Config {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Open a pool on the configured database, creating the file if needed
    pub async fn connect(&self) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::new()
            .filename(&self.database)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", self.database.display()))?;

        log::debug!("Connected to {}", self.database.display());
        Ok(pool)
    }
}
