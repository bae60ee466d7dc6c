//! Two-phase load: read every source file, then write everything in one transaction

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;

use super::aggregate::Aggregates;
use super::reader;
use super::types::{ShipmentColumns, SourceFile};
use crate::config::Config;
use crate::config::repository;

/// Counts reported after a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_read: usize,
    pub products_seen: usize,
    pub products_inserted: usize,
    pub shipments_seen: usize,
    pub shipments_inserted: usize,
    pub shipment_products_inserted: usize,
}

impl LoadSummary {
    /// Summary of a read phase with nothing written yet
    pub fn from_aggregates(aggregates: &Aggregates) -> Self {
        Self {
            rows_read: aggregates.rows_read,
            products_seen: aggregates.product_names.len(),
            shipments_seen: aggregates.shipments.len(),
            ..Self::default()
        }
    }
}

impl std::fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows read; products {}/{} inserted; shipments {}/{} inserted; {} shipment products inserted",
            self.rows_read,
            self.products_inserted,
            self.products_seen,
            self.shipments_inserted,
            self.shipments_seen,
            self.shipment_products_inserted
        )
    }
}

/// Loads shipping spreadsheets into the shipment database
pub struct Loader {
    pool: SqlitePool,
    columns: ShipmentColumns,
}

impl Loader {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            columns: ShipmentColumns::default(),
        }
    }

    /// Open the configured database, creating the schema if the config asks for it
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = config.connect().await?;
        if config.create_schema {
            repository::ensure_schema(&pool).await?;
        }
        Ok(Self::new(pool).with_columns(config.columns))
    }

    pub fn with_columns(mut self, columns: ShipmentColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Load the three standard spreadsheets of `folder`
    pub async fn populate(&self, folder: &Path) -> Result<LoadSummary> {
        self.populate_sources(&SourceFile::standard_set(folder)).await
    }

    /// Read all sources, then write the result in a single transaction.
    ///
    /// Nothing is written if any source fails to read.
    pub async fn populate_sources(&self, sources: &[SourceFile]) -> Result<LoadSummary> {
        log::info!("Loading {} source files", sources.len());

        let aggregates = self.read_sources(sources)?;
        let summary = self.write_aggregates(&aggregates).await?;

        log::info!("Load complete: {}", summary);
        Ok(summary)
    }

    /// Read phase only
    pub fn read_sources(&self, sources: &[SourceFile]) -> Result<Aggregates> {
        reader::read_sources(sources, &self.columns)
    }

    /// Write phase: insert-if-absent for products and shipments, plain inserts
    /// for shipment products. Commits once at the end; an error drops the
    /// transaction and rolls back everything written so far.
    pub async fn write_aggregates(&self, aggregates: &Aggregates) -> Result<LoadSummary> {
        let mut summary = LoadSummary::from_aggregates(aggregates);
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start transaction")?;

        for name in &aggregates.product_names {
            if repository::insert_product_if_absent(&mut *tx, name).await? {
                summary.products_inserted += 1;
            }
        }
        log::debug!(
            "Products: {} inserted, {} already present",
            summary.products_inserted,
            summary.products_seen - summary.products_inserted
        );

        for (shipment_id, shipment) in &aggregates.shipments {
            if repository::insert_shipment_if_absent(
                &mut *tx,
                shipment_id,
                &shipment.origin,
                &shipment.destination,
            )
            .await?
            {
                summary.shipments_inserted += 1;
            }

            for (product_name, quantity) in &shipment.products {
                repository::insert_shipment_product(&mut *tx, shipment_id, product_name, *quantity)
                    .await?;
                summary.shipment_products_inserted += 1;
            }
        }
        log::debug!(
            "Shipments: {} inserted, {} already present; {} shipment products inserted",
            summary.shipments_inserted,
            summary.shipments_seen - summary.shipments_inserted,
            summary.shipment_products_inserted
        );

        tx.commit().await.context("Failed to commit transaction")?;
        Ok(summary)
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
