//! Table definitions for the shipment database
//!
//! Normal runs expect these tables to exist already. `ensure_schema` is only
//! called when schema creation is requested explicitly.

use anyhow::{Context, Result};
use sqlx::SqlitePool;

const CREATE_TABLES: &[(&str, &str)] = &[
    (
        "product",
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    ),
    (
        "shipment",
        r#"
        CREATE TABLE IF NOT EXISTS shipment (
            id TEXT PRIMARY KEY NOT NULL,
            origin TEXT NOT NULL,
            destination TEXT NOT NULL
        )
        "#,
    ),
    (
        "shipment_product",
        r#"
        CREATE TABLE IF NOT EXISTS shipment_product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            shipment_id TEXT NOT NULL,
            product_name TEXT NOT NULL,
            quantity INTEGER NOT NULL
        )
        "#,
    ),
];

/// Create the product, shipment and shipment_product tables if missing
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    for (table, ddl) in CREATE_TABLES {
        sqlx::query(*ddl)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create table {}", table))?;
    }

    log::debug!("Schema ensured ({} tables)", CREATE_TABLES.len());
    Ok(())
}
