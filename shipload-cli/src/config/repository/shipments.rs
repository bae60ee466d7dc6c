//! Shipment and shipment_product repository

use anyhow::{Context, Result};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Stored shipment header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentRow {
    pub id: String,
    pub origin: String,
    pub destination: String,
}

/// Stored shipment_product row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentProductRow {
    pub shipment_id: String,
    pub product_name: String,
    pub quantity: i64,
}

/// Insert a shipment header unless one with that id exists.
/// Returns true when a row was written.
pub async fn insert_shipment_if_absent(
    conn: &mut SqliteConnection,
    id: &str,
    origin: &str,
    destination: &str,
) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO shipment (id, origin, destination) VALUES (?, ?, ?)
         ON CONFLICT(id) DO NOTHING",
    )
    .bind(id)
    .bind(origin)
    .bind(destination)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("Failed to insert shipment '{}'", id))?;

    Ok(result.rows_affected() > 0)
}

/// Insert a product quantity for a shipment.
///
/// Not deduplicated: loading the same data twice stores the pair twice.
pub async fn insert_shipment_product(
    conn: &mut SqliteConnection,
    shipment_id: &str,
    product_name: &str,
    quantity: i64,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO shipment_product (shipment_id, product_name, quantity)
         VALUES (?, ?, ?)",
    )
    .bind(shipment_id)
    .bind(product_name)
    .bind(quantity)
    .execute(&mut *conn)
    .await
    .with_context(|| {
        format!(
            "Failed to insert product '{}' for shipment '{}'",
            product_name, shipment_id
        )
    })?;

    Ok(())
}

/// Get a shipment header by id
pub async fn get_shipment(pool: &SqlitePool, id: &str) -> Result<Option<ShipmentRow>> {
    let row = sqlx::query("SELECT id, origin, destination FROM shipment WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get shipment")?;

    match row {
        Some(row) => Ok(Some(ShipmentRow {
            id: row.try_get("id")?,
            origin: row.try_get("origin")?,
            destination: row.try_get("destination")?,
        })),
        None => Ok(None),
    }
}

pub async fn count_shipments(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM shipment")
        .fetch_one(pool)
        .await
        .context("Failed to count shipments")
}

/// Product quantities stored for a shipment, in insertion order
pub async fn list_shipment_products(
    pool: &SqlitePool,
    shipment_id: &str,
) -> Result<Vec<ShipmentProductRow>> {
    let rows: Vec<(String, String, i64)> = sqlx::query_as(
        "SELECT shipment_id, product_name, quantity FROM shipment_product
         WHERE shipment_id = ?
         ORDER BY rowid",
    )
    .bind(shipment_id)
    .fetch_all(pool)
    .await
    .context("Failed to list shipment products")?;

    Ok(rows
        .into_iter()
        .map(|(shipment_id, product_name, quantity)| ShipmentProductRow {
            shipment_id,
            product_name,
            quantity,
        })
        .collect())
}

pub async fn count_shipment_products(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM shipment_product")
        .fetch_one(pool)
        .await
        .context("Failed to count shipment products")
}
