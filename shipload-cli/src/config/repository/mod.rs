//! Repository layer for database operations

pub mod products;
pub mod schema;
pub mod shipments;

pub use products::{count_products, insert_product_if_absent, list_product_names};
pub use schema::ensure_schema;
pub use shipments::{
    ShipmentProductRow, ShipmentRow, count_shipment_products, count_shipments, get_shipment,
    insert_shipment_if_absent, insert_shipment_product, list_shipment_products,
};

/// Single-connection in-memory database with the schema applied
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<std::time::Duration>)
        .max_lifetime(None::<std::time::Duration>)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}
