//! Product table repository

use anyhow::{Context, Result};
use sqlx::{SqliteConnection, SqlitePool};

/// Insert a product by name unless one with that name exists.
/// Returns true when a row was written.
pub async fn insert_product_if_absent(conn: &mut SqliteConnection, name: &str) -> Result<bool> {
    let result = sqlx::query(
        "INSERT INTO product (name) VALUES (?)
         ON CONFLICT(name) DO NOTHING",
    )
    .bind(name)
    .execute(&mut *conn)
    .await
    .with_context(|| format!("Failed to insert product '{}'", name))?;

    Ok(result.rows_affected() > 0)
}

/// All product names, alphabetically
pub async fn list_product_names(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM product ORDER BY name")
        .fetch_all(pool)
        .await
        .context("Failed to list products")?;

    Ok(rows.into_iter().map(|(name,)| name).collect())
}

pub async fn count_products(pool: &SqlitePool) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM product")
        .fetch_one(pool)
        .await
        .context("Failed to count products")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::repository::test_pool;

    #[tokio::test]
    async fn test_insert_product_if_absent_ignores_duplicates() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        assert!(insert_product_if_absent(&mut *conn, "Widget").await.unwrap());
        assert!(!insert_product_if_absent(&mut *conn, "Widget").await.unwrap());
        assert!(insert_product_if_absent(&mut *conn, "Gadget").await.unwrap());
        drop(conn);

        assert_eq!(count_products(&pool).await.unwrap(), 2);
        assert_eq!(
            list_product_names(&pool).await.unwrap(),
            vec!["Gadget".to_string(), "Widget".to_string()]
        );
    }
}
