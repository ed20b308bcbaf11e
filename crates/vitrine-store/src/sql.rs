//! SQLite-backed catalog using sqlx.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use vitrine_core::{NewProduct, Product, Result};

use crate::Catalog;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    description TEXT NOT NULL
)";

/// Product catalog backed by a SQLite database.
pub struct SqlCatalog {
    pool: SqlitePool,
}

impl SqlCatalog {
    /// Connects to the database at `url` (e.g. `sqlite:vitrine.db` or
    /// `sqlite::memory:`). File-backed databases are created if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the connection fails.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Each connection to a :memory: database gets its own database, so the
        // pool must stay at a single connection for every query to see the
        // same tables.
        let pool = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await?
        } else {
            SqlitePool::connect_with(options).await?
        };

        Ok(Self { pool })
    }

    /// Creates the `products` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the DDL statement fails.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        tracing::debug!("Product schema ensured");
        Ok(())
    }

    /// Inserts the given products, letting the database assign ids.
    /// Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; earlier inserts are not rolled back.
    pub async fn seed(&self, products: Vec<NewProduct>) -> Result<u64> {
        let mut inserted = 0;
        for product in products {
            sqlx::query("INSERT INTO products (name, price, description) VALUES (?, ?, ?)")
                .bind(&product.name)
                .bind(product.price)
                .bind(&product.description)
                .execute(&self.pool)
                .await?;
            inserted += 1;
        }
        tracing::info!(rows = inserted, "Seeded products");
        Ok(inserted)
    }

    /// Returns a handle to the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for SqlCatalog {
    async fn list(&self) -> Result<Vec<Product>> {
        // No ORDER BY: listing order is whatever the database returns.
        let products =
            sqlx::query_as::<_, Product>("SELECT id, name, price, description FROM products")
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fresh_catalog() -> SqlCatalog {
        let catalog = SqlCatalog::connect("sqlite::memory:").await.unwrap();
        catalog.migrate().await.unwrap();
        catalog
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let catalog = fresh_catalog().await;
        assert!(catalog.list().await.unwrap().is_empty());
        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn seeded_rows_come_back_with_ids() {
        let catalog = fresh_catalog().await;

        let inserted = catalog
            .seed(vec![
                NewProduct::new("Widget", 9.99, "A widget"),
                NewProduct::new("Gadget", 19.5, "A gadget"),
            ])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let mut products = catalog.list().await.unwrap();
        products.sort_by_key(|p| p.id);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].price, 9.99);
        assert_eq!(products[0].description, "A widget");
        assert_eq!(products[1].name, "Gadget");
        assert_eq!(catalog.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn migrate_is_idempotent() {
        let catalog = fresh_catalog().await;
        catalog.migrate().await.unwrap();
        catalog
            .seed(vec![NewProduct::new("Widget", 9.99, "A widget")])
            .await
            .unwrap();
        catalog.migrate().await.unwrap();
        assert_eq!(catalog.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ping_succeeds_on_live_pool() {
        let catalog = fresh_catalog().await;
        catalog.ping().await.unwrap();
        assert_eq!(catalog.backend(), "sqlite");
    }
}
