//! The catalog trait and the in-memory backend.

use async_trait::async_trait;
use parking_lot::RwLock;
use vitrine_core::{NewProduct, Product, Result};

/// Trait for product catalog backends.
///
/// The HTTP layer only reads through this trait; writes (seeding) are an
/// implementation concern of each backend.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Returns every product in the catalog, in whatever order the backend
    /// yields them.
    async fn list(&self) -> Result<Vec<Product>>;

    /// Returns the total number of products.
    async fn count(&self) -> Result<u64>;

    /// Probes backend connectivity.
    async fn ping(&self) -> Result<()>;

    /// A short name for the backend, for status reporting.
    fn backend(&self) -> &'static str;
}

/// In-memory catalog (for development/testing).
///
/// Preserves insertion order and assigns ids sequentially from 1, mirroring
/// the contract of [`crate::SqlCatalog`] on a fresh database.
pub struct MemoryCatalog {
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalog {
    /// Creates a new empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            products: RwLock::new(Vec::new()),
        }
    }

    /// Inserts a product, assigning the next id, and returns the stored row.
    pub fn insert(&self, product: NewProduct) -> Product {
        let mut products = self.products.write();
        let stored = Product {
            id: products.len() as i64 + 1,
            name: product.name,
            price: product.price,
            description: product.description,
        };
        products.push(stored.clone());
        stored
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().clone())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.products.read().len() as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
