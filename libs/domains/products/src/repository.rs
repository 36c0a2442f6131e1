use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductUpdate};

/// Repository trait for Product persistence
///
/// Lookups return `Ok(None)` for missing ids; the service turns that into
/// a not-found error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product, assigning the next id
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Every product, highest id first
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Replace name, price and availability
    async fn update(&self, id: i32, input: ProductUpdate) -> ProductResult<Option<Product>>;

    /// Flip availability
    async fn toggle_availability(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Delete a product by ID; `false` when nothing was deleted
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    async fn count(&self) -> ProductResult<u64>;

    /// Remove every product and restart ids at 1, returning how many were removed
    async fn clear(&self) -> ProductResult<u64>;
}
