//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product, ProductUpdate};
use crate::repository::ProductRepository;

/// Product service
///
/// Resolves missing ids into [`ProductError::NotFound`] and exposes the
/// maintenance operations used by the cleanup job and the CLI.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Every product, highest id first
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: NewProduct) -> ProductResult<Product> {
        self.repository.create(input).await
    }

    /// Replace name, price and availability of an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: ProductUpdate) -> ProductResult<Product> {
        self.get_product(id).await?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Flip availability of an existing product
    #[instrument(skip(self))]
    pub async fn toggle_availability(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .toggle_availability(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }

    #[instrument(skip(self))]
    pub async fn count_products(&self) -> ProductResult<u64> {
        self.repository.count().await
    }

    /// Remove every product and restart ids at 1
    #[instrument(skip(self))]
    pub async fn clear_products(&self) -> ProductResult<u64> {
        self.repository.clear().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
