//! In-process repository used by handler tests and local experiments.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product, ProductUpdate};
use crate::repository::ProductRepository;

#[derive(Debug)]
struct Store {
    products: BTreeMap<i32, Product>,
    next_id: i32,
}

/// [`ProductRepository`] backed by a map, with SERIAL-like ids.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    store: RwLock<Store>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                products: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        store.next_id += 1;

        let now = Utc::now();
        let product = Product {
            id,
            name: input.name,
            price: input.price,
            availability: input.availability,
            created_at: Some(now),
            updated_at: Some(now),
        };
        store.products.insert(id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.store.read().await.products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        Ok(self.store.read().await.products.values().rev().cloned().collect())
    }

    async fn update(&self, id: i32, input: ProductUpdate) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;
        Ok(store.products.get_mut(&id).map(|product| {
            product.apply_update(input);
            product.clone()
        }))
    }

    async fn toggle_availability(&self, id: i32) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;
        Ok(store.products.get_mut(&id).map(|product| {
            product.availability = !product.availability;
            product.updated_at = Some(Utc::now());
            product.clone()
        }))
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        Ok(self.store.write().await.products.remove(&id).is_some())
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.store.read().await.products.len() as u64)
    }

    async fn clear(&self) -> ProductResult<u64> {
        let mut store = self.store.write().await;
        let removed = store.products.len() as u64;
        store.products.clear();
        store.next_id = 1;
        Ok(removed)
    }
}
