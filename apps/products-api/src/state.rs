//! Application state management

use domain_products::{PgProductRepository, ProductService};
use sea_orm::DatabaseConnection;

pub type Products = ProductService<PgProductRepository>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    pub products: Products,
}

impl AppState {
    pub fn new(config: crate::config::Config, db: DatabaseConnection) -> Self {
        let products = ProductService::new(PgProductRepository::new(db.clone()));
        Self {
            config,
            db,
            products,
        }
    }
}
