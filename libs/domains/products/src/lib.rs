//! Products Domain
//!
//! Inventory of products stored in PostgreSQL through sea-orm.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, validation chains
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Lookups, not-found handling, maintenance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + PostgreSQL and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, DTOs, response bodies
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, PgProductRepository, ProductService};
//! use sea_orm::DatabaseConnection;
//!
//! fn products_router(db: DatabaseConnection) -> axum::Router {
//!     let service = ProductService::new(PgProductRepository::new(db));
//!     handlers::router(service)
//! }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryProductRepository;
pub use models::{
    MessageResponse, NewProduct, Product, ProductCreatedResponse, ProductListResponse,
    ProductResponse, ProductUpdate,
};
pub use postgres::PgProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
pub use validation::{ProductId, UpdateProductRequest};
