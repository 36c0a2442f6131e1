use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryOrder,
};

use crate::{
    entity,
    error::ProductResult,
    models::{NewProduct, Product, ProductUpdate},
    repository::ProductRepository,
};

const TRUNCATE_PRODUCTS: &str = "TRUNCATE TABLE products RESTART IDENTITY";

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> ProductResult<Option<entity::Model>> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: ProductUpdate) -> ProductResult<Option<Product>> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        active_model.name = Set(input.name);
        active_model.price = Set(input.price);
        active_model.availability = Set(input.availability);
        active_model.updated_at = Set(chrono::Utc::now().fixed_offset());

        let updated = active_model.update(&self.db).await?;
        tracing::info!(product_id = id, "Updated product");
        Ok(Some(updated.into()))
    }

    async fn toggle_availability(&self, id: i32) -> ProductResult<Option<Product>> {
        let Some(model) = self.find_model(id).await? else {
            return Ok(None);
        };

        let availability = !model.availability;
        let mut active_model = model.into_active_model();
        active_model.availability = Set(availability);
        active_model.updated_at = Set(chrono::Utc::now().fixed_offset());

        let updated = active_model.update(&self.db).await?;
        tracing::info!(product_id = id, availability, "Toggled product availability");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }

    async fn clear(&self) -> ProductResult<u64> {
        let removed = self.count().await?;
        self.db.execute_unprepared(TRUNCATE_PRODUCTS).await?;

        tracing::info!(removed, "Truncated products table");
        Ok(removed)
    }
}
