use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "name": "Monitor Curvo de 49 Pulgadas",
    "price": 399.99,
    "availability": true
}))]
pub struct Product {
    /// Sequential identifier assigned by the store
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Shape returned by list and get-by-id.
    pub fn without_timestamps(mut self) -> Self {
        self.created_at = None;
        self.updated_at = None;
        self
    }

    /// Shape returned after toggling availability.
    pub fn without_created_at(mut self) -> Self {
        self.created_at = None;
        self
    }

    /// Replace name, price and availability, touching `updated_at`.
    pub fn apply_update(&mut self, update: ProductUpdate) {
        self.name = update.name;
        self.price = update.price;
        self.availability = update.availability;
        self.updated_at = Some(Utc::now());
    }
}

/// Input for creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "name": "Monitor Curvo de 49 Pulgadas", "price": 399.99 }))]
pub struct NewProduct {
    /// Non-empty, at most 100 characters
    pub name: String,
    /// Greater than 0; numeric strings are accepted
    pub price: f64,
    /// Defaults to `true`
    #[serde(default = "default_availability")]
    pub availability: bool,
}

fn default_availability() -> bool {
    true
}

/// Full replacement of a product's editable fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({ "name": "Monitor Curvo", "price": 300, "availability": false }))]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    /// `true`, `false`, `"true"`, `"false"`, `1`, `0`, `"1"` or `"0"`
    pub availability: bool,
}

/// `{data}` body holding one product
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

/// `{data}` body holding every product, newest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

/// Body returned by a successful create
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "data": {
        "id": 1,
        "name": "Monitor Curvo de 49 Pulgadas",
        "price": 399.99,
        "availability": true,
        "createdAt": "2025-01-15T10:00:00Z",
        "updatedAt": "2025-01-15T10:00:00Z"
    },
    "msg": "Producto creado correctamente"
}))]
pub struct ProductCreatedResponse {
    pub data: Product,
    pub msg: String,
}

/// `{msg}` body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: 7,
            name: "Teclado".to_string(),
            price: 49.5,
            availability: true,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let value = serde_json::to_value(product()).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_without_timestamps_omits_both() {
        let value = serde_json::to_value(product().without_timestamps()).unwrap();
        assert_eq!(
            value,
            json!({ "id": 7, "name": "Teclado", "price": 49.5, "availability": true })
        );
    }

    #[test]
    fn test_without_created_at_keeps_updated_at() {
        let value = serde_json::to_value(product().without_created_at()).unwrap();
        assert!(value.get("createdAt").is_none());
        assert!(value.get("updatedAt").is_some());
    }

    #[test]
    fn test_new_product_availability_defaults_to_true() {
        let input: NewProduct =
            serde_json::from_value(json!({ "name": "Mouse", "price": 10.0 })).unwrap();
        assert!(input.availability);
    }

    #[test]
    fn test_apply_update_replaces_fields() {
        let mut product = product();
        let before = product.updated_at;
        product.apply_update(ProductUpdate {
            name: "Teclado mecánico".to_string(),
            price: 89.0,
            availability: false,
        });
        assert_eq!(product.name, "Teclado mecánico");
        assert_eq!(product.price, 89.0);
        assert!(!product.availability);
        assert!(product.updated_at >= before);
    }
}
