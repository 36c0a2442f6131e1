//! Validation chains for the product routes.

use axum_helpers::validation::checks;
use axum_helpers::{FieldChain, FromValidated, RequestInput, ValidationErrors};
use std::sync::LazyLock;

use crate::models::{NewProduct, ProductUpdate};

pub const INVALID_ID: &str = "ID no válido";
pub const NAME_EMPTY: &str = "El nombre del producto no puede ir vacio";
pub const NAME_TOO_LONG: &str = "El nombre no puede superar los 100 caracteres";
pub const PRICE_EMPTY: &str = "El precio del producto no puede ir vacio";
pub const PRICE_NOT_NUMERIC: &str = "El valor no es valido";
pub const PRICE_NOT_POSITIVE: &str = "El precio no es valido";
pub const AVAILABILITY_INVALID: &str = "Valor para disponibilidad no válido";

pub const NAME_MAX_CHARS: u64 = 100;

fn id_chain() -> FieldChain {
    FieldChain::param("id").is_int().with_message(INVALID_ID)
}

fn name_chain() -> FieldChain {
    FieldChain::body("name")
        .not_empty()
        .with_message(NAME_EMPTY)
        .max_length(NAME_MAX_CHARS)
        .with_message(NAME_TOO_LONG)
}

fn price_chain() -> FieldChain {
    FieldChain::body("price")
        .not_empty()
        .with_message(PRICE_EMPTY)
        .is_numeric()
        .with_message(PRICE_NOT_NUMERIC)
        .custom(checks::is_positive)
        .with_message(PRICE_NOT_POSITIVE)
}

static ID_RULES: LazyLock<Vec<FieldChain>> = LazyLock::new(|| vec![id_chain()]);

static CREATE_RULES: LazyLock<Vec<FieldChain>> =
    LazyLock::new(|| vec![name_chain(), price_chain()]);

static UPDATE_RULES: LazyLock<Vec<FieldChain>> = LazyLock::new(|| {
    vec![
        id_chain(),
        name_chain(),
        price_chain(),
        FieldChain::body("availability")
            .is_boolean()
            .with_message(AVAILABILITY_INVALID),
    ]
});

/// Integer `id` path parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i32);

impl FromValidated for ProductId {
    fn rules() -> &'static [FieldChain] {
        &ID_RULES
    }

    fn from_validated(input: RequestInput) -> Result<Self, ValidationErrors> {
        input.int_param("id", INVALID_ID).map(ProductId)
    }
}

impl FromValidated for NewProduct {
    fn rules() -> &'static [FieldChain] {
        &CREATE_RULES
    }

    fn from_validated(input: RequestInput) -> Result<Self, ValidationErrors> {
        Ok(NewProduct {
            name: input.text_field("name"),
            price: input.number_field("price").unwrap_or_default(),
            availability: input.bool_field("availability").unwrap_or(true),
        })
    }
}

/// Path id plus the replacement fields of a PUT
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductRequest {
    pub id: i32,
    pub update: ProductUpdate,
}

impl FromValidated for UpdateProductRequest {
    fn rules() -> &'static [FieldChain] {
        &UPDATE_RULES
    }

    fn from_validated(input: RequestInput) -> Result<Self, ValidationErrors> {
        Ok(UpdateProductRequest {
            id: input.int_param("id", INVALID_ID)?,
            update: ProductUpdate {
                name: input.text_field("name"),
                price: input.number_field("price").unwrap_or_default(),
                availability: input.bool_field("availability").unwrap_or_default(),
            },
        })
    }
}
