//! Reusable OpenAPI responses shared by every route.

use super::{ErrorResponse, HttpErrorBody};
use crate::validation::ValidationErrors;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Validation failed; one entry per failed rule, in declaration order",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "type": "field",
            "value": "",
            "msg": "El nombre del producto no puede ir vacio",
            "path": "name",
            "location": "body"
        }]
    })
)]
pub struct ValidationErrorResponse(pub ValidationErrors);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "error": "Producto no encontrado" })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "error": "Hubo un error" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Malformed JSON body",
    content_type = "application/json",
    example = json!({ "status": "fail", "message": "JSON inválido: expected value at line 1 column 1" })
)]
pub struct MalformedJsonResponse(pub HttpErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Too many requests from this IP; see the Retry-After header",
    content_type = "application/json",
    example = json!({
        "status": "fail",
        "message": "Demasiadas peticiones desde esta IP, por favor intente de nuevo más tarde."
    })
)]
pub struct TooManyRequestsResponse(pub HttpErrorBody);
