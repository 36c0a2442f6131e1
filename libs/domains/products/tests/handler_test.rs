//! Handler tests for Products domain
//!
//! These drive `handlers::router` with an in-memory repository:
//! - Validation chains and their error bodies
//! - Response shapes and status codes
//! - Not-found handling and store failures
//!
//! Unlike the application tests, these cover only the products router,
//! without CORS, rate limits or the terminal error handler.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::*;
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> axum::Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn create(app: &axum::Router, name: &str, price: f64) -> i64 {
    let (status, body) = send(app, "POST", "/", Some(json!({ "name": name, "price": price }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

fn messages(body: &Value) -> Vec<&str> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_create_product_returns_201_with_message() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({ "name": "Monitor Curvo", "price": 399.99 })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["msg"], "Producto creado correctamente");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Monitor Curvo");
    assert_eq!(body["data"]["availability"], true);
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_with_empty_body_returns_four_errors() {
    let (status, body) = send(&app(), "POST", "/", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec![
            "El nombre del producto no puede ir vacio",
            "El precio del producto no puede ir vacio",
            "El valor no es valido",
            "El precio no es valido",
        ]
    );
    assert_eq!(body["errors"][0]["type"], "field");
    assert_eq!(body["errors"][0]["path"], "name");
    assert_eq!(body["errors"][0]["location"], "body");
}

#[tokio::test]
async fn test_create_without_body_is_validated_as_empty() {
    let (status, body) = send(&app(), "POST", "/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_create_with_non_numeric_price_returns_two_errors() {
    let (status, body) = send(
        &app(),
        "POST",
        "/",
        Some(json!({ "name": "Monitor", "price": "hola" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["El valor no es valido", "El precio no es valido"]);
    assert_eq!(body["errors"][0]["value"], "hola");
}

#[tokio::test]
async fn test_create_with_non_positive_price_returns_one_error() {
    for price in [json!(0), json!(-10)] {
        let (status, body) = send(
            &app(),
            "POST",
            "/",
            Some(json!({ "name": "Monitor", "price": price })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(messages(&body), vec!["El precio no es valido"]);
    }
}

#[tokio::test]
async fn test_create_with_malformed_json_is_400() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "fail");
    assert!(body["message"].as_str().unwrap().starts_with("JSON inválido"));
}

#[tokio::test]
async fn test_list_is_newest_first_without_timestamps() {
    let app = app();
    create(&app, "Primero", 10.0).await;
    let newest = create(&app, "Segundo", 20.0).await;

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], newest);
    assert!(data[0].get("createdAt").is_none());
    assert!(data[0].get("updatedAt").is_none());
}

#[tokio::test]
async fn test_get_product_by_id() {
    let app = app();
    let id = create(&app, "Teclado", 49.9).await;

    let (status, body) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "data": { "id": id, "name": "Teclado", "price": 49.9, "availability": true } })
    );
}

#[tokio::test]
async fn test_get_with_non_integer_id_returns_single_error() {
    let (status, body) = send(&app(), "GET", "/not-a-number", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), vec!["ID no válido"]);
    assert_eq!(body["errors"][0]["location"], "params");
    assert_eq!(body["errors"][0]["value"], "not-a-number");
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let (status, body) = send(&app(), "GET", "/2000", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Producto no encontrado" }));
}

#[tokio::test]
async fn test_update_product_replaces_fields() {
    let app = app();
    let id = create(&app, "Monitor", 300.0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/{id}"),
        Some(json!({ "name": "Monitor 4K", "price": "450", "availability": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Producto actualizado correctamente" }));

    let (_, body) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(body["data"]["name"], "Monitor 4K");
    assert_eq!(body["data"]["price"], 450.0);
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn test_update_validates_id_and_body_together() {
    let (status, body) = send(
        &app(),
        "PUT",
        "/abc",
        Some(json!({ "name": "", "price": 10, "availability": "maybe" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec![
            "ID no válido",
            "El nombre del producto no puede ir vacio",
            "Valor para disponibilidad no válido",
        ]
    );
}

#[tokio::test]
async fn test_update_with_empty_body_returns_five_errors() {
    let app = app();
    let id = create(&app, "Teclado", 45.0).await;

    let (status, body) = send(&app, "PUT", &format!("/{}", id), Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        vec![
            "El nombre del producto no puede ir vacio",
            "El precio del producto no puede ir vacio",
            "El valor no es valido",
            "El precio no es valido",
            "Valor para disponibilidad no válido",
        ]
    );
    assert_eq!(body["errors"][4]["path"], "availability");
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let (status, body) = send(
        &app(),
        "PUT",
        "/2000",
        Some(json!({ "name": "Monitor", "price": 10, "availability": true })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Producto no encontrado");
}

#[tokio::test]
async fn test_patch_toggles_availability_and_twice_restores_it() {
    let app = app();
    let id = create(&app, "Silla", 80.0).await;

    let (status, body) = send(&app, "PATCH", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"], false);
    assert!(body["data"].get("createdAt").is_none());
    assert!(body["data"]["updatedAt"].is_string());

    let (_, body) = send(&app, "PATCH", &format!("/{id}"), None).await;
    assert_eq!(body["data"]["availability"], true);
}

#[tokio::test]
async fn test_patch_missing_product_returns_404() {
    let (status, _) = send(&app(), "PATCH", "/2000", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_permanent() {
    let app = app();
    let id = create(&app, "Lámpara", 35.0).await;

    let (status, body) = send(&app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "msg": "Producto eliminado" }));

    let (status, _) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unsupported_method_uses_route_not_found() {
    let (status, body) = send(&app(), "POST", "/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
}

#[tokio::test]
async fn test_openapi_lists_product_paths() {
    use utoipa::OpenApi;

    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/{id}"));
    assert_eq!(doc["tags"][0]["name"], "Products");
}

#[tokio::test]
async fn test_store_failure_returns_generic_500() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset by peer".to_string())])
        .into_connection();
    let app = handlers::router(ProductService::new(PgProductRepository::new(db)));

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Hubo un error" }));
}
