//! Extractor that runs validation chains over path parameters and the JSON
//! body before the handler is called.

use crate::errors::HttpError;
use crate::validation::{FieldChain, Location, RequestInput, ValidationErrors, validate};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Input type built from a request that passed its validation chains.
pub trait FromValidated: Sized {
    /// Chains to run, in order.
    fn rules() -> &'static [FieldChain];

    /// Build the value once [`rules`](Self::rules) passed.
    fn from_validated(input: RequestInput) -> Result<Self, ValidationErrors>;
}

/// Extractor for any [`FromValidated`] type.
///
/// Rejections:
/// - 400 `{errors: [...]}` when any rule fails
/// - 400 `{status: "fail", message}` when the body is malformed JSON
///
/// A missing body, or one that is not `application/json`, is validated as `{}`.
///
/// ```ignore
/// async fn get_product(Validated(ProductId(id)): Validated<ProductId>) -> String {
///     format!("Product {}", id)
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T, S> FromRequest<S> for Validated<T>
where
    T: FromValidated,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let rules = T::rules();
        let (mut parts, body) = req.into_parts();

        let params = if rules.iter().any(|c| c.location() == Location::Params) {
            RawPathParams::from_request_parts(&mut parts, state)
                .await
                .map_err(IntoResponse::into_response)?
                .iter()
                .map(|(name, value)| (name.to_owned(), value.to_owned()))
                .collect()
        } else {
            HashMap::new()
        };

        let body = if rules.iter().any(|c| c.location() == Location::Body) {
            let is_json = is_json_request(&parts.headers);
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(IntoResponse::into_response)?;
            parse_body(is_json, &bytes).map_err(IntoResponse::into_response)?
        } else {
            Value::Object(Map::new())
        };

        let input = RequestInput::new(params, body);
        validate(rules, &input).map_err(IntoResponse::into_response)?;

        T::from_validated(input)
            .map(Validated)
            .map_err(IntoResponse::into_response)
    }
}

fn is_json_request(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

fn parse_body(is_json: bool, bytes: &Bytes) -> Result<Value, HttpError> {
    if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_slice(bytes).map_err(|e| HttpError::bad_request(format!("JSON inválido: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::checks;
    use axum::{Router, body::Body, http::StatusCode, routing::put};
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::sync::LazyLock;
    use tower::ServiceExt;

    #[derive(Debug)]
    struct Rename {
        id: i32,
        name: String,
    }

    static RENAME_RULES: LazyLock<Vec<FieldChain>> = LazyLock::new(|| {
        vec![
            FieldChain::param("id").is_int().with_message("bad id"),
            FieldChain::body("name").not_empty().with_message("empty name"),
            FieldChain::body("score")
                .custom(|v| v.is_none() || checks::is_numeric(v))
                .with_message("bad score"),
        ]
    });

    impl FromValidated for Rename {
        fn rules() -> &'static [FieldChain] {
            &RENAME_RULES
        }

        fn from_validated(input: RequestInput) -> Result<Self, ValidationErrors> {
            Ok(Self {
                id: input.int_param("id", "bad id")?,
                name: input.text_field("name"),
            })
        }
    }

    async fn rename(Validated(rename): Validated<Rename>) -> String {
        format!("{}:{}", rename.id, rename.name)
    }

    fn app() -> Router {
        Router::new().route("/items/{id}", put(rename))
    }

    async fn send(uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method("PUT").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = app()
            .oneshot(builder.body(Body::from(body.to_owned())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_request_reaches_handler() {
        let (status, body) = send("/items/3", Some("application/json"), r#"{"name":"Mouse"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"3:Mouse");
    }

    #[tokio::test]
    async fn test_param_and_body_errors_are_collected_together() {
        let (status, body) =
            send("/items/abc", Some("application/json"), r#"{"score":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let body: Value = serde_json::from_slice(&body).unwrap();
        let messages: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["msg"].as_str().unwrap())
            .collect();
        assert_eq!(messages, vec!["bad id", "empty name", "bad score"]);
    }

    #[tokio::test]
    async fn test_non_json_body_is_treated_as_empty() {
        let (status, body) = send("/items/1", Some("text/plain"), "name=Mouse").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["errors"][0]["msg"], "empty name");
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = send("/items/1", Some("application/json"), "{\"name\":").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "fail");
        assert!(body["message"].as_str().unwrap().starts_with("JSON inválido"));
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_json_request(&headers));

        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json_request(&headers));

        headers.insert(header::CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());
        assert!(is_json_request(&headers));
    }

    #[test]
    fn test_blank_body_is_empty_object() {
        assert_eq!(parse_body(true, &Bytes::from_static(b"  \n")).unwrap(), json!({}));
    }
}
