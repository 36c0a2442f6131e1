//! Ordered field validation for request bodies and path parameters.
//!
//! A route declares a list of [`FieldChain`]s. Every rule of every chain runs
//! and each failure becomes one [`FieldError`], in declaration order. Rules do
//! not stop at the first failure of their chain.
//!
//! ```ignore
//! static RULES: LazyLock<Vec<FieldChain>> = LazyLock::new(|| {
//!     vec![
//!         FieldChain::param("id").is_int().with_message("ID no válido"),
//!         FieldChain::body("price").not_empty().is_numeric(),
//!     ]
//! });
//! ```

pub mod checks;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

/// Message used when a rule is not given one.
pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Where a validated value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One failed rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Always `"field"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Offending value, absent when the field was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

impl FieldError {
    pub fn new(
        path: impl Into<String>,
        location: Location,
        value: Option<Value>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            kind: "field".to_string(),
            value,
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }
}

/// 400 body listing every failed rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.msg.as_str()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        tracing::debug!(errors = self.len(), "Request validation failed");
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

type Check = Box<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

struct Rule {
    check: Check,
    message: String,
}

/// Ordered rules for one field.
pub struct FieldChain {
    path: String,
    location: Location,
    rules: Vec<Rule>,
}

impl FieldChain {
    pub fn body(path: impl Into<String>) -> Self {
        Self::new(path, Location::Body)
    }

    pub fn param(path: impl Into<String>) -> Self {
        Self::new(path, Location::Params)
    }

    fn new(path: impl Into<String>, location: Location) -> Self {
        Self {
            path: path.into(),
            location,
            rules: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Append a rule; `check` returns `true` when the value is acceptable.
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            check: Box::new(check),
            message: DEFAULT_MESSAGE.to_string(),
        });
        self
    }

    pub fn not_empty(self) -> Self {
        self.custom(checks::is_present)
    }

    pub fn is_numeric(self) -> Self {
        self.custom(checks::is_numeric)
    }

    pub fn is_int(self) -> Self {
        self.custom(checks::is_int)
    }

    pub fn is_boolean(self) -> Self {
        self.custom(checks::is_boolean)
    }

    pub fn max_length(self, max: u64) -> Self {
        self.custom(move |value| checks::max_chars(value, max))
    }

    /// Set the message of the most recently added rule.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Some(rule) = self.rules.last_mut() {
            rule.message = message.into();
        }
        self
    }

    /// Run every rule against `value`, appending one error per failure.
    pub fn run(&self, value: Option<&Value>, errors: &mut Vec<FieldError>) {
        for rule in &self.rules {
            if !(rule.check)(value) {
                errors.push(FieldError::new(
                    self.path.clone(),
                    self.location,
                    value.cloned(),
                    rule.message.clone(),
                ));
            }
        }
    }
}

impl fmt::Debug for FieldChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldChain")
            .field("path", &self.path)
            .field("location", &self.location)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Raw path parameters and JSON body of a request.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    params: HashMap<String, Value>,
    body: Value,
}

impl RequestInput {
    pub fn new(params: HashMap<String, String>, body: Value) -> Self {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
            body,
        }
    }

    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    pub fn lookup(&self, location: Location, path: &str) -> Option<&Value> {
        match location {
            Location::Body => self.field(path),
            Location::Params => self.param(path),
        }
    }

    /// Path parameter as `i32`, or a single `params` error with `message`.
    pub fn int_param(&self, name: &str, message: &str) -> Result<i32, ValidationErrors> {
        let value = self.param(name);
        checks::to_text(value)
            .trim_start_matches('+')
            .parse()
            .map_err(|_| {
                ValidationErrors::single(FieldError::new(
                    name,
                    Location::Params,
                    value.cloned(),
                    message,
                ))
            })
    }

    pub fn text_field(&self, name: &str) -> String {
        checks::to_text(self.field(name))
    }

    pub fn number_field(&self, name: &str) -> Option<f64> {
        checks::to_number(self.field(name))
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        checks::to_bool(self.field(name))
    }
}

/// Run `chains` in order against `input`.
pub fn validate(chains: &[FieldChain], input: &RequestInput) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();
    for chain in chains {
        chain.run(input.lookup(chain.location(), chain.path()), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn price_chain() -> FieldChain {
        FieldChain::body("price")
            .not_empty()
            .with_message("empty")
            .is_numeric()
            .with_message("not numeric")
            .custom(checks::is_positive)
            .with_message("not positive")
    }

    fn input(body: Value) -> RequestInput {
        RequestInput::new(HashMap::new(), body)
    }

    #[test]
    fn test_every_rule_reports_in_order() {
        let err = validate(&[price_chain()], &input(json!({}))).unwrap_err();
        assert_eq!(err.messages(), vec!["empty", "not numeric", "not positive"]);
        assert!(err.errors.iter().all(|e| e.value.is_none()));
    }

    #[test]
    fn test_chains_report_in_declaration_order() {
        let chains = [
            FieldChain::body("name").not_empty().with_message("name"),
            price_chain(),
        ];
        let err = validate(&chains, &input(json!({ "price": "hola" }))).unwrap_err();
        assert_eq!(err.messages(), vec!["name", "not numeric", "not positive"]);
    }

    #[test]
    fn test_error_entry_shape() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "abc".to_string());
        let chains = [FieldChain::param("id").is_int().with_message("ID no válido")];

        let err = validate(&chains, &RequestInput::new(params, json!({}))).unwrap_err();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "errors": [{
                    "type": "field",
                    "value": "abc",
                    "msg": "ID no válido",
                    "path": "id",
                    "location": "params"
                }]
            })
        );
    }

    #[test]
    fn test_rule_without_message_uses_default() {
        let chains = [FieldChain::body("flag").is_boolean()];
        let err = validate(&chains, &input(json!({ "flag": "maybe" }))).unwrap_err();
        assert_eq!(err.messages(), vec![DEFAULT_MESSAGE]);
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate(&[price_chain()], &input(json!({ "price": 12.5 }))).is_ok());
        assert!(validate(&[price_chain()], &input(json!({ "price": "12.5" }))).is_ok());
    }

    #[test]
    fn test_typed_accessors() {
        let mut params = HashMap::new();
        params.insert("id".to_string(), "7".to_string());
        let input = RequestInput::new(
            params,
            json!({ "name": 123, "price": "9.5", "availability": "false" }),
        );

        assert_eq!(input.int_param("id", "bad").unwrap(), 7);
        assert_eq!(input.text_field("name"), "123");
        assert_eq!(input.number_field("price"), Some(9.5));
        assert_eq!(input.bool_field("availability"), Some(false));
        assert!(input.int_param("missing", "bad").is_err());
    }
}
