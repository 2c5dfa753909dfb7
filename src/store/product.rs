//! Product record and request payload validation.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Identifier assigned by the store at creation time.
pub type ProductId = u64;

/// A stored product.
///
/// Only `id`, `name` and `description` are ever serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,

    /// Reserved, never populated.
    #[serde(skip)]
    pub icon: String,

    /// Reserved, never populated.
    #[serde(skip)]
    pub icon_data: Vec<u8>,
}

impl Product {
    pub(crate) fn new(id: ProductId, fields: NewProduct) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            icon: String::new(),
            icon_data: Vec::new(),
        }
    }
}

/// Rejected product input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Body did not parse as a JSON object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// `name` or `description` missing or not a string.
    #[error("name and description are required strings")]
    MissingFields,

    /// `name` was supplied as an empty string.
    #[error("name must not be empty")]
    EmptyName,
}

/// Fields required to create a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
}

impl NewProduct {
    /// Extract a new product from a decoded JSON object.
    ///
    /// Both fields must be present and string-typed, and `name` must be
    /// non-empty. Any other keys are ignored.
    pub fn from_json(object: &Map<String, Value>) -> Result<Self, ValidationError> {
        let name = object.get("name").and_then(Value::as_str);
        let description = object.get("description").and_then(Value::as_str);

        match (name, description) {
            (Some(""), Some(_)) => Err(ValidationError::EmptyName),
            (Some(name), Some(description)) => Ok(Self {
                name: name.to_owned(),
                description: description.to_owned(),
            }),
            _ => Err(ValidationError::MissingFields),
        }
    }
}

/// A partial update. `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProductPatch {
    /// Extract a patch from a decoded JSON object.
    ///
    /// Fields that are absent or not strings are skipped rather than
    /// rejected. An empty `name` is rejected.
    pub fn from_json(object: &Map<String, Value>) -> Result<Self, ValidationError> {
        let name = object.get("name").and_then(Value::as_str);
        if name == Some("") {
            return Err(ValidationError::EmptyName);
        }

        Ok(Self {
            name: name.map(str::to_owned),
            description: object
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_owned),
        })
    }

    /// Returns true if applying this patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Decode a request body into a JSON object.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        _ => Err(ValidationError::NotAnObject),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn new_product_requires_string_fields() {
        let ok = NewProduct::from_json(&object(json!({"name": "Widget", "description": "A widget"})));
        assert_eq!(
            ok,
            Ok(NewProduct {
                name: "Widget".into(),
                description: "A widget".into()
            })
        );

        let missing = NewProduct::from_json(&object(json!({"name": "Widget"})));
        assert_eq!(missing, Err(ValidationError::MissingFields));

        let mistyped = NewProduct::from_json(&object(json!({"name": 7, "description": "x"})));
        assert_eq!(mistyped, Err(ValidationError::MissingFields));
    }

    #[test]
    fn new_product_rejects_empty_name() {
        let res = NewProduct::from_json(&object(json!({"name": "", "description": "x"})));
        assert_eq!(res, Err(ValidationError::EmptyName));
    }

    #[test]
    fn patch_skips_mistyped_fields() {
        let patch = ProductPatch::from_json(&object(json!({"name": 42, "description": "new"}))).unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.description.as_deref(), Some("new"));

        let empty = ProductPatch::from_json(&object(json!({}))).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn patch_rejects_empty_name() {
        let res = ProductPatch::from_json(&object(json!({"name": ""})));
        assert_eq!(res, Err(ValidationError::EmptyName));
    }

    #[test]
    fn parse_object_rejects_non_objects() {
        assert!(parse_object(br#"{"a":1}"#).is_ok());
        assert_eq!(parse_object(b"[1,2]"), Err(ValidationError::NotAnObject));
        assert_eq!(parse_object(b"not json"), Err(ValidationError::NotAnObject));
        assert_eq!(parse_object(b""), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn reserved_fields_are_not_serialized() {
        let product = Product::new(
            3,
            NewProduct {
                name: "n".into(),
                description: "d".into(),
            },
        );
        let json = serde_json::to_string(&product).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"n","description":"d"}"#);
    }
}
