//! Product request handlers.
//!
//! Each handler parses its input, performs exactly one store operation and
//! serializes the result. Bodies are taken as raw bytes so that a missing or
//! wrong `Content-Type` does not change how the JSON is read.

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::routing::ProductIdParam;
use crate::store::product::parse_object;
use crate::store::{NewProduct, Product, ProductPatch};

/// `POST /product`
///
/// Responds with the request object as received, plus the assigned `id`.
pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let (mut object, fields) = parse_object(&body)
        .and_then(|object| NewProduct::from_json(&object).map(|fields| (object, fields)))
        .inspect_err(|e| {
            tracing::warn!(reason = %e, "Rejected create request");
        })?;

    let product = state.store.create(fields);
    tracing::info!(id = product.id, name = %product.name, "Product created");

    object.insert("id".to_owned(), Value::from(product.id));
    Ok(Json(Value::Object(object)))
}

/// `GET /products`
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let products = state.store.list();
    tracing::debug!(count = products.len(), "Listed products");
    Json(products)
}

/// `GET /product/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    ProductIdParam(id): ProductIdParam,
) -> Result<Json<Product>, ApiError> {
    let product = state.store.get(id)?;
    tracing::debug!(id, "Fetched product");
    Ok(Json(product))
}

/// `PUT /product/{id}`
///
/// An unknown id is reported before the body is looked at.
pub async fn update_product(
    State(state): State<AppState>,
    ProductIdParam(id): ProductIdParam,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    if !state.store.contains(id) {
        return Err(ApiError::NotFound(id));
    }

    let patch = parse_object(&body)
        .and_then(|object| ProductPatch::from_json(&object))
        .inspect_err(|e| {
            tracing::warn!(id, reason = %e, "Rejected update request");
        })?;
    if patch.is_empty() {
        tracing::debug!(id, "Update carried no applicable fields");
    }
    let product = state.store.update(id, patch)?;

    tracing::debug!(id, "Product updated");
    Ok(Json(product))
}

/// `DELETE /product/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    ProductIdParam(id): ProductIdParam,
) -> Result<Json<Product>, ApiError> {
    let product = state.store.delete(id)?;
    tracing::info!(id, "Product deleted");
    Ok(Json(product))
}
