//! Route table.
//!
//! ```text
//! POST   /product        → create_product
//! GET    /products       → list_products
//! GET    /product/{id}   → get_product
//! PUT    /product/{id}   → update_product
//! DELETE /product/{id}   → delete_product
//! ```
//!
//! Unknown paths fall through to axum's 404. `{id}` is checked against
//! `[0-9]+` ahead of method dispatch, so `/product/abc` is a 404 for every
//! method; a matching path with an unregistered method gets 405.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::http::handlers::{
    create_product, delete_product, get_product, list_products, update_product,
};
use crate::http::server::AppState;
use crate::routing::matcher::require_product_id;

/// Build the product routes. State is supplied by the caller.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/product", post(create_product))
        .route("/products", get(list_products))
        .route(
            "/product/{id}",
            get(get_product)
                .put(update_product)
                .delete(delete_product)
                .layer(middleware::from_fn(require_product_id)),
        )
}
