//! Error-to-response mapping.
//!
//! # Design Decisions
//! - Not-found responses carry no body
//! - Rejected input gets 400 with `{"error": "<reason>"}`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::store::{ProductId, StoreError, ValidationError};

/// Errors surfaced by product handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("{0}")]
    BadRequest(#[from] ValidationError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
        }
    }
}

/// Body of a 400 response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            Self::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: reason.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
