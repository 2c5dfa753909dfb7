//! Path parameter matching.
//!
//! # Design Decisions
//! - `{id}` must be one or more ASCII digits; leading zeros are allowed
//! - A segment that fails the pattern is treated as an unmatched path (404),
//!   so handlers only ever see valid ids
//! - Digit strings too large for `u64` cannot name a stored product and are
//!   also unmatched

use axum::{
    extract::{FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::store::ProductId;

/// Returns the id if `segment` matches `[0-9]+` and fits in a `u64`.
pub fn match_product_id(segment: &str) -> Option<ProductId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Extractor for the `{id}` segment of `/product/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductIdParam(pub ProductId);

impl<S> FromRequestParts<S> for ProductIdParam
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;

        match match_product_id(&segment) {
            Some(id) => Ok(Self(id)),
            None => {
                tracing::debug!(segment = %segment, "Product id does not match [0-9]+");
                Err(StatusCode::NOT_FOUND)
            }
        }
    }
}

/// Route middleware for `/product/{id}`.
///
/// Runs before method dispatch, so a non-digit id is a 404 for every method
/// and only digit paths can produce a 405.
pub async fn require_product_id(_id: ProductIdParam, request: Request, next: Next) -> Response {
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_digit_sequences() {
        assert_eq!(match_product_id("0"), Some(0));
        assert_eq!(match_product_id("42"), Some(42));
        assert_eq!(match_product_id("007"), Some(7));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(match_product_id(""), None);
        assert_eq!(match_product_id("abc"), None);
        assert_eq!(match_product_id("-1"), None);
        assert_eq!(match_product_id("+1"), None);
        assert_eq!(match_product_id("1a"), None);
        assert_eq!(match_product_id(" 1"), None);
    }

    #[test]
    fn rejects_ids_beyond_u64() {
        assert_eq!(match_product_id("18446744073709551615"), Some(u64::MAX));
        assert_eq!(match_product_id("18446744073709551616"), None);
    }
}
