//! Request identification.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID when the client did not send one
//! - Expose the header name shared by the ID layers and the trace span
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied `x-request-id` is kept as-is

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID on requests and responses.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates random UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the request ID header, if present and printable.
pub fn request_id_of<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn generated_ids_are_uuids() {
        let request = Request::new(Body::empty());
        let mut maker = UuidRequestId;

        let a = maker.make_request_id(&request).unwrap();
        let b = maker.make_request_id(&request).unwrap();

        let a = a.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(a).is_ok());
        assert_ne!(a, b.header_value().to_str().unwrap());
    }

    #[test]
    fn missing_header_reads_as_unknown() {
        let request = Request::new(Body::empty());
        assert_eq!(request_id_of(&request), "unknown");

        let request = Request::builder()
            .header("x-request-id", "abc")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_id_of(&request), "abc");
    }
}
