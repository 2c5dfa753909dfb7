//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → [routing layer picks handler]
//!     → handlers.rs (parse body, one store operation)
//!     → response.rs (errors to status codes)
//!     → Send to client with `Connection: close`
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
