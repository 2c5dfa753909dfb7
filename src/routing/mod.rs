//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route table, method dispatch)
//!     → matcher.rs (validate `{id}` against [0-9]+)
//!     → handler, or 404 / 405
//! ```
//!
//! # Design Decisions
//! - Routes are fixed at startup
//! - Path parameter validation happens before any handler logic

pub mod matcher;
pub mod router;

pub use matcher::{match_product_id, require_product_id, ProductIdParam};
pub use router::product_routes;
