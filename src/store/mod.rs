//! In-memory product storage subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → product.rs (validate JSON payload into NewProduct / ProductPatch)
//!     → memory.rs (SharedStore: lock → ProductStore operation → unlock)
//!     → Product returned to handler for serialization
//! ```
//!
//! # Design Decisions
//! - Single owner: only `ProductStore` mutates records
//! - Ids come from a counter that never decreases, so deleted ids are never reused
//! - `SharedStore` serializes every operation behind one mutex
//! - Nothing is persisted; the store lives as long as the process

pub mod memory;
pub mod product;

pub use memory::{ProductStore, SharedStore, StoreError};
pub use product::{NewProduct, Product, ProductId, ProductPatch, ValidationError};
