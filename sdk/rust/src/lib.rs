//! Async client for the product service.

pub mod client;

pub use client::{ClientError, CreateProduct, Product, ProductClient, UpdateProduct};
