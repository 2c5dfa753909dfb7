//! Product store and its lock-guarded shared handle.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::observability::metrics;
use crate::store::product::{NewProduct, Product, ProductId, ProductPatch};

/// Errors returned by store lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No product with this id.
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Authoritative mapping of id → product plus the id counter.
///
/// Not thread-safe on its own; see [`SharedStore`].
#[derive(Debug, Default)]
pub struct ProductStore {
    products: BTreeMap<ProductId, Product>,
    /// Next id to hand out. Only ever incremented.
    next_id: ProductId,
}

impl ProductStore {
    /// Create an empty store. The first product gets id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new product under the next id.
    pub fn create(&mut self, fields: NewProduct) -> Product {
        let id = self.next_id;
        self.next_id += 1;

        let product = Product::new(id, fields);
        self.products.insert(id, product.clone());
        product
    }

    pub fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        self.products.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    /// Overwrite the fields present in `patch`.
    pub fn update(&mut self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        let product = self.products.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }

        Ok(product.clone())
    }

    /// Remove a product, returning it as it was before removal.
    pub fn delete(&mut self, id: ProductId) -> Result<Product, StoreError> {
        self.products.remove(&id).ok_or(StoreError::NotFound(id))
    }

    /// All products, ascending by id.
    pub fn list(&self) -> Vec<Product> {
        self.products.values().cloned().collect()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Cloneable handle to a [`ProductStore`] behind a mutex.
///
/// Each method holds the lock for the whole operation and never across an
/// await point.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<ProductStore>>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ProductStore> {
        // No operation leaves a record half-written, so poisoning is ignored.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, fields: NewProduct) -> Product {
        let mut store = self.lock();
        let product = store.create(fields);
        metrics::record_store_size(store.len());
        product
    }

    pub fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        self.lock().get(id)
    }

    pub fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        self.lock().update(id, patch)
    }

    pub fn delete(&self, id: ProductId) -> Result<Product, StoreError> {
        let mut store = self.lock();
        let product = store.delete(id)?;
        metrics::record_store_size(store.len());
        Ok(product)
    }

    pub fn list(&self) -> Vec<Product> {
        self.lock().list()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.lock().contains(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: format!("{name} description"),
        }
    }

    #[test]
    fn ids_start_at_zero_and_increase() {
        let mut store = ProductStore::new();
        let ids: Vec<_> = (0..5).map(|i| store.create(widget(&format!("p{i}"))).id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = ProductStore::new();
        let a = store.create(widget("a"));
        let b = store.create(widget("b"));
        store.delete(b.id).unwrap();
        store.delete(a.id).unwrap();

        let c = store.create(widget("c"));
        assert_eq!(c.id, 2);
        assert!(store.get(a.id).is_err());
    }

    #[test]
    fn update_applies_only_supplied_fields() {
        let mut store = ProductStore::new();
        let p = store.create(widget("a"));

        let renamed = store
            .update(
                p.id,
                ProductPatch {
                    name: Some("renamed".into()),
                    description: None,
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "renamed");
        assert_eq!(renamed.description, "a description");

        let unchanged = store.update(p.id, ProductPatch::default()).unwrap();
        assert_eq!(unchanged, renamed);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let mut store = ProductStore::new();
        assert_eq!(store.get(9), Err(StoreError::NotFound(9)));
        assert_eq!(store.update(9, ProductPatch::default()), Err(StoreError::NotFound(9)));
        assert_eq!(store.delete(9), Err(StoreError::NotFound(9)));
    }

    #[test]
    fn delete_returns_record_and_second_delete_fails() {
        let mut store = ProductStore::new();
        let p = store.create(widget("a"));
        assert_eq!(store.delete(p.id), Ok(p.clone()));
        assert_eq!(store.delete(p.id), Err(StoreError::NotFound(p.id)));
    }

    #[test]
    fn list_reflects_deletes() {
        let mut store = ProductStore::new();
        for name in ["a", "b", "c"] {
            store.create(widget(name));
        }
        store.delete(1).unwrap();

        let ids: Vec<_> = store.list().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn shared_store_serializes_concurrent_creates() {
        let store = SharedStore::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|i| store.create(widget(&format!("t{t}-{i}"))).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<_> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }
}
