use std::collections::HashMap;

use orderflow_shared::ProductId;
use tracing::debug;

use crate::error::CatalogError;
use crate::product::{Product, ProductDraft};

/// In-memory product catalog.
///
/// Owns every product and both of its stock counters. Cart code reaches the
/// counters only through [`Catalog::reserve`], [`Catalog::release`] and
/// [`Catalog::commit`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
        }
    }

    /// Add a product under a freshly generated id.
    pub fn insert(&mut self, draft: ProductDraft) -> Result<&Product, CatalogError> {
        self.insert_with_id(ProductId::new(), draft)
    }

    /// Add a product under a caller-chosen id (seeding, restores). An id
    /// that is already taken is rejected rather than overwritten.
    pub fn insert_with_id(
        &mut self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<&Product, CatalogError> {
        if self.products.contains_key(&id) {
            return Err(CatalogError::DuplicateProduct(id));
        }
        let product = Product::from_draft(id, draft)?;
        debug!(product_id = %id, name = %product.name, "catalog product added");
        self.products.insert(id, product);
        Ok(&self.products[&id])
    }

    pub fn get(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.products
            .get(id)
            .ok_or(CatalogError::UnknownProduct(*id))
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    /// Products ordered by name.
    pub fn list(&self) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.values().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replace a product's editable fields.
    pub fn update(&mut self, id: &ProductId, draft: ProductDraft) -> Result<&Product, CatalogError> {
        let product = self.get_mut(id)?;
        product.apply(draft)?;
        debug!(product_id = %id, "catalog product updated");
        Ok(product)
    }

    pub fn remove(&mut self, id: &ProductId) -> Result<Product, CatalogError> {
        let product = self
            .products
            .remove(id)
            .ok_or(CatalogError::UnknownProduct(*id))?;
        debug!(product_id = %id, "catalog product removed");
        Ok(product)
    }

    /// Move units from available into reserved.
    pub fn reserve(&mut self, id: &ProductId, quantity: u32) -> Result<(), CatalogError> {
        self.get_mut(id)?.stock.reserve(quantity)?;
        Ok(())
    }

    /// Move reserved units back to available.
    pub fn release(&mut self, id: &ProductId, quantity: u32) -> Result<(), CatalogError> {
        self.get_mut(id)?.stock.release(quantity)?;
        Ok(())
    }

    /// Sell reserved units: total stock drops, available stock is untouched.
    pub fn commit(&mut self, id: &ProductId, quantity: u32) -> Result<(), CatalogError> {
        self.get_mut(id)?.stock.commit(quantity)?;
        Ok(())
    }

    /// Helper to get mutable product reference
    fn get_mut(&mut self, id: &ProductId) -> Result<&mut Product, CatalogError> {
        self.products
            .get_mut(id)
            .ok_or(CatalogError::UnknownProduct(*id))
    }
}
