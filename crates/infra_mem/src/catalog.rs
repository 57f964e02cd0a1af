//! In-memory product catalog
//!
//! Stands in for the inventory system. Besides the lookup contract the
//! register needs, it exposes the inventory side of checkout: stock
//! deduction after a finalized sale, which the pricing engine itself
//! never performs.

use std::collections::HashMap;

use core_kernel::{PortError, ProductId, Repository};
use domain_sales::{Product, ProductCatalog, SalesOrder};

/// Product catalog backed by a map
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: HashMap<ProductId, Product>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog preloaded with products
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Adds or replaces a product
    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    /// Deducts stock for one product
    ///
    /// # Errors
    ///
    /// Rejects unknown products and deductions below zero stock.
    pub fn deduct_stock(&mut self, id: &ProductId, quantity: i64) -> Result<(), PortError> {
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| PortError::not_found("Product", id))?;
        if product.stock_quantity < quantity {
            return Err(PortError::conflict(format!(
                "stock for {} would go negative: {} on hand, {} requested",
                product.sku, product.stock_quantity, quantity
            )));
        }
        product.stock_quantity -= quantity;
        Ok(())
    }

    /// Deducts stock for every line of a finalized order
    pub fn commit_order(&mut self, order: &SalesOrder) -> Result<(), PortError> {
        for line in &order.lines {
            self.deduct_stock(&line.product_id, line.quantity)?;
        }
        Ok(())
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Repository for InMemoryCatalog {}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, id: &ProductId) -> Result<Product, PortError> {
        self.products
            .get(id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Product", id))
    }

    fn search(&self, term: &str) -> Result<Vec<Product>, PortError> {
        let needle = term.to_lowercase();
        let mut matches: Vec<Product> = self
            .products
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.sku.to_lowercase().contains(&needle)
                    || p.barcode
                        .as_deref()
                        .is_some_and(|b| b.contains(term))
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(matches)
    }
}
