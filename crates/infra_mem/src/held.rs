//! In-memory held-sale store

use std::collections::HashMap;

use core_kernel::{HeldSaleId, PortError, Repository};
use domain_sales::{HeldSale, HeldSaleStore};

/// Held-sale store backed by a map
#[derive(Debug, Default)]
pub struct InMemoryHeldSales {
    held: HashMap<HeldSaleId, HeldSale>,
}

impl InMemoryHeldSales {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sales currently parked
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Returns true if nothing is parked
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

impl Repository for InMemoryHeldSales {}

impl HeldSaleStore for InMemoryHeldSales {
    fn save_held(&mut self, sale: HeldSale) -> Result<(), PortError> {
        self.held.insert(sale.id, sale);
        Ok(())
    }

    fn take_held(&mut self, id: &HeldSaleId) -> Result<HeldSale, PortError> {
        self.held
            .remove(id)
            .ok_or_else(|| PortError::not_found("HeldSale", id))
    }

    fn held_ids(&self) -> Vec<HeldSaleId> {
        let mut ids: Vec<HeldSaleId> = self.held.keys().copied().collect();
        ids.sort_by_key(|id| self.held[id].held_at);
        ids
    }
}
