//! In-memory sales order store

use std::collections::HashMap;

use core_kernel::{OrderId, PortError, Repository};
use domain_sales::{SalesOrder, SalesOrderStore};

/// Order store backed by a map
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: HashMap<OrderId, SalesOrder>,
}

impl InMemoryOrderStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of orders saved
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if no orders have been saved
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Repository for InMemoryOrderStore {}

impl SalesOrderStore for InMemoryOrderStore {
    fn save_order(&mut self, order: &SalesOrder) -> Result<(), PortError> {
        if self.orders.contains_key(&order.id) {
            return Err(PortError::conflict(format!(
                "order {} already saved",
                order.order_number
            )));
        }
        self.orders.insert(order.id, order.clone());
        Ok(())
    }

    fn order(&self, id: &OrderId) -> Result<SalesOrder, PortError> {
        self.orders
            .get(id)
            .cloned()
            .ok_or_else(|| PortError::not_found("SalesOrder", id))
    }
}
