//! In-memory customer directory

use std::collections::HashMap;

use core_kernel::{CustomerId, PortError, Repository};
use domain_sales::{Customer, CustomerDirectory};

/// Customer directory backed by a map
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    customers: HashMap<CustomerId, Customer>,
}

impl InMemoryDirectory {
    /// Creates an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a customer
    pub fn insert(&mut self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }
}

impl Repository for InMemoryDirectory {}

impl CustomerDirectory for InMemoryDirectory {
    fn customer(&self, id: &CustomerId) -> Result<Customer, PortError> {
        self.customers
            .get(id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Customer", id))
    }
}
