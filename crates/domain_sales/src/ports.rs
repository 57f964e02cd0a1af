//! Sales port traits
//!
//! Collaborator contracts the register depends on: product lookup
//! (inventory), customer lookup (CRM), order persistence and held-sale
//! persistence (storage). All synchronous; a save is a blocking handoff
//! that returns success or failure.

use core_kernel::{CustomerId, HeldSaleId, OrderId, PortError, ProductId, Repository};

use crate::customer::Customer;
use crate::order::SalesOrder;
use crate::product::Product;
use crate::register::HeldSale;

/// Inventory collaborator: product lookup
pub trait ProductCatalog: Repository {
    /// Looks up a product by id
    fn product(&self, id: &ProductId) -> Result<Product, PortError>;

    /// Searches products by name, SKU or barcode fragment
    fn search(&self, term: &str) -> Result<Vec<Product>, PortError>;
}

/// CRM collaborator: customer lookup
pub trait CustomerDirectory: Repository {
    /// Looks up a customer by id
    fn customer(&self, id: &CustomerId) -> Result<Customer, PortError>;
}

/// Storage collaborator for finalized sales orders
pub trait SalesOrderStore: Repository {
    /// Persists a finalized order
    fn save_order(&mut self, order: &SalesOrder) -> Result<(), PortError>;

    /// Fetches a previously saved order
    fn order(&self, id: &OrderId) -> Result<SalesOrder, PortError>;
}

/// Storage collaborator for held sales
pub trait HeldSaleStore: Repository {
    /// Stores a held sale snapshot
    fn save_held(&mut self, sale: HeldSale) -> Result<(), PortError>;

    /// Removes and returns a held sale
    fn take_held(&mut self, id: &HeldSaleId) -> Result<HeldSale, PortError>;

    /// Ids of all currently held sales
    fn held_ids(&self) -> Vec<HeldSaleId>;
}
