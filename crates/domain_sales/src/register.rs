//! The register: orchestration over the live cart
//!
//! The register is the consistency boundary a front end talks to. It owns
//! the live cart and the collaborator ports, looks products and customers
//! up before delegating to the cart's mechanical mutators, and returns the
//! recomputed totals after every mutation so a display can stay live.
//!
//! Cart lifecycle: empty -> building -> (held <-> building) -> finalized.
//! Finalized is terminal; the register immediately starts a fresh cart for
//! the next sale. Finalization does not decrement stock or write anywhere
//! except the order store; inventory is the catalog collaborator's
//! responsibility.
//!
//! A register has a single operator. Operations take `&mut self` and are
//! not thread-safe; callers serialize access per register instance.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use core_kernel::{Currency, CustomerId, HeldSaleId, Money, ProductId};

use crate::cart::{Cart, Discount};
use crate::error::SalesError;
use crate::order::SalesOrder;
use crate::payment::PaymentMethod;
use crate::ports::{CustomerDirectory, HeldSaleStore, ProductCatalog, SalesOrderStore};
use crate::pricing::CartTotals;
use crate::product::Product;

/// A parked cart snapshot awaiting resumption
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeldSale {
    /// Unique identifier
    pub id: HeldSaleId,
    /// Deep copy of the cart at hold time
    pub cart: Cart,
    /// When the sale was parked
    pub held_at: chrono::DateTime<Utc>,
}

/// A point-of-sale session over one live cart
pub struct Register {
    currency: Currency,
    catalog: Box<dyn ProductCatalog>,
    customers: Box<dyn CustomerDirectory>,
    orders: Box<dyn SalesOrderStore>,
    held: Box<dyn HeldSaleStore>,
    cart: Cart,
}

impl Register {
    /// Creates a register with an empty cart
    pub fn new(
        currency: Currency,
        catalog: Box<dyn ProductCatalog>,
        customers: Box<dyn CustomerDirectory>,
        orders: Box<dyn SalesOrderStore>,
        held: Box<dyn HeldSaleStore>,
    ) -> Self {
        Self {
            currency,
            catalog,
            customers,
            orders,
            held,
            cart: Cart::new(currency),
        }
    }

    /// The live cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The order store, for lookups after finalization
    pub fn order_store(&self) -> &dyn SalesOrderStore {
        self.orders.as_ref()
    }

    /// The held-sale store, for listing parked sales
    pub fn held_store(&self) -> &dyn HeldSaleStore {
        self.held.as_ref()
    }

    /// Current derived totals for the live cart
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Searches the catalog (pass-through for the product lookup UI)
    pub fn search_products(&self, term: &str) -> Result<Vec<Product>, SalesError> {
        Ok(self.catalog.search(term)?)
    }

    /// Adds a product to the cart by id, merging into an existing line
    pub fn add_item(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartTotals, SalesError> {
        let product = self.sellable_product(product_id)?;
        self.cart.add_product(&product, quantity)?;
        debug!(product = %product.sku, quantity, "added to cart");
        Ok(self.cart.totals())
    }

    /// Changes a line's quantity; zero removes the line
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartTotals, SalesError> {
        if quantity < 0 {
            return Err(SalesError::InvalidQuantity { quantity });
        }
        if quantity == 0 {
            // Removal must work even if the product has since gone inactive.
            self.cart.remove_line(product_id)?;
            return Ok(self.cart.totals());
        }
        let product = self.sellable_product(product_id)?;
        self.cart.update_quantity(&product, quantity)?;
        Ok(self.cart.totals())
    }

    /// Removes a line outright
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<CartTotals, SalesError> {
        self.cart.remove_line(product_id)?;
        Ok(self.cart.totals())
    }

    /// Sets a line discount (one mode authoritative per line)
    pub fn set_line_discount(
        &mut self,
        product_id: &ProductId,
        discount: Discount,
    ) -> Result<CartTotals, SalesError> {
        self.cart.set_line_discount(product_id, discount)?;
        Ok(self.cart.totals())
    }

    /// Sets the order-level discount
    pub fn set_order_discount(&mut self, discount: Discount) -> Result<CartTotals, SalesError> {
        self.cart.set_order_discount(discount)?;
        Ok(self.cart.totals())
    }

    /// Attaches a customer looked up from the directory, or detaches
    pub fn select_customer(
        &mut self,
        customer_id: Option<CustomerId>,
    ) -> Result<CartTotals, SalesError> {
        match customer_id {
            Some(id) => {
                let customer = self.customers.customer(&id)?;
                self.cart.select_customer(Some(customer));
            }
            None => self.cart.select_customer(None),
        }
        Ok(self.cart.totals())
    }

    /// Records a payment toward the cart total
    ///
    /// Overpayment is not an error and is never clamped: the due amount
    /// goes negative and the anomaly is logged for the operator.
    pub fn apply_payment(
        &mut self,
        method: PaymentMethod,
        amount: Money,
    ) -> Result<CartTotals, SalesError> {
        self.cart.record_payment(method, amount)?;
        let totals = self.cart.totals();
        if let Some(excess) = totals.overpayment() {
            warn!(cart = %self.cart.id, %method, %excess, "cart is overpaid");
        }
        Ok(totals)
    }

    /// Parks the live cart as a held sale and starts a fresh cart
    ///
    /// The snapshot is a deep copy; resuming later restores it exactly.
    pub fn hold_sale(&mut self) -> Result<HeldSaleId, SalesError> {
        if self.cart.is_empty() {
            return Err(SalesError::EmptyCart);
        }

        let mut snapshot = self.cart.clone();
        snapshot.set_hold(true);
        let held = HeldSale {
            id: HeldSaleId::new_v7(),
            cart: snapshot,
            held_at: Utc::now(),
        };
        let id = held.id;
        self.held.save_held(held)?;
        self.cart = Cart::new(self.currency);
        debug!(held_sale = %id, "parked sale");
        Ok(id)
    }

    /// Replaces the live cart with a held sale, removing it from the store
    pub fn resume_sale(&mut self, id: &HeldSaleId) -> Result<CartTotals, SalesError> {
        let mut held = self.held.take_held(id).map_err(|e| {
            if e.is_not_found() {
                SalesError::HeldSaleNotFound(id.to_string())
            } else {
                SalesError::Storage(e)
            }
        })?;
        held.cart.set_hold(false);
        self.cart = held.cart;
        debug!(held_sale = %id, "resumed sale");
        Ok(self.cart.totals())
    }

    /// Finalizes the sale: snapshots the cart into an order and clears it
    ///
    /// The order goes to the order store synchronously. Stock is not
    /// decremented here; that is the inventory collaborator's job.
    pub fn finalize_sale(&mut self) -> Result<SalesOrder, SalesError> {
        if self.cart.is_empty() {
            return Err(SalesError::EmptyCart);
        }

        let totals = self.cart.totals();
        let order = SalesOrder::from_cart(&self.cart, &totals);
        self.orders.save_order(&order)?;

        if let Some(excess) = totals.overpayment() {
            warn!(order = %order.order_number, %excess, "finalized with overpayment");
        }
        info!(
            order = %order.order_number,
            total = %totals.total_amount,
            status = ?totals.status,
            "finalized sale"
        );

        self.cart = Cart::new(self.currency);
        Ok(order)
    }

    fn sellable_product(&self, product_id: &ProductId) -> Result<Product, SalesError> {
        let product = self.catalog.product(product_id).map_err(|e| {
            if e.is_not_found() {
                SalesError::UnknownProduct(product_id.to_string())
            } else {
                SalesError::Storage(e)
            }
        })?;
        if !product.is_active {
            return Err(SalesError::UnknownProduct(product_id.to_string()));
        }
        Ok(product)
    }
}
