//! Register flows wired over the in-memory adapters

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, CustomerId, HeldSaleId, Money, ProductId, Rate};
use domain_sales::{
    Customer, Discount, PaymentMethod, Product, ProductCatalog, Register, SalesError,
    SettlementStatus,
};
use infra_mem::{InMemoryCatalog, InMemoryDirectory, InMemoryHeldSales, InMemoryOrderStore};

fn inr(amount: Decimal) -> Money {
    Money::new(amount, Currency::INR)
}

struct Fixture {
    register: Register,
    chai: ProductId,
    coffee: ProductId,
    customer: CustomerId,
}

fn fixture() -> Fixture {
    let chai = Product::new(
        ProductId::new(),
        "SKU-CHAI",
        "Masala Chai",
        inr(dec!(100.00)),
        Rate::from_percent(dec!(10)),
    )
    .with_stock(10);
    let coffee = Product::new(
        ProductId::new(),
        "SKU-COFFEE",
        "Filter Coffee",
        inr(dec!(50.00)),
        Rate::from_percent(dec!(5)),
    )
    .with_barcode("8901234567890")
    .with_stock(3);

    let chai_id = chai.id;
    let coffee_id = coffee.id;

    let customer = Customer::new(CustomerId::new(), "Asha Rao").with_phone("+91-98000-00000");
    let customer_id = customer.id;

    let catalog = InMemoryCatalog::with_products([chai, coffee]);
    let mut directory = InMemoryDirectory::new();
    directory.insert(customer);

    let register = Register::new(
        Currency::INR,
        Box::new(catalog),
        Box::new(directory),
        Box::new(InMemoryOrderStore::new()),
        Box::new(InMemoryHeldSales::new()),
    );

    Fixture {
        register,
        chai: chai_id,
        coffee: coffee_id,
        customer: customer_id,
    }
}

// ============================================================================
// Cart Building Tests
// ============================================================================

mod building_tests {
    use super::*;

    #[test]
    fn test_add_item_returns_updated_totals() {
        let mut f = fixture();

        let totals = f.register.add_item(&f.chai, 2).unwrap();
        assert_eq!(totals.subtotal.amount(), dec!(200.00));
        assert_eq!(totals.tax_amount.amount(), dec!(20.00));
        assert_eq!(totals.total_amount.amount(), dec!(220.00));
    }

    #[test]
    fn test_unknown_product_rejected() {
        let mut f = fixture();
        let result = f.register.add_item(&ProductId::new(), 1);
        assert!(matches!(result, Err(SalesError::UnknownProduct(_))));
    }

    #[test]
    fn test_add_beyond_stock_rejected() {
        let mut f = fixture();
        let result = f.register.add_item(&f.coffee, 4); // stock is 3

        assert!(matches!(
            result,
            Err(SalesError::InsufficientStock {
                requested: 4,
                available: 3,
                ..
            })
        ));
        assert!(f.register.cart().is_empty());
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 2).unwrap();
        f.register.add_item(&f.coffee, 1).unwrap();

        let totals = f.register.update_quantity(&f.chai, 0).unwrap();

        assert_eq!(f.register.cart().items().len(), 1);
        assert_eq!(f.register.cart().items()[0].sku, "SKU-COFFEE");
        assert_eq!(totals.total_amount.amount(), dec!(52.50));
    }

    #[test]
    fn test_negative_quantity_rejected_before_lookup() {
        let mut f = fixture();
        let result = f.register.update_quantity(&ProductId::new(), -1);
        assert!(matches!(
            result,
            Err(SalesError::InvalidQuantity { quantity: -1 })
        ));
    }

    #[test]
    fn test_search_products() {
        let f = fixture();

        let by_name = f.register.search_products("chai").unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].sku, "SKU-CHAI");

        let by_barcode = f.register.search_products("890123").unwrap();
        assert_eq!(by_barcode.len(), 1);
        assert_eq!(by_barcode[0].sku, "SKU-COFFEE");
    }

    #[test]
    fn test_select_customer_via_directory() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 1).unwrap();

        f.register.select_customer(Some(f.customer)).unwrap();
        assert_eq!(f.register.cart().customer().unwrap().name, "Asha Rao");

        f.register.select_customer(None).unwrap();
        assert!(f.register.cart().customer().is_none());
    }

    #[test]
    fn test_select_unknown_customer() {
        let mut f = fixture();
        let result = f.register.select_customer(Some(CustomerId::new()));
        assert!(matches!(result, Err(SalesError::Storage(_))));
    }
}

// ============================================================================
// Hold and Resume Tests
// ============================================================================

mod hold_tests {
    use super::*;

    #[test]
    fn test_hold_then_resume_round_trips_totals() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 2).unwrap();
        f.register
            .set_line_discount(&f.chai, Discount::Percent(Rate::from_percent(dec!(10))))
            .unwrap();
        f.register
            .apply_payment(PaymentMethod::Cash, inr(dec!(100.00)))
            .unwrap();

        let before = f.register.totals();
        let held_id = f.register.hold_sale().unwrap();

        // The live cart is fresh after holding.
        assert!(f.register.cart().is_empty());
        assert_eq!(f.register.held_store().held_ids(), vec![held_id]);

        let after = f.register.resume_sale(&held_id).unwrap();

        assert_eq!(after.subtotal, before.subtotal);
        assert_eq!(after.discount_amount, before.discount_amount);
        assert_eq!(after.tax_amount, before.tax_amount);
        assert_eq!(after.total_amount, before.total_amount);
        assert_eq!(after.paid_amount, before.paid_amount);
        assert_eq!(after.due_amount, before.due_amount);
        assert!(f.register.held_store().held_ids().is_empty());
    }

    #[test]
    fn test_held_snapshot_reports_hold_status() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 1).unwrap();

        let held_id = f.register.hold_sale().unwrap();

        // Build an unrelated sale in between.
        f.register.add_item(&f.coffee, 1).unwrap();
        f.register.update_quantity(&f.coffee, 0).unwrap();

        let resumed = f.register.resume_sale(&held_id).unwrap();
        // Once resumed the cart is live again, not on hold.
        assert_ne!(resumed.status, SettlementStatus::Hold);
        assert!(!f.register.cart().is_on_hold());
    }

    #[test]
    fn test_hold_requires_line_items() {
        let mut f = fixture();
        assert!(matches!(f.register.hold_sale(), Err(SalesError::EmptyCart)));
    }

    #[test]
    fn test_resume_unknown_id() {
        let mut f = fixture();
        let result = f.register.resume_sale(&HeldSaleId::new());
        assert!(matches!(result, Err(SalesError::HeldSaleNotFound(_))));
    }

    #[test]
    fn test_snapshot_is_a_deep_copy() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 2).unwrap();
        let held_id = f.register.hold_sale().unwrap();

        // Mutating the new live cart must not affect the snapshot.
        f.register.add_item(&f.chai, 5).unwrap();
        f.register.finalize_sale().unwrap();

        let resumed = f.register.resume_sale(&held_id).unwrap();
        assert_eq!(resumed.subtotal.amount(), dec!(200.00));
    }
}

// ============================================================================
// Finalization Tests
// ============================================================================

mod finalize_tests {
    use super::*;

    #[test]
    fn test_finalize_empty_cart_rejected() {
        let mut f = fixture();
        assert!(matches!(
            f.register.finalize_sale(),
            Err(SalesError::EmptyCart)
        ));
    }

    #[test]
    fn test_finalize_snapshots_and_clears() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 2).unwrap();
        f.register
            .set_line_discount(&f.chai, Discount::Percent(Rate::from_percent(dec!(10))))
            .unwrap();
        f.register
            .apply_payment(PaymentMethod::Cash, inr(dec!(100.00)))
            .unwrap();
        f.register
            .apply_payment(PaymentMethod::Upi, inr(dec!(98.00)))
            .unwrap();

        let order = f.register.finalize_sale().unwrap();

        assert!(order.order_number.starts_with("SO-"));
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.total_amount.amount(), dec!(198.00));
        assert_eq!(order.paid_amount.amount(), dec!(198.00));
        assert!(order.due_amount.is_zero());
        assert_eq!(order.status, SettlementStatus::Paid);
        assert_eq!(order.payments.cash.amount(), dec!(100.00));
        assert_eq!(order.payments.upi.amount(), dec!(98.00));

        // Live cart is terminal for the finalized sale; a fresh one begins.
        assert!(f.register.cart().is_empty());
        assert!(f.register.totals().paid_amount.is_zero());

        // The order went to the store synchronously.
        let stored = f.register.order_store().order(&order.id).unwrap();
        assert_eq!(stored.order_number, order.order_number);
    }

    #[test]
    fn test_finalize_partially_paid_sale() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 2).unwrap();
        f.register
            .apply_payment(PaymentMethod::Cash, inr(dec!(100.00)))
            .unwrap();

        let order = f.register.finalize_sale().unwrap();

        assert_eq!(order.status, SettlementStatus::PartiallyPaid);
        assert_eq!(order.due_amount.amount(), dec!(120.00));
    }

    #[test]
    fn test_finalize_overpaid_sale_preserves_negative_due() {
        let mut f = fixture();
        f.register.add_item(&f.coffee, 1).unwrap(); // 52.50 with tax
        f.register
            .apply_payment(PaymentMethod::Cash, inr(dec!(60.00)))
            .unwrap();

        let order = f.register.finalize_sale().unwrap();

        assert_eq!(order.due_amount.amount(), dec!(-7.50));
        assert_eq!(order.status, SettlementStatus::Paid);
    }

    #[test]
    fn test_customer_travels_onto_the_order() {
        let mut f = fixture();
        f.register.add_item(&f.chai, 1).unwrap();
        f.register.select_customer(Some(f.customer)).unwrap();

        let order = f.register.finalize_sale().unwrap();
        assert_eq!(order.customer.unwrap().id, f.customer);
    }
}

// ============================================================================
// Inventory Handoff Tests
// ============================================================================

mod inventory_tests {
    use super::*;

    #[test]
    fn test_stock_deduction_is_the_catalogs_job() {
        // The engine never decrements stock; the inventory collaborator
        // consumes the finalized order.
        let chai = Product::new(
            ProductId::new(),
            "SKU-CHAI",
            "Masala Chai",
            inr(dec!(100.00)),
            Rate::zero(),
        )
        .with_stock(10);
        let chai_id = chai.id;
        let mut inventory = InMemoryCatalog::with_products([chai.clone()]);

        let mut register = Register::new(
            Currency::INR,
            Box::new(InMemoryCatalog::with_products([chai])),
            Box::new(InMemoryDirectory::new()),
            Box::new(InMemoryOrderStore::new()),
            Box::new(InMemoryHeldSales::new()),
        );

        register.add_item(&chai_id, 4).unwrap();
        let order = register.finalize_sale().unwrap();

        inventory.commit_order(&order).unwrap();
        assert_eq!(inventory.product(&chai_id).unwrap().stock_quantity, 6);
    }

    #[test]
    fn test_deduct_stock_refuses_to_go_negative() {
        let chai = Product::new(
            ProductId::new(),
            "SKU-CHAI",
            "Masala Chai",
            inr(dec!(100.00)),
            Rate::zero(),
        )
        .with_stock(2);
        let id = chai.id;
        let mut catalog = InMemoryCatalog::with_products([chai]);

        assert!(catalog.deduct_stock(&id, 3).is_err());
        assert_eq!(catalog.product(&id).unwrap().stock_quantity, 2);
    }
}
