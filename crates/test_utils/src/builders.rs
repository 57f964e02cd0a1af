//! Test data builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about; names fall back to
//! generated values.

use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AccountId, Currency, CustomerId, Money, ProductId, Rate};
use domain_ledger::{Account, AccountType};
use domain_sales::{Customer, Product, Register};
use infra_mem::{InMemoryCatalog, InMemoryDirectory, InMemoryHeldSales, InMemoryOrderStore};

/// Builder for catalog products
pub struct ProductBuilder {
    id: ProductId,
    sku: String,
    name: String,
    unit_price: Money,
    tax_percent: Decimal,
    stock: i64,
    active: bool,
}

impl Default for ProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            id: ProductId::new(),
            sku: "SKU-TEST".to_string(),
            name: "Test Product".to_string(),
            unit_price: Money::new(dec!(100.00), Currency::INR),
            tax_percent: dec!(0),
            stock: 100,
            active: true,
        }
    }

    /// Sets the product id
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = id;
        self
    }

    /// Sets the SKU
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = sku.into();
        self
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit price in INR
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.unit_price = Money::new(price, Currency::INR);
        self
    }

    /// Sets the tax rate as a percent
    pub fn with_tax_percent(mut self, percent: Decimal) -> Self {
        self.tax_percent = percent;
        self
    }

    /// Sets the stock on hand
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Marks the product inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Builds the product
    pub fn build(self) -> Product {
        let mut product = Product::new(
            self.id,
            self.sku,
            self.name,
            self.unit_price,
            Rate::from_percent(self.tax_percent),
        )
        .with_stock(self.stock);
        product.is_active = self.active;
        product
    }
}

/// Builder for ledger accounts
pub struct AccountBuilder {
    id: AccountId,
    code: String,
    name: String,
    account_type: AccountType,
    currency: Currency,
}

impl Default for AccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountBuilder {
    /// Creates a builder defaulting to a cash asset account
    pub fn new() -> Self {
        Self {
            id: AccountId::new(),
            code: "1000".to_string(),
            name: "Cash".to_string(),
            account_type: AccountType::Asset,
            currency: Currency::INR,
        }
    }

    /// Sets the account code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the account name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the account type
    pub fn with_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    /// Sets the currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Builds the account
    pub fn build(self) -> Account {
        Account::new(self.id, self.code, self.name, self.account_type, self.currency)
    }
}

/// Builder for a register wired over in-memory adapters
pub struct RegisterBuilder {
    currency: Currency,
    products: Vec<Product>,
    customers: Vec<Customer>,
}

impl Default for RegisterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterBuilder {
    /// Creates a builder with an empty catalog and directory
    pub fn new() -> Self {
        Self {
            currency: Currency::INR,
            products: Vec::new(),
            customers: Vec::new(),
        }
    }

    /// Adds a product to the catalog
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Adds a customer to the directory
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customers.push(customer);
        self
    }

    /// Adds a customer with a generated name, returning their id
    pub fn with_generated_customer(mut self) -> (Self, CustomerId) {
        let name: String = Name().fake();
        let customer = Customer::new(CustomerId::new(), name);
        let id = customer.id;
        self.customers.push(customer);
        (self, id)
    }

    /// Builds the register
    pub fn build(self) -> Register {
        let catalog = InMemoryCatalog::with_products(self.products);
        let mut directory = InMemoryDirectory::new();
        for customer in self.customers {
            directory.insert(customer);
        }
        Register::new(
            self.currency,
            Box::new(catalog),
            Box::new(directory),
            Box::new(InMemoryOrderStore::new()),
            Box::new(InMemoryHeldSales::new()),
        )
    }
}
