//! Core Kernel - Foundational types and utilities for the retail commerce core
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic and retail rounding
//! - Strongly-typed identifiers
//! - Port contracts for storage and lookup collaborators

pub mod error;
pub mod identifiers;
pub mod money;
pub mod ports;

pub use error::CoreError;
pub use identifiers::{
    AccountId, CartId, CustomerId, EntryId, HeldSaleId, OrderId, ProductId, TransactionId,
};
pub use money::{Currency, Money, MoneyError, Rate};
pub use ports::{PortError, Repository};
