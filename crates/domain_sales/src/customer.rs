//! Customer records at the CRM collaborator boundary
//!
//! Customers are optional on a cart; every cart operation accepts a cart
//! with no customer attached.

use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;

/// A customer who can be associated with a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Phone number
    pub phone: Option<String>,
    /// Email address
    pub email: Option<String>,
}

impl Customer {
    /// Creates a new customer
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: None,
            email: None,
        }
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}
