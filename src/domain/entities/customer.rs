use bson::{doc, DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CustomerId, OrderId};

/// Field names of the customer document as stored
pub mod customer_fields {
    pub const ID: &str = "_id";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const CREATED_AT: &str = "createdAt";
    pub const LAST_ORDER_DATE: &str = "lastOrderDate";
    pub const TOTAL_AMOUNT: &str = "totalAmount";
    pub const ORDER_COUNT: &str = "orderCount";
    pub const LAST_ORDER: &str = "lastOrder";
}

/// Customer aggregate - the primary record of the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    id: CustomerId,
    name: String,
    email: String,
    created_at: DateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_order_date: Option<DateTime>,
    #[serde(default)]
    total_amount: f64,
    #[serde(default)]
    order_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_order: Option<OrderId>,
}

impl Customer {
    /// Register a new customer with no orders
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::registered_at(name, email, DateTime::now())
    }

    pub fn registered_at(
        name: impl Into<String>,
        email: impl Into<String>,
        created_at: DateTime,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: email.into(),
            created_at,
            last_order_date: None,
            total_amount: 0.0,
            order_count: 0,
            last_order: None,
        }
    }

    /// Account an order against this customer's statistics
    pub fn record_order(&mut self, order_id: OrderId, amount: f64, placed_at: DateTime) {
        self.total_amount += amount;
        self.order_count += 1;
        let is_latest = match self.last_order_date {
            Some(last) => placed_at.timestamp_millis() >= last.timestamp_millis(),
            None => true,
        };
        if is_latest {
            self.last_order_date = Some(placed_at);
            self.last_order = Some(order_id);
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime {
        self.created_at
    }

    pub fn last_order_date(&self) -> Option<DateTime> {
        self.last_order_date
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    pub fn order_count(&self) -> i64 {
        self.order_count
    }

    pub fn last_order(&self) -> Option<OrderId> {
        self.last_order
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }
}

/// Partial change to a customer's contact details. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Body of a `$set` update
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert(customer_fields::NAME, name.as_str());
        }
        if let Some(email) = &self.email {
            set.insert(customer_fields::EMAIL, email.as_str());
        }
        set
    }

    pub fn to_update_document(&self) -> Document {
        doc! { "$set": self.to_set_document() }
    }

    pub fn apply_to(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.set_name(name.clone());
        }
        if let Some(email) = &self.email {
            customer.set_email(email.clone());
        }
    }
}
