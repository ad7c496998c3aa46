use bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CustomerId, OrderId};

/// Field names of the order document as stored
pub mod order_fields {
    pub const ID: &str = "_id";
    pub const DELIVERY_ADDRESS: &str = "deliveryAddress";
    pub const CUSTOMER: &str = "customer";
}

/// Order placed by a customer. Only consulted by the listing to resolve
/// free-text search against delivery addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    id: OrderId,
    customer: CustomerId,
    delivery_address: String,
    total: f64,
    created_at: DateTime,
}

impl Order {
    pub fn new(
        customer: CustomerId,
        delivery_address: impl Into<String>,
        total: f64,
        created_at: DateTime,
    ) -> Self {
        Self {
            id: OrderId::new(),
            customer,
            delivery_address: delivery_address.into(),
            total,
            created_at,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer(&self) -> CustomerId {
        self.customer
    }

    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn created_at(&self) -> DateTime {
        self.created_at
    }
}
