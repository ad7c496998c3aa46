mod customer;
mod order;

pub use customer::{customer_fields, Customer, CustomerPatch};
pub use order::{order_fields, Order};
