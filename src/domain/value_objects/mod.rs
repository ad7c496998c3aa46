mod customer_id;
mod order_id;
mod query_param;
mod sort;

pub use customer_id::CustomerId;
pub use order_id::OrderId;
pub use query_param::QueryParam;
pub use sort::{SortField, SortOrder};
