pub mod customers;
pub mod health;

pub use customers::{
    delete_customer_handler, get_customer_handler, list_customers_handler,
    update_customer_handler,
};
pub use health::{health_handler, readiness_handler};
