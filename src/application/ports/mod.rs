mod customer_repository;
mod order_repository;

pub use customer_repository::{CustomerRepository, RepositoryError};
pub use order_repository::OrderRepository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
