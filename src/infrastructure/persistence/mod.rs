mod document_matcher;
mod in_memory;
mod mongo_customer_repository;
mod mongo_order_repository;

pub use in_memory::InMemoryStore;
pub use mongo_customer_repository::MongoCustomerRepository;
pub use mongo_order_repository::MongoOrderRepository;
