mod delete_customer;
mod get_customer;
mod list_customers;
mod update_customer;

pub use delete_customer::DeleteCustomerUseCase;
pub use get_customer::GetCustomerUseCase;
pub use list_customers::ListCustomersUseCase;
pub use update_customer::UpdateCustomerUseCase;
