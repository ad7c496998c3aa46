use std::sync::Arc;

use crate::application::dto::CustomerDto;
use crate::application::errors::CustomerUseCaseError;
use crate::application::ports::CustomerRepository;
use crate::domain::value_objects::CustomerId;

/// Use case: Delete a customer and return the removed record
pub struct DeleteCustomerUseCase {
    customer_repo: Arc<dyn CustomerRepository>,
}

impl DeleteCustomerUseCase {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    pub async fn execute(&self, id: &str) -> Result<CustomerDto, CustomerUseCaseError> {
        let id = CustomerId::parse(id)?;

        let removed = self
            .customer_repo
            .delete(&id)
            .await?
            .ok_or_else(|| CustomerUseCaseError::NotFound(id.to_string()))?;

        tracing::info!(customer_id = %id, "Customer deleted");
        Ok(CustomerDto::from(removed))
    }
}
