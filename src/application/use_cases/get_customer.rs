use std::sync::Arc;

use crate::application::dto::CustomerDto;
use crate::application::errors::CustomerUseCaseError;
use crate::application::ports::CustomerRepository;
use crate::domain::value_objects::CustomerId;

/// Use case: Fetch one customer
pub struct GetCustomerUseCase {
    customer_repo: Arc<dyn CustomerRepository>,
}

impl GetCustomerUseCase {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    pub async fn execute(&self, id: &str) -> Result<CustomerDto, CustomerUseCaseError> {
        let id = CustomerId::parse(id)?;

        self.customer_repo
            .find_by_id(&id)
            .await?
            .map(CustomerDto::from)
            .ok_or_else(|| CustomerUseCaseError::NotFound(id.to_string()))
    }
}
