use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::application::dto::{CustomerDto, UpdateCustomerRequest};
use crate::application::errors::CustomerUseCaseError;
use crate::application::ports::CustomerRepository;
use crate::domain::errors::DomainError;
use crate::domain::filtering::{sanitize_json, InjectionDetector};
use crate::domain::value_objects::CustomerId;

/// Use case: Update a customer's contact details
pub struct UpdateCustomerUseCase {
    customer_repo: Arc<dyn CustomerRepository>,
    detector: InjectionDetector,
}

impl UpdateCustomerUseCase {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>, detector: InjectionDetector) -> Self {
        Self {
            customer_repo,
            detector,
        }
    }

    /// Execute an update from an untyped JSON body
    pub async fn execute(&self, id: &str, body: Value) -> Result<CustomerDto, CustomerUseCaseError> {
        let id = CustomerId::parse(id)?;

        // 1. Structural inspection, then strip whatever operator keys remain
        if let Err(violation) = self.detector.inspect_body(&body) {
            tracing::warn!(
                path = %violation.path,
                kind = %violation.kind,
                "Rejected customer update"
            );
            return Err(DomainError::from(violation).into());
        }
        let body = sanitize_json(body);

        // 2. Typed request with field validation
        let request: UpdateCustomerRequest = serde_json::from_value(body)
            .map_err(|e| CustomerUseCaseError::InvalidRequest(e.to_string()))?;
        request
            .validate()
            .map_err(|e| CustomerUseCaseError::InvalidRequest(describe_validation_errors(&e)))?;

        let patch = request.into_patch();
        if patch.is_empty() {
            return Err(CustomerUseCaseError::InvalidRequest(
                "No changes supplied".to_string(),
            ));
        }

        // 3. Apply
        let updated = self
            .customer_repo
            .update(&id, &patch)
            .await?
            .ok_or_else(|| CustomerUseCaseError::NotFound(id.to_string()))?;

        tracing::info!(customer_id = %id, "Customer updated");
        Ok(CustomerDto::from(updated))
    }
}

fn describe_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|cow| cow.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
