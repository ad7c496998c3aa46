use std::sync::Arc;

use crate::application::dto::{CustomerDto, ListCustomersResponse, PaginationDto};
use crate::application::errors::CustomerUseCaseError;
use crate::application::ports::{CustomerRepository, OrderRepository};
use crate::application::query::{FilterComposer, PageSpec};
use crate::application::validation::validate_parameters;
use crate::domain::errors::DomainError;
use crate::domain::filtering::{InjectionDetector, RawParameters};

/// Use case: List customers
pub struct ListCustomersUseCase {
    customer_repo: Arc<dyn CustomerRepository>,
    composer: FilterComposer,
    detector: InjectionDetector,
}

impl ListCustomersUseCase {
    pub fn new(
        customer_repo: Arc<dyn CustomerRepository>,
        order_repo: Arc<dyn OrderRepository>,
        detector: InjectionDetector,
    ) -> Self {
        Self {
            customer_repo,
            composer: FilterComposer::new(order_repo),
            detector,
        }
    }

    /// Execute a listing request from raw query parameters
    pub async fn execute(
        &self,
        params: RawParameters,
    ) -> Result<ListCustomersResponse, CustomerUseCaseError> {
        // 1. Reject injection attempts before anything else looks at the input
        if let Err(violation) = self.detector.inspect_parameters(&params) {
            tracing::warn!(
                path = %violation.path,
                kind = %violation.kind,
                "Rejected listing query"
            );
            return Err(DomainError::from(violation).into());
        }

        // 2. Whitelist validation
        let validated = validate_parameters(&params)?;

        // 3. Build the filter and the page window
        let filter = self.composer.compose(&validated).await?;
        let page = PageSpec::resolve(&validated);

        // 4. Query repository
        let (customers, total_records) = tokio::try_join!(
            self.customer_repo.find(&filter, &page),
            self.customer_repo.count(&filter),
        )?;

        let records: Vec<CustomerDto> = customers.into_iter().map(CustomerDto::from).collect();

        Ok(ListCustomersResponse {
            records,
            pagination: PaginationDto {
                total_records,
                total_pages: page.total_pages(total_records),
                current_page: page.page(),
                page_size: page.page_size(),
            },
        })
    }
}
