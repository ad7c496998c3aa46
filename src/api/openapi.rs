use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers::health::{HealthResponse, ReadinessResponse};
use crate::application::dto::{
    CustomerDto, ListCustomersResponse, PaginationDto, UpdateCustomerRequest,
};

/// OpenAPI specification for the customer API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Query Shield API",
        version = "0.1.0",
        description = "Customer browsing API with injection-safe filtering, search and pagination"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        crate::api::handlers::health::health_handler,
        crate::api::handlers::health::readiness_handler,
        crate::api::handlers::customers::list_customers_handler,
        crate::api::handlers::customers::get_customer_handler,
        crate::api::handlers::customers::update_customer_handler,
        crate::api::handlers::customers::delete_customer_handler,
    ),
    components(
        schemas(
            CustomerDto,
            PaginationDto,
            ListCustomersResponse,
            UpdateCustomerRequest,
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "customers", description = "Customer listing and record operations")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI route
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
