use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::api::handlers::{
    delete_customer_handler, get_customer_handler, health_handler, list_customers_handler,
    readiness_handler, update_customer_handler,
};
use crate::api::middleware::{
    request_logging_middleware, InputSanitizationConfig, InputSanitizationLayer,
};
use crate::api::openapi::swagger_ui;
use crate::application::ports::CustomerRepository;
use crate::application::use_cases::{
    DeleteCustomerUseCase, GetCustomerUseCase, ListCustomersUseCase, UpdateCustomerUseCase,
};
use crate::config::Config;

/// Application state container
pub struct AppState {
    pub customer_store: Arc<dyn CustomerRepository>,
    pub list_customers_use_case: Arc<ListCustomersUseCase>,
    pub get_customer_use_case: Arc<GetCustomerUseCase>,
    pub update_customer_use_case: Arc<UpdateCustomerUseCase>,
    pub delete_customer_use_case: Arc<DeleteCustomerUseCase>,
    pub config: Config,
}

/// Create router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let sanitization = InputSanitizationConfig::new()
        .with_max_depth(state.config.injection_max_depth)
        .with_max_body_bytes(state.config.max_body_bytes);

    Router::new()
        // Health checks
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(Arc::clone(&state.customer_store)),
        )
        // Customer routes
        .route(
            "/customers",
            get(list_customers_handler).with_state(state.list_customers_use_case),
        )
        .route(
            "/customers/{id}",
            get(get_customer_handler).with_state(state.get_customer_use_case),
        )
        .route(
            "/customers/{id}",
            patch(update_customer_handler).with_state(state.update_customer_use_case),
        )
        .route(
            "/customers/{id}",
            delete(delete_customer_handler).with_state(state.delete_customer_use_case),
        )
        .merge(swagger_ui())
        // Innermost first: injection guard, then body limit, tracing and request ids
        .layer(InputSanitizationLayer::new(sanitization))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging_middleware))
}
