use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::application::dto::{CustomerDto, ListCustomersResponse, UpdateCustomerRequest};
use crate::application::use_cases::{
    DeleteCustomerUseCase, GetCustomerUseCase, ListCustomersUseCase, UpdateCustomerUseCase,
};
use crate::domain::filtering::RawParameters;

/// GET /customers
/// List customers with filtering, search, sorting and pagination
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<u64>, Query, description = "Page size (default: 10, max: 10)"),
        ("sortField" = Option<String>, Query, description = "createdAt | totalAmount | orderCount | lastOrderDate"),
        ("sortOrder" = Option<String>, Query, description = "asc | desc"),
        ("registrationDateFrom" = Option<String>, Query, description = "YYYY-MM-DD or RFC 3339"),
        ("registrationDateTo" = Option<String>, Query, description = "YYYY-MM-DD or RFC 3339, inclusive to end of day"),
        ("lastOrderDateFrom" = Option<String>, Query, description = "YYYY-MM-DD or RFC 3339"),
        ("lastOrderDateTo" = Option<String>, Query, description = "YYYY-MM-DD or RFC 3339, inclusive to end of day"),
        ("totalAmountFrom" = Option<f64>, Query, description = "Minimum total amount"),
        ("totalAmountTo" = Option<f64>, Query, description = "Maximum total amount"),
        ("orderCountFrom" = Option<f64>, Query, description = "Minimum order count"),
        ("orderCountTo" = Option<f64>, Query, description = "Maximum order count"),
        ("search" = Option<String>, Query, description = "Matches customer name or last order delivery address"),
        ("name" = Option<String>, Query, description = "Matches customer name")
    ),
    responses(
        (status = 200, description = "Customers retrieved successfully", body = ListCustomersResponse),
        (status = 400, description = "Invalid or unsafe query parameters"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_customers_handler(
    State(use_case): State<Arc<ListCustomersUseCase>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListCustomersResponse>, ApiError> {
    let response = use_case.execute(RawParameters::from_pairs(pairs)).await?;

    Ok(Json(response))
}

/// GET /customers/{id}
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id (24 hex characters)")),
    responses(
        (status = 200, description = "Customer found", body = CustomerDto),
        (status = 400, description = "Invalid customer ID"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_customer_handler(
    State(use_case): State<Arc<GetCustomerUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<CustomerDto>, ApiError> {
    Ok(Json(use_case.execute(&id).await?))
}

/// PATCH /customers/{id}
/// Update a customer's name or email
#[utoipa::path(
    patch,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id (24 hex characters)")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerDto),
        (status = 400, description = "Invalid or unsafe payload"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_customer_handler(
    State(use_case): State<Arc<UpdateCustomerUseCase>>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<CustomerDto>, ApiError> {
    Ok(Json(use_case.execute(&id, body).await?))
}

/// DELETE /customers/{id}
/// Delete a customer and return the removed record
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = String, Path, description = "Customer id (24 hex characters)")),
    responses(
        (status = 200, description = "Customer deleted", body = CustomerDto),
        (status = 400, description = "Invalid customer ID"),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_customer_handler(
    State(use_case): State<Arc<DeleteCustomerUseCase>>,
    Path(id): Path<String>,
) -> Result<Json<CustomerDto>, ApiError> {
    Ok(Json(use_case.execute(&id).await?))
}
