use bson::DateTime;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::entities::{Customer, CustomerPatch};

/// Customer as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub last_order_date: Option<String>,
    pub total_amount: f64,
    pub order_count: i64,
    pub last_order: Option<String>,
}

fn to_rfc3339(value: DateTime) -> String {
    value
        .to_chrono()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            email: customer.email().to_string(),
            created_at: to_rfc3339(customer.created_at()),
            last_order_date: customer.last_order_date().map(to_rfc3339),
            total_amount: customer.total_amount(),
            order_count: customer.order_count(),
            last_order: customer.last_order().map(|id| id.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub total_records: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub page_size: u64,
}

/// Envelope of the customer listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListCustomersResponse {
    pub records: Vec<CustomerDto>,
    pub pagination: PaginationDto,
}

/// Body of `PATCH /customers/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: Option<String>,
}

impl UpdateCustomerRequest {
    /// Trimmed changes. Blank names count as absent.
    pub fn into_patch(self) -> CustomerPatch {
        CustomerPatch {
            name: self
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            email: self.email.map(|e| e.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::OrderId;

    #[test]
    fn test_customer_dto_uses_camel_case() {
        let mut customer = Customer::registered_at("Ada", "ada@example.com", DateTime::from_millis(0));
        customer.record_order(OrderId::new(), 12.5, DateTime::from_millis(1_000));

        let json = serde_json::to_value(CustomerDto::from(customer)).unwrap();

        assert_eq!(json["createdAt"], "1970-01-01T00:00:00.000Z");
        assert_eq!(json["lastOrderDate"], "1970-01-01T00:00:01.000Z");
        assert_eq!(json["totalAmount"], 12.5);
        assert_eq!(json["orderCount"], 1);
    }

    #[test]
    fn test_update_request_rejects_unknown_fields() {
        let result: Result<UpdateCustomerRequest, _> =
            serde_json::from_value(serde_json::json!({"name": "Ada", "isAdmin": true}));

        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_validation() {
        let too_long = UpdateCustomerRequest {
            name: Some("x".repeat(101)),
            email: None,
        };
        assert!(too_long.validate().is_err());

        let bad_email = UpdateCustomerRequest {
            name: None,
            email: Some("not-an-email".to_string()),
        };
        assert!(bad_email.validate().is_err());

        let ok = UpdateCustomerRequest {
            name: Some("Grace".to_string()),
            email: Some("grace@example.com".to_string()),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_dropped_from_patch() {
        let patch = UpdateCustomerRequest {
            name: Some("   ".to_string()),
            email: None,
        }
        .into_patch();

        assert!(patch.is_empty());
    }
}
