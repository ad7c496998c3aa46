use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::entities::customer_fields;

/// Attributes the customer listing can be sorted by. Each maps to an
/// indexed field of the customer document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    TotalAmount,
    OrderCount,
    LastOrderDate,
}

impl SortField {
    /// Document field the sort applies to
    pub fn field_name(&self) -> &'static str {
        match self {
            SortField::CreatedAt => customer_fields::CREATED_AT,
            SortField::TotalAmount => customer_fields::TOTAL_AMOUNT,
            SortField::OrderCount => customer_fields::ORDER_COUNT,
            SortField::LastOrderDate => customer_fields::LAST_ORDER_DATE,
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "totalAmount" => Ok(SortField::TotalAmount),
            "orderCount" => Ok(SortField::OrderCount),
            "lastOrderDate" => Ok(SortField::LastOrderDate),
            _ => Err("must be one of createdAt, totalAmount, orderCount, lastOrderDate".to_string()),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Direction value understood by the document store
    pub fn as_direction(&self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Exact match only: "DESC" or " desc" are rejected
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err("must be 'asc' or 'desc'".to_string()),
        }
    }
}
