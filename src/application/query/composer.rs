use std::sync::Arc;

use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};

use crate::application::ports::{OrderRepository, RepositoryError};
use crate::application::validation::{DateRange, NumericRange, ValidatedParameters};
use crate::domain::entities::{customer_fields, order_fields};
use crate::domain::filtering::operator_filter::sanitize;
use crate::domain::filtering::{FilterOperator, SafePattern, SanitizedFilter};

/// Builds the customer filter from validated parameters.
///
/// Every dimension adds one top-level key, so they combine by implicit AND.
/// A search performs one lookup on the orders collection first.
pub struct FilterComposer {
    orders: Arc<dyn OrderRepository>,
}

impl FilterComposer {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn compose(
        &self,
        params: &ValidatedParameters,
    ) -> Result<SanitizedFilter, RepositoryError> {
        let mut filter = Document::new();

        if let Some(name) = &params.name {
            filter.insert(customer_fields::NAME, SafePattern::new(name.as_str()));
        }

        insert_date_range(&mut filter, customer_fields::CREATED_AT, &params.registration_date);
        insert_date_range(
            &mut filter,
            customer_fields::LAST_ORDER_DATE,
            &params.last_order_date,
        );
        insert_numeric_range(&mut filter, customer_fields::TOTAL_AMOUNT, &params.total_amount);
        insert_numeric_range(&mut filter, customer_fields::ORDER_COUNT, &params.order_count);

        if let Some(search) = &params.search {
            let pattern = SafePattern::new(search.as_str());
            let order_ids = self.matching_order_ids(&pattern).await?;

            let mut by_last_order = Document::new();
            by_last_order.insert(FilterOperator::In.as_str(), order_ids);

            let mut by_name = Document::new();
            by_name.insert(customer_fields::NAME, pattern);
            let mut by_order = Document::new();
            by_order.insert(customer_fields::LAST_ORDER, by_last_order);

            filter.insert(FilterOperator::Or.as_str(), vec![by_name, by_order]);
        }

        Ok(sanitize(filter))
    }

    async fn matching_order_ids(&self, pattern: &SafePattern) -> Result<Vec<Bson>, RepositoryError> {
        let mut lookup = Document::new();
        lookup.insert(order_fields::DELIVERY_ADDRESS, pattern.clone());

        let ids = self.orders.find_ids(&sanitize(lookup)).await?;
        tracing::debug!(matched = ids.len(), "Resolved search against order addresses");

        Ok(ids.into_iter().map(Bson::from).collect())
    }
}

fn insert_date_range(filter: &mut Document, field: &str, range: &DateRange) {
    if range.is_unbounded() {
        return;
    }
    let mut bounds = Document::new();
    if let Some(from) = range.from {
        bounds.insert(FilterOperator::Gte.as_str(), to_bson_date(from));
    }
    if let Some(to) = range.to {
        bounds.insert(FilterOperator::Lte.as_str(), to_bson_date(to));
    }
    filter.insert(field, bounds);
}

fn insert_numeric_range(filter: &mut Document, field: &str, range: &NumericRange) {
    if range.is_unbounded() {
        return;
    }
    let mut bounds = doc! {};
    if let Some(min) = range.min {
        bounds.insert(FilterOperator::Gte.as_str(), min);
    }
    if let Some(max) = range.max {
        bounds.insert(FilterOperator::Lte.as_str(), max);
    }
    filter.insert(field, bounds);
}

fn to_bson_date(value: DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_chrono(value))
}
