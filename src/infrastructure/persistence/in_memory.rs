use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;
use parking_lot::RwLock;

use super::document_matcher::{compare_for_sort, matches};
use crate::application::ports::{CustomerRepository, OrderRepository, RepositoryError};
use crate::application::query::PageSpec;
use crate::domain::entities::{Customer, CustomerPatch, Order};
use crate::domain::filtering::SanitizedFilter;
use crate::domain::value_objects::{CustomerId, OrderId};

/// Process-local store holding both collections.
///
/// Filters are evaluated with the same operator semantics as the document
/// store, so it can stand in for it in tests and local runs.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    customers: Arc<RwLock<Vec<Customer>>>,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_customer(&self, customer: Customer) {
        self.customers.write().push(customer);
    }

    /// Store an order and account it against its customer
    pub fn insert_order(&self, order: Order) {
        {
            let mut customers = self.customers.write();
            if let Some(customer) = customers.iter_mut().find(|c| c.id() == order.customer()) {
                customer.record_order(order.id(), order.total(), order.created_at());
            }
        }
        self.orders.write().push(order);
    }

    pub fn customer_count(&self) -> usize {
        self.customers.read().len()
    }

    fn customer_documents(&self) -> Result<Vec<(Document, Customer)>, RepositoryError> {
        self.customers
            .read()
            .iter()
            .map(|customer| -> Result<_, RepositoryError> {
                Ok((bson::to_document(customer)?, customer.clone()))
            })
            .collect()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find(
        &self,
        filter: &SanitizedFilter,
        page: &PageSpec,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let mut matching: Vec<(Document, Customer)> = self
            .customer_documents()?
            .into_iter()
            .filter(|(doc, _)| matches(doc, filter))
            .collect();

        let field = page.sort_field().field_name();
        let direction = page.sort_order().as_direction();
        matching.sort_by(|(a, _), (b, _)| {
            let ordering = compare_for_sort(a.get(field), b.get(field));
            if direction < 0 {
                ordering.reverse()
            } else {
                ordering
            }
        });

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.page_size()).unwrap_or(usize::MAX);

        Ok(matching
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|(_, customer)| customer)
            .collect())
    }

    async fn count(&self, filter: &SanitizedFilter) -> Result<u64, RepositoryError> {
        let count = self
            .customer_documents()?
            .iter()
            .filter(|(doc, _)| matches(doc, filter))
            .count();
        Ok(count as u64)
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self
            .customers
            .read()
            .iter()
            .find(|c| c.id() == *id)
            .cloned())
    }

    async fn update(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, RepositoryError> {
        let mut customers = self.customers.write();
        Ok(customers.iter_mut().find(|c| c.id() == *id).map(|customer| {
            patch.apply_to(customer);
            customer.clone()
        }))
    }

    async fn delete(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let mut customers = self.customers.write();
        Ok(customers
            .iter()
            .position(|c| c.id() == *id)
            .map(|index| customers.remove(index)))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn find_ids(&self, filter: &SanitizedFilter) -> Result<Vec<OrderId>, RepositoryError> {
        let orders = self.orders.read();
        let mut ids = Vec::new();
        for order in orders.iter() {
            if matches(&bson::to_document(order)?, filter) {
                ids.push(order.id());
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filtering::{sanitize, SafePattern};
    use crate::domain::value_objects::{SortField, SortOrder};
    use bson::{doc, DateTime};
    use std::num::NonZeroU64;

    fn page(n: u64, size: u64, field: SortField, order: SortOrder) -> PageSpec {
        PageSpec::new(
            NonZeroU64::new(n).unwrap(),
            NonZeroU64::new(size).unwrap(),
            field,
            order,
        )
    }

    fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        for (i, name) in ["Ada", "Grace", "Linus", "Barbara"].iter().enumerate() {
            let customer = Customer::registered_at(
                *name,
                format!("{}@example.com", name.to_lowercase()),
                DateTime::from_millis(i as i64 * 1_000),
            );
            let id = customer.id();
            store.insert_customer(customer);
            store.insert_order(Order::new(
                id,
                format!("{} Main Street", i + 1),
                (i as f64 + 1.0) * 10.0,
                DateTime::from_millis(10_000 + i as i64),
            ));
        }
        store
    }

    #[tokio::test]
    async fn test_find_sorts_and_pages() {
        let store = seeded();
        let filter = sanitize(doc! {});

        let first = store
            .find(&filter, &page(1, 3, SortField::TotalAmount, SortOrder::Desc))
            .await
            .unwrap();
        let names: Vec<_> = first.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["Barbara", "Linus", "Grace"]);

        let second = store
            .find(&filter, &page(2, 3, SortField::TotalAmount, SortOrder::Desc))
            .await
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name(), "Ada");
    }

    #[tokio::test]
    async fn test_count_applies_filter() {
        let store = seeded();
        let filter = sanitize(doc! { "totalAmount": { "$gte": 20.0 } });

        assert_eq!(store.count(&filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_find_ids_matches_addresses() {
        let store = seeded();
        let filter = sanitize(doc! { "deliveryAddress": SafePattern::new("2 main") });

        let ids = store.find_ids(&filter).await.unwrap();
        assert_eq!(ids.len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = seeded();
        let customer = Customer::new("Temp", "temp@example.com");
        let id = customer.id();
        store.insert_customer(customer);

        let patch = CustomerPatch {
            name: Some("Renamed".to_string()),
            email: None,
        };
        let updated = store.update(&id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.name(), "Renamed");

        let removed = store.delete(&id).await.unwrap().unwrap();
        assert_eq!(removed.name(), "Renamed");
        assert!(store.find_by_id(&id).await.unwrap().is_none());
        assert!(store.delete(&id).await.unwrap().is_none());
        assert_eq!(store.customer_count(), 4);
    }
}
