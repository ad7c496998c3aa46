use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::filtering::SanitizedFilter;
use crate::domain::value_objects::OrderId;
#[cfg(test)]
use mockall::automock;

/// Port for the related `orders` collection
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Identifiers of every order matching the filter
    async fn find_ids(&self, filter: &SanitizedFilter) -> Result<Vec<OrderId>, RepositoryError>;
}
