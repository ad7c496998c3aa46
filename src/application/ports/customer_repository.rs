use async_trait::async_trait;
use thiserror::Error;

use crate::application::query::PageSpec;
use crate::domain::entities::{Customer, CustomerPatch};
use crate::domain::filtering::SanitizedFilter;
use crate::domain::value_objects::CustomerId;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Port for the primary `customers` collection.
///
/// Listing operations only accept a [`SanitizedFilter`], so nothing that
/// skipped the operator allow-list can reach the store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// One page of customers matching the filter, in the page's sort order
    async fn find(
        &self,
        filter: &SanitizedFilter,
        page: &PageSpec,
    ) -> Result<Vec<Customer>, RepositoryError>;

    /// Number of customers matching the filter
    async fn count(&self, filter: &SanitizedFilter) -> Result<u64, RepositoryError>;

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Apply the patch and return the updated record, `None` if absent
    async fn update(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, RepositoryError>;

    /// Remove and return the record, `None` if absent
    async fn delete(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Cheap reachability check for readiness probes
    async fn ping(&self) -> Result<(), RepositoryError>;
}
