use async_trait::async_trait;
use bson::doc;
use futures_util::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};

use crate::application::ports::{CustomerRepository, RepositoryError};
use crate::application::query::PageSpec;
use crate::domain::entities::{Customer, CustomerPatch};
use crate::domain::filtering::SanitizedFilter;
use crate::domain::value_objects::CustomerId;

pub struct MongoCustomerRepository {
    database: Database,
    collection: Collection<Customer>,
}

impl MongoCustomerRepository {
    pub fn new(database: Database, collection_name: &str) -> Self {
        let collection = database.collection::<Customer>(collection_name);
        Self {
            database,
            collection,
        }
    }
}

fn by_id(id: &CustomerId) -> bson::Document {
    doc! { "_id": *id.as_object_id() }
}

#[async_trait]
impl CustomerRepository for MongoCustomerRepository {
    async fn find(
        &self,
        filter: &SanitizedFilter,
        page: &PageSpec,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let options = FindOptions::builder()
            .sort(page.sort_document())
            .skip(page.skip())
            .limit(i64::try_from(page.page_size()).unwrap_or(i64::MAX))
            .build();

        let cursor = self
            .collection
            .find(filter.as_document().clone(), options)
            .await?;

        let customers: Vec<Customer> = cursor.try_collect().await?;
        Ok(customers)
    }

    async fn count(&self, filter: &SanitizedFilter) -> Result<u64, RepositoryError> {
        Ok(self
            .collection
            .count_documents(filter.as_document().clone(), None)
            .await?)
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.collection.find_one(by_id(id), None).await?)
    }

    async fn update(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, RepositoryError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(by_id(id), patch.to_update_document(), options)
            .await?)
    }

    async fn delete(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        Ok(self.collection.find_one_and_delete(by_id(id), None).await?)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
