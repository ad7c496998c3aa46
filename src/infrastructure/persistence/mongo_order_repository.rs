use async_trait::async_trait;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Collection;

use crate::application::ports::{OrderRepository, RepositoryError};
use crate::domain::entities::order_fields;
use crate::domain::filtering::SanitizedFilter;
use crate::domain::value_objects::OrderId;

pub struct MongoOrderRepository {
    collection: Collection<Document>,
}

impl MongoOrderRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    async fn find_ids(&self, filter: &SanitizedFilter) -> Result<Vec<OrderId>, RepositoryError> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 1 })
            .build();

        let documents: Vec<Document> = self
            .collection
            .find(filter.as_document().clone(), options)
            .await?
            .try_collect()
            .await?;

        documents
            .iter()
            .map(|document| {
                document
                    .get_object_id(order_fields::ID)
                    .map(OrderId::from_object_id)
                    .map_err(|e| RepositoryError::Serialization(e.to_string()))
            })
            .collect()
    }
}
