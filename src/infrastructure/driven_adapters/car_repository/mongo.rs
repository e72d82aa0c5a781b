//! MongoDB Car Repository Implementation
//!
//! Implements the CarRepository trait on a MongoDB collection of loosely
//! structured car documents.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::options::{FindOneOptions, FindOptions, IndexOptions};
use mongodb::{Collection, Database, IndexModel};
use serde_json::Value;

use crate::domain::gateways::{CarFilter, CarQuery, CarRepository};
use crate::domain::models::car::{fields, Car, CarId, NewCar, Projection};
use crate::shared::errors::RepositoryError;

/// MongoDB implementation of CarRepository
pub struct MongoCarRepository {
    collection: Collection<Document>,
}

impl MongoCarRepository {
    /// Create a new MongoCarRepository over `collection` in `database`
    #[must_use]
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }

    /// Create the indexes backing quota counts and list ordering
    pub async fn setup_indexes(&self) -> Result<(), RepositoryError> {
        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "userEmail": 1 })
                    .options(Some(IndexOptions::builder().name(Some("cars_by_owner".to_string())).build()))
                    .build(),
                None,
            )
            .await?;

        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "created_at": -1 })
                    .options(Some(IndexOptions::builder().name(Some("cars_newest_first".to_string())).build()))
                    .build(),
                None,
            )
            .await?;

        Ok(())
    }
}

fn filter_document(filter: &CarFilter) -> Document {
    let mut document = Document::new();
    if let Some(term) = &filter.brand_contains {
        document.insert(
            fields::BRAND,
            doc! { "$regex": regex::escape(term), "$options": "i" },
        );
    }
    if let Some(email) = &filter.user_email {
        document.insert(fields::USER_EMAIL, email.as_str());
    }
    document
}

fn projection_document(projection: Projection) -> Document {
    projection
        .excluded()
        .iter()
        .map(|name| ((*name).to_string(), Bson::Int32(0)))
        .collect()
}

fn newest_first() -> Document {
    let mut sort = Document::new();
    sort.insert(fields::CREATED_AT, -1);
    sort
}

fn car_from_document(mut document: Document) -> Result<Car, RepositoryError> {
    let id = document
        .get_object_id(fields::ID)
        .map_err(|e| RepositoryError::Mapping(format!("Failed to read _id: {e}")))?;
    document.remove(fields::ID);

    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(fields) => Ok(Car::restore(CarId::from_object_id(id), fields)),
        other => Err(RepositoryError::Mapping(format!(
            "Car document is not an object: {other}"
        ))),
    }
}

#[async_trait]
impl CarRepository for MongoCarRepository {
    async fn find(&self, query: &CarQuery) -> Result<Vec<Car>, RepositoryError> {
        let mut options = FindOptions::default();
        options.projection = Some(projection_document(query.projection));
        options.sort = Some(newest_first());
        options.limit = query.limit.map(i64::from);

        let documents: Vec<Document> = self
            .collection
            .find(filter_document(&query.filter), options)
            .await?
            .try_collect()
            .await?;

        documents.into_iter().map(car_from_document).collect()
    }

    async fn find_by_id(
        &self,
        id: &CarId,
        projection: Projection,
    ) -> Result<Option<Car>, RepositoryError> {
        let mut options = FindOneOptions::default();
        options.projection = Some(projection_document(projection));

        let document = self
            .collection
            .find_one(doc! { "_id": *id.as_object_id() }, options)
            .await?;

        document.map(car_from_document).transpose()
    }

    async fn count(&self, filter: &CarFilter) -> Result<u64, RepositoryError> {
        Ok(self
            .collection
            .count_documents(filter_document(filter), None)
            .await?)
    }

    async fn insert(&self, car: &NewCar) -> Result<CarId, RepositoryError> {
        let mut document = bson::to_document(car.fields())?;
        document.insert(
            fields::CREATED_AT,
            bson::DateTime::from_chrono(car.created_at()),
        );

        let result = self.collection.insert_one(document, None).await?;

        result
            .inserted_id
            .as_object_id()
            .map(CarId::from_object_id)
            .ok_or_else(|| RepositoryError::Mapping("Store returned a non-ObjectId _id".to_string()))
    }

    async fn delete(&self, id: &CarId, scope: &CarFilter) -> Result<u64, RepositoryError> {
        let mut filter = filter_document(scope);
        filter.insert(fields::ID, *id.as_object_id());

        let result = self.collection.delete_one(filter, None).await?;
        Ok(result.deleted_count)
    }
}
