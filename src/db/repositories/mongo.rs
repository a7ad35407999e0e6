//! MongoDB implementation of the restaurant repository.
//!
//! Documents are stored as-is in a single collection; `_id` is managed here
//! (split off before serialization, reattached after) so the rest of the
//! record can round-trip through serde untouched.

use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::options::{ClientOptions, ReturnDocument};
use mongodb::{Client, Collection};
use serde_json::{Map, Value};

use crate::db::config::MongoConfig;
use crate::db::models::{Restaurant, RestaurantId};
use crate::db::repository::{
    ListQuery, RepositoryError, RepositoryResult, RestaurantRepository,
};

use async_trait::async_trait;

/// MongoDB-backed implementation of [`RestaurantRepository`].
pub struct MongoRepository {
    client: Client,
    collection: Collection<Document>,
}

impl MongoRepository {
    /// Connect to MongoDB and verify the connection with a ping.
    ///
    /// Connection failure here is the startup-fatal path: the caller aborts
    /// the process rather than serving requests without storage.
    pub async fn connect(config: &MongoConfig) -> RepositoryResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| RepositoryError::configuration(e.to_string()))?;
        options.app_name = Some("restaurant-api".to_string());

        let client = Client::with_options(options)
            .map_err(|e| RepositoryError::configuration(e.to_string()))?;

        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepositoryError::connection(e.to_string()))?;
        info!(
            "Connected to MongoDB database '{}', collection '{}'",
            config.database, config.collection
        );

        let collection = database.collection::<Document>(&config.collection);
        Ok(Self { client, collection })
    }

    fn to_document(fields: &Map<String, Value>) -> RepositoryResult<Document> {
        let mut doc = bson::to_document(fields)
            .map_err(|e| RepositoryError::query(format!("Field serialization failed: {}", e)))?;
        // Identifiers are storage-assigned, never client-supplied.
        doc.remove("_id");
        Ok(doc)
    }

    fn from_document(mut doc: Document) -> RepositoryResult<Restaurant> {
        let id = match doc.remove("_id") {
            Some(Bson::ObjectId(oid)) => Some(RestaurantId::from(oid)),
            Some(other) => {
                return Err(RepositoryError::query(format!(
                    "Unexpected _id type in stored document: {:?}",
                    other.element_type()
                )))
            }
            None => None,
        };

        // A stored non-string name/borough is a duck-typed field, not a
        // decode failure: pull it out before decoding and reattach it to
        // the opaque field set, mirroring Restaurant::from_fields.
        let mut demoted: Vec<(&str, Bson)> = Vec::new();
        for key in ["name", "borough"] {
            let is_string = matches!(doc.get(key), None | Some(Bson::String(_)));
            if !is_string {
                if let Some(value) = doc.remove(key) {
                    demoted.push((key, value));
                }
            }
        }

        let mut restaurant: Restaurant = bson::from_document(doc)
            .map_err(|e| RepositoryError::query(format!("Document decode failed: {}", e)))?;
        restaurant.id = id;
        for (key, value) in demoted {
            restaurant
                .extra
                .insert(key.to_string(), value.into_relaxed_extjson());
        }
        Ok(restaurant)
    }

    fn borough_filter(borough: &Option<String>) -> Document {
        match borough {
            Some(b) => doc! { "borough": b },
            None => doc! {},
        }
    }
}

#[async_trait]
impl RestaurantRepository for MongoRepository {
    async fn insert_restaurant(
        &self,
        fields: Map<String, Value>,
    ) -> RepositoryResult<Restaurant> {
        // Normalize through the model so duck-typed name/borough values end
        // up in the opaque field set, exactly as the in-memory backend does.
        let restaurant = Restaurant::from_fields(fields);
        let doc = bson::to_document(&restaurant)
            .map_err(|e| RepositoryError::query(format!("Field serialization failed: {}", e)))?;
        let result = self
            .collection
            .insert_one(doc.clone())
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        let oid = match result.inserted_id {
            Bson::ObjectId(oid) => oid,
            other => {
                return Err(RepositoryError::internal(format!(
                    "Driver returned non-ObjectId inserted_id: {:?}",
                    other
                )))
            }
        };
        debug!("Inserted restaurant {}", oid.to_hex());

        let mut stored = doc;
        stored.insert("_id", Bson::ObjectId(oid));
        Self::from_document(stored)
    }

    async fn list_restaurants(&self, query: &ListQuery) -> RepositoryResult<Vec<Restaurant>> {
        let cursor = self
            .collection
            .find(Self::borough_filter(&query.borough))
            .skip(query.offset())
            .limit(query.per_page as i64)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        docs.into_iter().map(Self::from_document).collect()
    }

    async fn get_restaurant(&self, id: &RestaurantId) -> RepositoryResult<Option<Restaurant>> {
        let doc = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        doc.map(Self::from_document).transpose()
    }

    async fn update_restaurant(
        &self,
        id: &RestaurantId,
        changes: Map<String, Value>,
    ) -> RepositoryResult<Option<Restaurant>> {
        let set = Self::to_document(&changes)?;
        if set.is_empty() {
            // Nothing to merge; an empty $set is rejected by the server.
            return self.get_restaurant(id).await;
        }

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_object_id() }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        updated.map(Self::from_document).transpose()
    }

    async fn delete_restaurant(&self, id: &RestaurantId) -> RepositoryResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(|e| RepositoryError::query(e.to_string()))?;
        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        match self
            .client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
        {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}
