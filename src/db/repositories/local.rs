//! In-memory repository for unit testing and local development.
//!
//! Records live in a `Vec` so natural order is insertion order, matching the
//! unindexed scan order the MongoDB backend exposes. The lock is held only
//! for the duration of one synchronous operation.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::db::models::{Restaurant, RestaurantId};
use crate::db::repository::{ListQuery, RepositoryResult, RestaurantRepository};

/// In-memory implementation of [`RestaurantRepository`].
#[derive(Default)]
pub struct LocalRepository {
    records: RwLock<Vec<Restaurant>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records. Test helper.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RestaurantRepository for LocalRepository {
    async fn insert_restaurant(
        &self,
        fields: Map<String, Value>,
    ) -> RepositoryResult<Restaurant> {
        let mut restaurant = Restaurant::from_fields(fields);
        restaurant.id = Some(RestaurantId::new());
        self.records.write().push(restaurant.clone());
        Ok(restaurant)
    }

    async fn list_restaurants(&self, query: &ListQuery) -> RepositoryResult<Vec<Restaurant>> {
        let records = self.records.read();
        let page = records
            .iter()
            .filter(|r| match &query.borough {
                Some(borough) => r.borough.as_deref() == Some(borough.as_str()),
                None => true,
            })
            .skip(query.offset() as usize)
            .take(query.per_page as usize)
            .cloned()
            .collect();
        Ok(page)
    }

    async fn get_restaurant(&self, id: &RestaurantId) -> RepositoryResult<Option<Restaurant>> {
        let records = self.records.read();
        Ok(records.iter().find(|r| r.id.as_ref() == Some(id)).cloned())
    }

    async fn update_restaurant(
        &self,
        id: &RestaurantId,
        changes: Map<String, Value>,
    ) -> RepositoryResult<Option<Restaurant>> {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id.as_ref() == Some(id)) {
            Some(record) => {
                record.apply_update(&changes);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_restaurant(&self, id: &RestaurantId) -> RepositoryResult<bool> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id.as_ref() != Some(id));
        Ok(records.len() < before)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn insert_assigns_identifier() {
        let repo = LocalRepository::new();
        let created = repo
            .insert_restaurant(fields(json!({"name": "A"})))
            .await
            .unwrap();
        assert!(created.id.is_some());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn list_applies_filter_before_windowing() {
        let repo = LocalRepository::new();
        for i in 0..6 {
            let borough = if i % 2 == 0 { "Queens" } else { "Bronx" };
            repo.insert_restaurant(fields(json!({"name": format!("r{}", i), "borough": borough})))
                .await
                .unwrap();
        }

        // Three Queens records; page 2 of size 2 holds only the third.
        let page = repo
            .list_restaurants(&ListQuery {
                page: 2,
                per_page: 2,
                borough: Some("Queens".into()),
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name.as_deref(), Some("r4"));
    }

    #[tokio::test]
    async fn delete_is_final_and_repeat_is_not_found() {
        let repo = LocalRepository::new();
        let created = repo
            .insert_restaurant(fields(json!({"name": "A"})))
            .await
            .unwrap();
        let id = created.id.unwrap();

        assert!(repo.delete_restaurant(&id).await.unwrap());
        assert!(repo.get_restaurant(&id).await.unwrap().is_none());
        assert!(!repo.delete_restaurant(&id).await.unwrap());
    }
}
