// Copyright 2025 The Nekor Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

use super::{
    NekorCollectionConnection, NekorFailure, PointGateway, DEFAULT_COLLECTION,
    DEFAULT_POINTS_COLLECTION,
};
use crate::api::ServiceResponse;
use crate::models::{validate_nekor, Nekor, NekorPoint, Validation};
use crate::store::{DocumentStore, StoreError};

/// Validating gateway for nekors.
///
/// Holds no state of its own beyond its connections, which share the one
/// store handle passed in at construction.
#[derive(Clone)]
pub struct NekorGateway {
    nekors: NekorCollectionConnection,
    points: PointGateway,
}

impl NekorGateway {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
        points_collection: impl Into<String>,
    ) -> Self {
        Self {
            nekors: NekorCollectionConnection::new(store.clone(), collection),
            points: PointGateway::new(store, points_collection),
        }
    }

    pub fn with_default_collections(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, DEFAULT_COLLECTION, DEFAULT_POINTS_COLLECTION)
    }

    pub fn connection(&self) -> &NekorCollectionConnection {
        &self.nekors
    }

    pub fn points(&self) -> &PointGateway {
        &self.points
    }

    /// Validate an untrusted candidate and insert it.
    ///
    /// The duplicate check and the insert are separate store round-trips, so
    /// two concurrent creates with the same id can both pass the check.
    pub async fn create_nekor(&self, candidate: &Value) -> Result<ServiceResponse<Nekor>, StoreError> {
        let nekor = match validate_nekor(candidate) {
            Validation::Valid(nekor) => nekor,
            Validation::Invalid(reason) => {
                debug!("Rejected nekor candidate: {reason}");
                return Ok(NekorFailure::InvalidShape(reason).into());
            }
        };

        if self.nekors.find_nekor_by_id(&nekor.nekor_id).await?.success {
            debug!("Nekor '{}' already exists", nekor.nekor_id);
            return Ok(NekorFailure::DuplicateIdentifier.into());
        }

        let inserted = self.nekors.insert_nekor(&nekor).await?;
        if !inserted.success {
            return Ok(inserted);
        }

        // The nekor is already persisted, so point indexing never fails the create.
        match self.points.attach_points(&nekor).await {
            Ok(attached) if attached.success => {}
            Ok(attached) => warn!(
                "Nekor '{}' was created but its points were not indexed: {}",
                nekor.nekor_id,
                attached.error.as_deref().unwrap_or("unknown error")
            ),
            Err(e) => warn!(
                "Nekor '{}' was created but indexing its points failed: {e}",
                nekor.nekor_id
            ),
        }
        Ok(inserted)
    }

    pub async fn get_nekor_by_id(&self, nekor_id: &str) -> Result<ServiceResponse<Nekor>, StoreError> {
        self.nekors.find_nekor_by_id(nekor_id).await
    }

    pub async fn get_nekors_by_id(
        &self,
        nekor_ids: &[String],
    ) -> Result<ServiceResponse<Vec<Nekor>>, StoreError> {
        self.nekors.find_nekors_by_id(nekor_ids).await
    }

    pub async fn get_all_nekors(&self) -> Result<ServiceResponse<Vec<Nekor>>, StoreError> {
        self.nekors.get_all_nekors().await
    }

    /// Points indexed under an existing nekor.
    pub async fn get_points(
        &self,
        nekor_id: &str,
    ) -> Result<ServiceResponse<Vec<NekorPoint>>, StoreError> {
        let found = self.nekors.find_nekor_by_id(nekor_id).await?;
        if !found.success {
            return Ok(found.into_failure());
        }
        self.points.get_points_by_nekor_id(nekor_id).await
    }

    /// Delete a nekor and the points indexed under it.
    ///
    /// Points go first, then the nekor. The outcome is that of the final
    /// delete.
    pub async fn delete_nekor(&self, nekor_id: &str) -> Result<ServiceResponse<()>, StoreError> {
        if !self.nekors.find_nekor_by_id(nekor_id).await?.success {
            debug!("Cannot delete nekor '{nekor_id}': not found");
            return Ok(NekorFailure::DeleteTargetNotFound.into());
        }

        let points_deleted = self.points.delete_points_for_nekor(nekor_id).await?;
        if !points_deleted.success {
            return Ok(points_deleted);
        }
        debug!("Removed points of nekor '{nekor_id}'");

        let deleted = self.nekors.delete_nekor(nekor_id).await?;
        if !deleted.success {
            return Ok(NekorFailure::CascadeFailed.into());
        }
        Ok(ServiceResponse::done())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NekorRoute, DEFAULT_IMAGE_URL};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn candidate(id: &str) -> Value {
        json!({
            "nekorId": id,
            "title": "T",
            "dTitle": "D",
            "description": "desc",
            "imageUrl": "http://x",
            "timeCompletion": 10,
            "difficulty": "easy",
            "points": [{
                "nekorPointId": format!("{id}-p1"),
                "title": "Start",
                "description": "Trailhead",
                "lat": 41.9,
                "long": 12.5,
                "imageUrl": DEFAULT_IMAGE_URL,
                "type": "site"
            }],
            "route": { "nekorRoute": [[1.0, 2.0]] }
        })
    }

    fn gateway() -> (MemoryStore, NekorGateway) {
        let store = MemoryStore::new();
        let gateway = NekorGateway::with_default_collections(Arc::new(store.clone()));
        (store, gateway)
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_shape() {
        let (store, gateway) = gateway();
        let mut bad = candidate("e1");
        bad["difficulty"] = json!("extreme");

        let response = gateway.create_nekor(&bad).await.expect("Create failed");
        assert!(!response.success);
        let error = response.error.expect("error message");
        assert!(error.starts_with("Not a valid nekor"), "Error: {error}");
        assert!(error.contains("difficulty"), "Error: {error}");
        assert_eq!(store.count(DEFAULT_COLLECTION).await, 0);
    }

    #[tokio::test]
    async fn test_create_indexes_points() {
        let (store, gateway) = gateway();

        let response = gateway.create_nekor(&candidate("e1")).await.expect("Create failed");
        assert!(response.success);
        assert_eq!(store.count(DEFAULT_POINTS_COLLECTION).await, 1);

        let points = gateway.get_points("e1").await.expect("Get failed");
        assert_eq!(
            points.payload.map(|p| p.into_iter().map(|p| p.nekor_point_id).collect::<Vec<_>>()),
            Some(vec!["e1-p1".to_string()])
        );
    }

    #[tokio::test]
    async fn test_get_points_of_missing_nekor_is_not_found() {
        let (_, gateway) = gateway();
        let points = gateway.get_points("missing").await.expect("Get failed");
        assert!(!points.success);
        assert_eq!(
            points.error.as_deref(),
            Some("Failed to find nekor with this nekorId.")
        );
    }

    #[tokio::test]
    async fn test_delete_cascades_to_points() {
        let (store, gateway) = gateway();
        gateway.create_nekor(&candidate("e1")).await.expect("Create failed");
        gateway.create_nekor(&candidate("e2")).await.expect("Create failed");

        let deleted = gateway.delete_nekor("e1").await.expect("Delete failed");
        assert_eq!(deleted, ServiceResponse::done());

        assert_eq!(store.count(DEFAULT_COLLECTION).await, 1);
        assert_eq!(store.count(DEFAULT_POINTS_COLLECTION).await, 1);
        let remaining = gateway.points().get_points_by_nekor_id("e2").await.expect("Get failed");
        assert_eq!(remaining.payload.map(|p| p.len()), Some(1));
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_collection_unchanged() {
        let (store, gateway) = gateway();
        let nekor = Nekor::new("kept", NekorRoute::default(), Vec::new());
        gateway
            .create_nekor(&serde_json::to_value(&nekor).expect("Failed to serialize"))
            .await
            .expect("Create failed");

        let deleted = gateway.delete_nekor("missing").await.expect("Delete failed");
        assert!(!deleted.success);
        assert_eq!(
            deleted.error.as_deref(),
            Some("Failed to find the nekor you wanted to delete")
        );
        assert_eq!(store.count(DEFAULT_COLLECTION).await, 1);
    }
}
