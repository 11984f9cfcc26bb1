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

//! Sibling collection indexing each waypoint under its parent nekor.
//!
//! A point record is the point's own fields plus `nekorId`. Records are
//! written when a nekor is created and removed before the nekor itself is
//! deleted.

use log::debug;
use serde_json::Value;
use std::sync::Arc;

use super::{from_document, to_document, NekorFailure, DEFAULT_POINTS_COLLECTION};
use crate::api::ServiceResponse;
use crate::models::{Nekor, NekorPoint};
use crate::store::{DocumentStore, Filter, StoreError};

const PARENT_FIELD: &str = "nekorId";
const ID_FIELD: &str = "nekorPointId";

/// Storage connection for point records.
#[derive(Clone)]
pub struct PointCollectionConnection {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl PointCollectionConnection {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn insert_point(
        &self,
        nekor_id: &str,
        point: &NekorPoint,
    ) -> Result<ServiceResponse<NekorPoint>, StoreError> {
        let mut record = to_document(point)?;
        record.insert(PARENT_FIELD.to_string(), Value::String(nekor_id.to_string()));

        let ack = self.store.insert_one(&self.collection, record).await?;
        if ack.inserted_count == 0 {
            return Ok(NekorFailure::PointNotInserted(ack.inserted_count).into());
        }
        Ok(ServiceResponse::success(from_document(
            &self.collection,
            ack.document,
        )?))
    }

    pub async fn find_points_by_nekor_id(
        &self,
        nekor_id: &str,
    ) -> Result<ServiceResponse<Vec<NekorPoint>>, StoreError> {
        let points = self
            .store
            .find(&self.collection, &Filter::eq(PARENT_FIELD, nekor_id))
            .await?
            .into_iter()
            .map(|doc| from_document(&self.collection, doc))
            .collect::<Result<Vec<NekorPoint>, _>>()?;
        Ok(ServiceResponse::success(points))
    }

    /// Delete the given points of one nekor. Points with the same id under a
    /// different parent are left alone.
    pub async fn delete_points(
        &self,
        nekor_id: &str,
        point_ids: &[String],
    ) -> Result<ServiceResponse<()>, StoreError> {
        let filter = Filter::eq(PARENT_FIELD, nekor_id)
            .and(Filter::is_in(ID_FIELD, point_ids.iter().cloned()));
        let ack = self.store.delete_many(&self.collection, &filter).await?;
        if !ack.acknowledged {
            return Ok(NekorFailure::PointsNotDeleted.into());
        }
        debug!(
            "Deleted {} point(s) of nekor '{nekor_id}' from '{}'",
            ack.deleted_count, self.collection
        );
        Ok(ServiceResponse::done())
    }
}

/// Gateway over the point collection, used by [`super::NekorGateway`].
#[derive(Clone)]
pub struct PointGateway {
    connection: PointCollectionConnection,
}

impl PointGateway {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            connection: PointCollectionConnection::new(store, collection),
        }
    }

    pub fn with_default_collection(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, DEFAULT_POINTS_COLLECTION)
    }

    pub fn connection(&self) -> &PointCollectionConnection {
        &self.connection
    }

    /// Register every embedded point of `nekor`. Stops at the first point the
    /// store refuses.
    pub async fn attach_points(
        &self,
        nekor: &Nekor,
    ) -> Result<ServiceResponse<Vec<NekorPoint>>, StoreError> {
        let mut attached = Vec::with_capacity(nekor.points.len());
        for point in &nekor.points {
            let response = self.connection.insert_point(&nekor.nekor_id, point).await?;
            if !response.success {
                return Ok(response.into_failure());
            }
            attached.extend(response.payload);
        }
        Ok(ServiceResponse::success(attached))
    }

    pub async fn get_points_by_nekor_id(
        &self,
        nekor_id: &str,
    ) -> Result<ServiceResponse<Vec<NekorPoint>>, StoreError> {
        self.connection.find_points_by_nekor_id(nekor_id).await
    }

    /// Fetch the points registered under `nekor_id` and delete them.
    pub async fn delete_points_for_nekor(
        &self,
        nekor_id: &str,
    ) -> Result<ServiceResponse<()>, StoreError> {
        let found = self.connection.find_points_by_nekor_id(nekor_id).await?;
        if !found.success {
            return Ok(found.into_failure());
        }
        let points = found.payload.unwrap_or_default();
        if points.is_empty() {
            return Ok(ServiceResponse::done());
        }

        let point_ids: Vec<String> = points.into_iter().map(|p| p.nekor_point_id).collect();
        self.connection.delete_points(nekor_id, &point_ids).await
    }
}
