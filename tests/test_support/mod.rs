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

//! Shared fixtures and store doubles for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use nekor_server::models::{Difficulty, Nekor, NekorPoint, NekorRoute, PointType};
use nekor_server::nekor::{DEFAULT_COLLECTION, DEFAULT_POINTS_COLLECTION};
use nekor_server::store::{
    DeleteAck, Document, DocumentStore, Filter, InsertAck, MemoryStore, StoreError, Update,
    UpdateAck,
};
use nekor_server::{NekorGateway, NekorServer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// The nekor `e1` used throughout the create scenarios.
pub fn e1_json() -> Value {
    json!({
        "nekorId": "e1",
        "title": "T",
        "dTitle": "D",
        "description": "desc",
        "imageUrl": "http://x",
        "timeCompletion": 10,
        "difficulty": "easy",
        "points": [],
        "route": { "nekorRoute": [[1.0, 2.0]] }
    })
}

/// A nekor with two waypoints.
pub fn sample_nekor(id: &str) -> Nekor {
    let points = vec![
        NekorPoint::new(format!("{id}-start"), 43.0, 11.0)
            .with_title("Start")
            .with_type(PointType::Site),
        NekorPoint::new(format!("{id}-rest"), 43.1, 11.2)
            .with_title("Hostel")
            .with_type(PointType::Rest),
    ];
    Nekor::new(
        id,
        NekorRoute::new(vec![[11.0, 43.0], [11.1, 43.05], [11.2, 43.1]]),
        points,
    )
    .with_d_title(format!("Nekor {id}"))
    .with_time_completion(6.5)
    .with_difficulty(Difficulty::Medium)
}

pub fn sample_nekor_json(id: &str) -> Value {
    serde_json::to_value(sample_nekor(id)).expect("Failed to serialize nekor")
}

/// Router over `store` with the default collection names.
pub fn test_router(store: Arc<dyn DocumentStore>) -> Router {
    NekorServer::from_parts(
        "127.0.0.1".to_string(),
        0,
        store,
        DEFAULT_COLLECTION,
        DEFAULT_POINTS_COLLECTION,
    )
    .router()
}

pub fn memory_gateway() -> (MemoryStore, NekorGateway) {
    let store = MemoryStore::new();
    let gateway = NekorGateway::with_default_collections(Arc::new(store.clone()));
    (store, gateway)
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Send one request and return the status and raw body.
pub async fn send_raw(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, body.to_vec())
}

/// Send one request and decode the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send_raw(router, request).await;
    let value = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Body is not JSON ({e}): {}",
            String::from_utf8_lossy(&body)
        )
    });
    (status, value)
}

/// Store whose every operation fails as if the database were down.
pub struct FailingStore;

fn down() -> StoreError {
    StoreError::Unavailable("connection refused by db.internal:27017".to_string())
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<InsertAck, StoreError> {
        Err(down())
    }

    async fn find_one(&self, _: &str, _: &Filter) -> Result<Option<Document>, StoreError> {
        Err(down())
    }

    async fn find(&self, _: &str, _: &Filter) -> Result<Vec<Document>, StoreError> {
        Err(down())
    }

    async fn find_one_and_update(
        &self,
        _: &str,
        _: &Filter,
        _: &Update,
    ) -> Result<UpdateAck, StoreError> {
        Err(down())
    }

    async fn delete_one(&self, _: &str, _: &Filter) -> Result<DeleteAck, StoreError> {
        Err(down())
    }

    async fn delete_many(&self, _: &str, _: &Filter) -> Result<DeleteAck, StoreError> {
        Err(down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(down())
    }
}

/// Memory store that refuses writes without raising a fault: inserts report
/// zero inserted documents and deletes are not acknowledged. Inserts into
/// `faulting_collection` fail as if the database were down.
#[derive(Clone, Default)]
pub struct RejectingStore {
    pub inner: MemoryStore,
    pub reject_inserts: bool,
    pub reject_deletes: bool,
    pub faulting_collection: Option<String>,
}

#[async_trait]
impl DocumentStore for RejectingStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, StoreError> {
        if self.faulting_collection.as_deref() == Some(collection) {
            return Err(down());
        }
        if self.reject_inserts {
            return Ok(InsertAck {
                inserted_count: 0,
                document: doc,
            });
        }
        self.inner.insert_one(collection, doc).await
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        self.inner.find_one(collection, filter).await
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        self.inner.find(collection, filter).await
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateAck, StoreError> {
        self.inner.find_one_and_update(collection, filter, update).await
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteAck, StoreError> {
        if self.reject_deletes {
            return Ok(DeleteAck {
                acknowledged: false,
                deleted_count: 0,
            });
        }
        self.inner.delete_one(collection, filter).await
    }

    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<DeleteAck, StoreError> {
        self.inner.delete_many(collection, filter).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
