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

//! In-process document store.

use async_trait::async_trait;
use indexmap::IndexMap;
use log::debug;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{DeleteAck, Document, DocumentStore, Filter, InsertAck, StoreError, Update, UpdateAck};

/// Collections of documents kept in insertion order.
pub type Collections = IndexMap<String, Vec<Document>>;

/// Document store held entirely in memory.
///
/// Cloning shares the underlying collections. Uniqueness is not enforced, so
/// callers that need unique keys must check before inserting.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `collections`.
    pub fn from_collections(collections: Collections) -> Self {
        Self {
            collections: Arc::new(RwLock::new(collections)),
        }
    }

    /// Copy of every collection, used for persistence.
    pub async fn snapshot(&self) -> Collections {
        self.collections.read().await.clone()
    }

    /// Swap every collection for `collections`.
    pub async fn replace(&self, collections: Collections) {
        *self.collections.write().await = collections;
    }

    /// Number of documents in `collection`.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, StoreError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        debug!("Inserted document into '{collection}'");
        Ok(InsertAck {
            inserted_count: 1,
            document: doc,
        })
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)).cloned()))
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateAck, StoreError> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(doc)));

        Ok(match target {
            Some(doc) => {
                let modified = update.apply(doc);
                UpdateAck {
                    matched_count: 1,
                    modified_count: u64::from(modified),
                    document: Some(doc.clone()),
                }
            }
            None => UpdateAck {
                matched_count: 0,
                modified_count: 0,
                document: None,
            },
        })
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteAck, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(collection) {
            Some(docs) => match docs.iter().position(|doc| filter.matches(doc)) {
                Some(index) => {
                    docs.remove(index);
                    1
                }
                None => 0,
            },
            None => 0,
        };
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<DeleteAck, StoreError> {
        let mut collections = self.collections.write().await;
        let deleted_count = match collections.get_mut(collection) {
            Some(docs) => {
                let before = docs.len();
                docs.retain(|doc| !filter.matches(doc));
                (before - docs.len()) as u64
            }
            None => 0,
        };
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
