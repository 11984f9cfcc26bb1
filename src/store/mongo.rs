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

//! MongoDB adapter.
//!
//! Filters and updates are rendered to their MongoDB query documents and
//! issued against the database named in the connection string. The driver's
//! `_id` field is stripped from documents read back so callers only ever see
//! their own fields.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use log::info;
use mongodb::bson::{self, doc, Bson, Document as BsonDocument};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use serde_json::Value;

use super::{
    redact_uri, DeleteAck, Document, DocumentStore, Filter, InsertAck, StoreError, Update,
    UpdateAck,
};

pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect using a `mongodb://` or `mongodb+srv://` URI that names a database.
    pub async fn connect(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await.map_err(driver_error)?;
        let database = client
            .default_database()
            .ok_or_else(|| StoreError::InvalidUri {
                uri: redact_uri(uri),
                reason: "connection string does not name a database".to_string(),
            })?;
        info!("Using MongoDB database '{}'", database.name());
        Ok(Self { database })
    }

    fn collection(&self, name: &str) -> Collection<BsonDocument> {
        self.database.collection(name)
    }
}

fn driver_error(e: mongodb::error::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn to_bson(value: &Value) -> Result<BsonDocument, StoreError> {
    bson::to_document(value).map_err(|e| StoreError::Backend(e.to_string()))
}

fn from_bson(collection: &str, doc: BsonDocument) -> Result<Document, StoreError> {
    match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(mut map) => {
            map.remove("_id");
            Ok(map)
        }
        other => Err(StoreError::Corrupt {
            collection: collection.to_string(),
            reason: format!("expected a document, found {other}"),
        }),
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, StoreError> {
        let bson_doc = to_bson(&Value::Object(doc.clone()))?;
        self.collection(collection)
            .insert_one(bson_doc, None)
            .await
            .map_err(driver_error)?;
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
        let found = self
            .collection(collection)
            .find_one(to_bson(&filter.to_query())?, None)
            .await
            .map_err(driver_error)?;
        found.map(|doc| from_bson(collection, doc)).transpose()
    }

    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .collection(collection)
            .find(to_bson(&filter.to_query())?, None)
            .await
            .map_err(driver_error)?;
        let docs: Vec<BsonDocument> = cursor.try_collect().await.map_err(driver_error)?;
        docs.into_iter()
            .map(|doc| from_bson(collection, doc))
            .collect()
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateAck, StoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection(collection)
            .find_one_and_update(
                to_bson(&filter.to_query())?,
                to_bson(&update.to_update_document())?,
                options,
            )
            .await
            .map_err(driver_error)?;

        let matched = u64::from(updated.is_some());
        Ok(UpdateAck {
            matched_count: matched,
            modified_count: matched,
            document: updated.map(|doc| from_bson(collection, doc)).transpose()?,
        })
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteAck, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(to_bson(&filter.to_query())?, None)
            .await
            .map_err(driver_error)?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<DeleteAck, StoreError> {
        let result = self
            .collection(collection)
            .delete_many(to_bson(&filter.to_query())?, None)
            .await
            .map_err(driver_error)?;
        Ok(DeleteAck {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(driver_error)?;
        Ok(())
    }
}
