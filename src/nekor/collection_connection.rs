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

use log::debug;
use std::sync::Arc;

use super::{from_document, to_document, NekorFailure, DEFAULT_COLLECTION};
use crate::api::ServiceResponse;
use crate::models::Nekor;
use crate::store::{Document, DocumentStore, Filter, StoreError, Update};

const ID_FIELD: &str = "nekorId";

/// Storage connection for nekor documents.
///
/// Performs no validation. Every method issues exactly one store operation
/// and normalizes its acknowledgement into a [`ServiceResponse`].
#[derive(Clone)]
pub struct NekorCollectionConnection {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl NekorCollectionConnection {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn with_default_collection(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, DEFAULT_COLLECTION)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Insert a nekor. Fails if the store reports zero inserted documents.
    pub async fn insert_nekor(&self, nekor: &Nekor) -> Result<ServiceResponse<Nekor>, StoreError> {
        let ack = self
            .store
            .insert_one(&self.collection, to_document(nekor)?)
            .await?;
        if ack.inserted_count == 0 {
            return Ok(NekorFailure::NotInserted(ack.inserted_count).into());
        }
        debug!("Inserted nekor '{}' into '{}'", nekor.nekor_id, self.collection);
        Ok(ServiceResponse::success(from_document(
            &self.collection,
            ack.document,
        )?))
    }

    pub async fn find_nekor_by_id(
        &self,
        nekor_id: &str,
    ) -> Result<ServiceResponse<Nekor>, StoreError> {
        let found = self
            .store
            .find_one(&self.collection, &Filter::eq(ID_FIELD, nekor_id))
            .await?;
        match found {
            Some(doc) => Ok(ServiceResponse::success(from_document(
                &self.collection,
                doc,
            )?)),
            None => Ok(NekorFailure::NotFound.into()),
        }
    }

    /// Nekors whose id is in `nekor_ids`. Unknown ids are skipped.
    pub async fn find_nekors_by_id(
        &self,
        nekor_ids: &[String],
    ) -> Result<ServiceResponse<Vec<Nekor>>, StoreError> {
        let filter = Filter::is_in(ID_FIELD, nekor_ids.iter().cloned());
        self.find(&filter).await.map(ServiceResponse::success)
    }

    pub async fn get_all_nekors(&self) -> Result<ServiceResponse<Vec<Nekor>>, StoreError> {
        self.find(&Filter::All).await.map(ServiceResponse::success)
    }

    /// `$set` the given fields on a nekor and return it as updated.
    ///
    /// No router or gateway path calls this; fields are applied as given and
    /// not re-validated.
    pub async fn update_nekor(
        &self,
        nekor_id: &str,
        fields: Document,
    ) -> Result<ServiceResponse<Nekor>, StoreError> {
        let ack = self
            .store
            .find_one_and_update(
                &self.collection,
                &Filter::eq(ID_FIELD, nekor_id),
                &Update::set(fields),
            )
            .await?;
        match ack.document {
            Some(doc) if ack.matched_count > 0 => Ok(ServiceResponse::success(from_document(
                &self.collection,
                doc,
            )?)),
            _ => Ok(NekorFailure::NotUpdated(ack.matched_count).into()),
        }
    }

    pub async fn delete_nekor(&self, nekor_id: &str) -> Result<ServiceResponse<()>, StoreError> {
        let ack = self
            .store
            .delete_one(&self.collection, &Filter::eq(ID_FIELD, nekor_id))
            .await?;
        if !ack.acknowledged {
            return Ok(NekorFailure::NotDeleted.into());
        }
        debug!(
            "Deleted {} nekor(s) with id '{nekor_id}' from '{}'",
            ack.deleted_count, self.collection
        );
        Ok(ServiceResponse::done())
    }

    pub async fn delete_nekors(
        &self,
        nekor_ids: &[String],
    ) -> Result<ServiceResponse<()>, StoreError> {
        let ack = self
            .store
            .delete_many(
                &self.collection,
                &Filter::is_in(ID_FIELD, nekor_ids.iter().cloned()),
            )
            .await?;
        if !ack.acknowledged {
            return Ok(NekorFailure::NotDeleted.into());
        }
        Ok(ServiceResponse::done())
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Nekor>, StoreError> {
        self.store
            .find(&self.collection, filter)
            .await?
            .into_iter()
            .map(|doc| from_document(&self.collection, doc))
            .collect()
    }
}
