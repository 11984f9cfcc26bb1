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

//! Document store persisted to a single JSON file.
//!
//! All reads are served from an in-memory [`MemoryStore`]. A mutation is
//! applied to a staged copy, written with an atomic write (temp file + rename)
//! and only then made visible, so a failed write changes neither the file nor
//! what readers see.

use async_trait::async_trait;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::memory::{Collections, MemoryStore};
use super::{DeleteAck, Document, DocumentStore, Filter, InsertAck, StoreError, Update, UpdateAck};

pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
    /// Serializes mutations so each stages from the last committed state.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, loading existing collections if the file exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let collections: Collections = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            if content.trim().is_empty() {
                Collections::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            Collections::new()
        };

        info!(
            "Opened file store at {} ({} collection(s))",
            path.display(),
            collections.len()
        );

        Ok(Self {
            path,
            inner: MemoryStore::from_collections(collections),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the committed state to apply a mutation to.
    async fn stage(&self) -> MemoryStore {
        MemoryStore::from_collections(self.inner.snapshot().await)
    }

    /// Persist `staged` and make it the committed state.
    async fn commit(&self, staged: MemoryStore) -> Result<(), StoreError> {
        let collections = staged.snapshot().await;
        self.write_snapshot(&collections).await?;
        self.inner.replace(collections).await;
        Ok(())
    }

    async fn write_snapshot(&self, snapshot: &Collections) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(snapshot)?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, content).await.map_err(|e| {
            error!(
                "Failed to write temp store file {}: {e}",
                temp_path.display()
            );
            StoreError::Io(e)
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            error!(
                "Failed to rename temp store file {} to {}: {e}",
                temp_path.display(),
                self.path.display()
            );
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(StoreError::Io(e));
        }

        debug!("Flushed file store to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, StoreError> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let ack = staged.insert_one(collection, doc).await?;
        self.commit(staged).await?;
        Ok(ack)
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
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let ack = staged.find_one_and_update(collection, filter, update).await?;
        if ack.modified_count > 0 {
            self.commit(staged).await?;
        }
        Ok(ack)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteAck, StoreError> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let ack = staged.delete_one(collection, filter).await?;
        if ack.deleted_count > 0 {
            self.commit(staged).await?;
        }
        Ok(ack)
    }

    async fn delete_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<DeleteAck, StoreError> {
        let _guard = self.write_lock.lock().await;
        let staged = self.stage().await;
        let ack = staged.delete_many(collection, filter).await?;
        if ack.deleted_count > 0 {
            self.commit(staged).await?;
        }
        Ok(ack)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !tokio::fs::try_exists(dir).await? {
                return Err(StoreError::Unavailable(format!(
                    "store directory {} no longer exists",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}
