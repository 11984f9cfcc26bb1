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

//! Document store port.
//!
//! The nekor connections never talk to a database driver directly. They issue
//! collection-scoped operations through [`DocumentStore`] using MongoDB-style
//! [`Filter`]s (`{field: value}`, `{field: {$in: [...]}}`) and `$set`
//! [`Update`]s, and receive driver-neutral acknowledgements back.
//!
//! Adapters:
//! - `memory://` - [`MemoryStore`], process-local collections
//! - `file://<path>` - [`FileStore`], memory store snapshotted to a JSON file
//! - `mongodb://` / `mongodb+srv://` - `MongoStore` (cargo feature `mongodb`)
//!
//! A store handle is created once at startup by [`connect`] and shared as an
//! `Arc<dyn DocumentStore>`; adapters are safe for concurrent use.

pub mod file;
pub mod memory;
#[cfg(feature = "mongodb")]
pub mod mongo;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(feature = "mongodb")]
pub use mongo::MongoStore;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Errors raised by store adapters.
///
/// These are faults (connectivity, corruption, misconfiguration), not
/// business outcomes. A missing document is `Ok(None)`, never an error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid store URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt document in collection '{collection}': {reason}")]
    Corrupt { collection: String, reason: String },

    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Document selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// `{field: value}`
    Eq { field: String, value: Value },
    /// `{field: {$in: values}}`
    In { field: String, values: Vec<Value> },
    /// All sub-filters must match.
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            Filter::All => other,
            first => Filter::And(vec![first, other]),
        }
    }

    /// Evaluate the filter against a document's top-level fields.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq { field, value } => doc.get(field) == Some(value),
            Filter::In { field, values } => doc
                .get(field)
                .map(|actual| values.contains(actual))
                .unwrap_or(false),
            Filter::And(filters) => filters.iter().all(|f| f.matches(doc)),
        }
    }

    /// MongoDB query document for this filter.
    pub fn to_query(&self) -> Value {
        match self {
            Filter::All => Value::Object(Map::new()),
            Filter::Eq { field, value } => {
                let mut query = Map::new();
                query.insert(field.clone(), value.clone());
                Value::Object(query)
            }
            Filter::In { field, values } => {
                let mut clause = Map::new();
                clause.insert("$in".to_string(), Value::Array(values.clone()));
                let mut query = Map::new();
                query.insert(field.clone(), Value::Object(clause));
                Value::Object(query)
            }
            Filter::And(filters) => {
                let clauses = filters.iter().map(Filter::to_query).collect();
                let mut query = Map::new();
                query.insert("$and".to_string(), Value::Array(clauses));
                Value::Object(query)
            }
        }
    }
}

/// `$set` update of top-level fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub set: Document,
}

impl Update {
    pub fn set(fields: Document) -> Self {
        Self { set: fields }
    }

    /// Apply the update in place. Returns whether any field changed.
    pub fn apply(&self, doc: &mut Document) -> bool {
        let mut modified = false;
        for (field, value) in &self.set {
            if doc.get(field) != Some(value) {
                doc.insert(field.clone(), value.clone());
                modified = true;
            }
        }
        modified
    }

    pub fn to_update_document(&self) -> Value {
        let mut update = Map::new();
        update.insert("$set".to_string(), Value::Object(self.set.clone()));
        Value::Object(update)
    }
}

/// Acknowledgement of an insert.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertAck {
    pub inserted_count: u64,
    /// The document as stored.
    pub document: Document,
}

/// Acknowledgement of a find-and-update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAck {
    pub matched_count: u64,
    pub modified_count: u64,
    /// The document after the update, if one matched.
    pub document: Option<Document>,
}

/// Acknowledgement of a delete.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Collection-scoped document operations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document. No uniqueness is enforced by the port itself.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<InsertAck, StoreError>;

    /// First document matching `filter`, in insertion order.
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Every document matching `filter`.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>, StoreError>;

    /// Apply `update` to the first match and return the post-update document.
    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: &Filter,
        update: &Update,
    ) -> Result<UpdateAck, StoreError>;

    /// Delete the first document matching `filter`.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<DeleteAck, StoreError>;

    /// Delete every document matching `filter`.
    async fn delete_many(&self, collection: &str, filter: &Filter)
        -> Result<DeleteAck, StoreError>;

    /// Round-trip check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Supported store URI schemes.
pub fn supported_schemes() -> Vec<&'static str> {
    let mut schemes = vec!["memory", "file"];
    if cfg!(feature = "mongodb") {
        schemes.extend(["mongodb", "mongodb+srv"]);
    }
    schemes
}

/// Scheme portion of a store URI (`memory` for `memory://`).
pub fn uri_scheme(uri: &str) -> Option<&str> {
    uri.split_once("://").map(|(scheme, _)| scheme)
}

/// Open the store addressed by `uri`.
pub async fn connect(uri: &str) -> Result<Arc<dyn DocumentStore>, StoreError> {
    let invalid = |reason: String| StoreError::InvalidUri {
        uri: redact_uri(uri),
        reason,
    };

    let (scheme, rest) = uri
        .split_once("://")
        .ok_or_else(|| invalid("missing '<scheme>://' prefix".to_string()))?;

    match scheme {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "file" => {
            if rest.is_empty() {
                return Err(invalid("file store needs a path".to_string()));
            }
            Ok(Arc::new(FileStore::open(rest).await?))
        }
        #[cfg(feature = "mongodb")]
        "mongodb" | "mongodb+srv" => Ok(Arc::new(MongoStore::connect(uri).await?)),
        other => Err(invalid(format!(
            "unsupported scheme '{other}', expected one of {}",
            supported_schemes().join(", ")
        ))),
    }
}

/// Strip credentials from a URI before it is logged or reported.
pub fn redact_uri(uri: &str) -> String {
    match uri.split_once("://") {
        Some((scheme, rest)) => match rest.split_once('@') {
            Some((_, host)) => format!("{scheme}://***@{host}"),
            None => uri.to_string(),
        },
        None => uri.to_string(),
    }
}
