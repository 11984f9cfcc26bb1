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

//! The nekor service layers.
//!
//! [`NekorGateway`] owns the domain rules (shape validation, duplicate ids,
//! not-found detection, cascading delete) and composes calls to the
//! [`NekorCollectionConnection`] and the sibling [`PointGateway`]. The
//! connections are the only code that issues store operations; they turn
//! store acknowledgements into [`ServiceResponse`] envelopes.
//!
//! Expected failures are returned as data. Only [`StoreError`] faults use
//! the `Err` channel.

pub mod collection_connection;
pub mod gateway;
pub mod points;

pub use collection_connection::NekorCollectionConnection;
pub use gateway::NekorGateway;
pub use points::{PointCollectionConnection, PointGateway};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::ServiceResponse;
use crate::store::{Document, StoreError};

/// Collection holding nekor documents unless configured otherwise.
pub const DEFAULT_COLLECTION: &str = "nekors";

/// Collection holding the per-point index unless configured otherwise.
pub const DEFAULT_POINTS_COLLECTION: &str = "nekorPoints";

/// Expected failure outcomes. The `Display` text is the envelope's `error`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NekorFailure {
    #[error("Not a valid nekor: {0}")]
    InvalidShape(String),

    #[error("Nekor with duplicate ID already exist in database.")]
    DuplicateIdentifier,

    #[error("Failed to find nekor with this nekorId.")]
    NotFound,

    #[error("Failed to find the nekor you wanted to delete")]
    DeleteTargetNotFound,

    #[error("Failed to insert nekor, insertCount: {0}")]
    NotInserted(u64),

    #[error("Failed to insert nekor point, insertCount: {0}")]
    PointNotInserted(u64),

    #[error("Failed to update nekor, matchedCount: {0}")]
    NotUpdated(u64),

    #[error("Failed to delete")]
    NotDeleted,

    #[error("Failed to delete nekor points")]
    PointsNotDeleted,

    #[error("Failed to delete nekor")]
    CascadeFailed,
}

impl<T> From<NekorFailure> for ServiceResponse<T> {
    fn from(failure: NekorFailure) -> Self {
        ServiceResponse::failure(failure.to_string())
    }
}

pub(crate) fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend(format!(
            "expected a JSON object to store, found {other}"
        ))),
    }
}

pub(crate) fn from_document<T: DeserializeOwned>(
    collection: &str,
    doc: Document,
) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(doc)).map_err(|e| StoreError::Corrupt {
        collection: collection.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Nekor, NekorRoute};
    use serde_json::json;

    #[test]
    fn test_failure_becomes_envelope_error() {
        let response: ServiceResponse<Nekor> = NekorFailure::DuplicateIdentifier.into();
        assert!(!response.success);
        assert!(response.payload.is_none());
        assert_eq!(
            response.error.as_deref(),
            Some("Nekor with duplicate ID already exist in database.")
        );

        let response: ServiceResponse<()> = NekorFailure::NotInserted(0).into();
        assert_eq!(
            response.error.as_deref(),
            Some("Failed to insert nekor, insertCount: 0")
        );
    }

    #[test]
    fn test_from_document_reports_corrupt_collection() {
        let doc = json!({ "nekorId": "n1" })
            .as_object()
            .cloned()
            .expect("fixture is an object");

        let err = from_document::<Nekor>("nekors", doc).expect_err("Expected decode failure");
        match err {
            StoreError::Corrupt { collection, reason } => {
                assert_eq!(collection, "nekors");
                assert!(reason.contains("missing field"), "Reason: {reason}");
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_to_document_round_trips_nekor() {
        let nekor = Nekor::new("n1", NekorRoute::new(vec![[1.0, 2.0]]), Vec::new());
        let doc = to_document(&nekor).expect("Failed to convert");
        assert_eq!(doc["nekorId"], "n1");

        let back: Nekor = from_document("nekors", doc).expect("Failed to decode");
        assert_eq!(back, nekor);
    }
}
