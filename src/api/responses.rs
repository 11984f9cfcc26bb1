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

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status of the server
    pub status: String,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Uniform result of every nekor operation.
///
/// Expected failures (invalid shape, duplicate id, not found, unacknowledged
/// writes) travel as `success: false` with an `error` message. Faults never
/// reach this type; they surface as errors at the router boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Result of the operation if successful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    /// Failure message if unsuccessful
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ServiceResponse<T> {
    /// Create a successful response with a payload
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    /// Create a failure response
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(message.into()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResponse<U> {
        ServiceResponse {
            success: self.success,
            payload: self.payload.map(f),
            error: self.error,
        }
    }

    /// Re-type a failure. The payload, if any, is dropped.
    pub fn into_failure<U>(self) -> ServiceResponse<U> {
        ServiceResponse {
            success: self.success,
            payload: None,
            error: self.error,
        }
    }
}

impl ServiceResponse<()> {
    /// Success without a payload, serialized as `"payload": null`.
    pub fn done() -> Self {
        Self::success(())
    }
}

#[derive(Serialize, ToSchema)]
#[schema(as = ServiceResponse)]
pub struct ServiceResponseSchema {
    /// Whether the operation succeeded
    pub success: bool,
    /// Result of the operation if successful
    pub payload: Option<serde_json::Value>,
    /// Failure message if unsuccessful
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_omits_error() {
        let response = ServiceResponse::success(json!({ "nekorId": "n1" }));
        let value = serde_json::to_value(&response).expect("Failed to serialize");
        assert_eq!(value, json!({ "success": true, "payload": { "nekorId": "n1" } }));
    }

    #[test]
    fn test_failure_omits_payload() {
        let response: ServiceResponse<String> = ServiceResponse::failure("Failed to delete");
        let value = serde_json::to_value(&response).expect("Failed to serialize");
        assert_eq!(value, json!({ "success": false, "error": "Failed to delete" }));
    }

    #[test]
    fn test_done_serializes_null_payload() {
        let value = serde_json::to_value(ServiceResponse::done()).expect("Failed to serialize");
        assert_eq!(value, json!({ "success": true, "payload": null }));
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let response: ServiceResponse<Vec<String>> =
            serde_json::from_value(json!({ "success": false })).expect("Failed to deserialize");
        assert!(!response.success);
        assert!(response.payload.is_none());
        assert!(response.error.is_none());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NoDefault {
        id: u32,
    }

    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> ServiceResponse<T> {
        serde_json::from_value(value).expect("Failed to deserialize")
    }

    #[test]
    fn test_deserialize_payload_without_default() {
        let response: ServiceResponse<NoDefault> =
            decode(json!({ "success": true, "payload": { "id": 7 } }));
        assert_eq!(response.payload, Some(NoDefault { id: 7 }));

        let failure: ServiceResponse<NoDefault> =
            decode(json!({ "success": false, "error": "Failed to delete" }));
        assert!(failure.payload.is_none());
        assert_eq!(failure.error.as_deref(), Some("Failed to delete"));
    }

    #[test]
    fn test_map_and_into_failure() {
        let doubled = ServiceResponse::success(2).map(|n| n * 2);
        assert_eq!(doubled.payload, Some(4));

        let failure: ServiceResponse<i32> = ServiceResponse::failure("nope");
        let retyped: ServiceResponse<String> = failure.into_failure();
        assert!(!retyped.success);
        assert_eq!(retyped.error.as_deref(), Some("nope"));
    }
}
