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

//! API Integration Tests
//!
//! Drive the full application router with `oneshot` requests over an
//! in-memory store and check status codes and envelopes end to end.

mod test_support;

use axum::http::StatusCode;
use nekor_server::nekor::{DEFAULT_COLLECTION, DEFAULT_POINTS_COLLECTION};
use nekor_server::store::MemoryStore;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use test_support::{
    e1_json, empty_request, json_request, sample_nekor_json, send, send_raw, test_router,
    FailingStore,
};

fn memory_router() -> axum::Router {
    test_router(Arc::new(MemoryStore::new()))
}

async fn create(router: &axum::Router, nekor: Value) -> (StatusCode, Value) {
    send(
        router,
        json_request("POST", "/nekor/create", &json!({ "nekor": nekor })),
    )
    .await
}

#[tokio::test]
async fn test_create_then_duplicate() {
    let router = memory_router();

    let (status, body) = create(&router, e1_json()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["payload"]["nekorId"], "e1");
    assert!(body.get("error").is_none());

    // duplicate ids are a failure envelope, still 200
    let (status, body) = create(&router, e1_json()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body.get("payload").is_none());
    assert_eq!(
        body["error"],
        "Nekor with duplicate ID already exist in database."
    );

    let (_, all) = send(&router, empty_request("GET", "/nekor/getAll")).await;
    assert_eq!(all["payload"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_create_round_trips_through_get() {
    let router = memory_router();
    let nekor = sample_nekor_json("via-francigena");

    let (_, created) = create(&router, nekor.clone()).await;
    assert_eq!(created["payload"], nekor);

    let (status, found) = send(&router, empty_request("GET", "/nekor/get/via-francigena")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, json!({ "success": true, "payload": nekor }));
}

#[tokio::test]
async fn test_create_accepts_unwrapped_nekor() {
    let router = memory_router();

    let (status, body) = send(&router, json_request("POST", "/nekor/create", &e1_json())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_create_invalid_shape_is_bad_request() {
    let router = memory_router();

    let mut bad = e1_json();
    bad["difficulty"] = json!("extreme");
    let (status, body) = create(&router, bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("difficulty"), "Message: {message}");

    let mut bad = e1_json();
    bad["route"] = json!({ "nekorRoute": [[1.0, 2.0, 3.0]] });
    let (status, _) = create(&router, bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bad = e1_json();
    if let Some(obj) = bad.as_object_mut() {
        obj.remove("title");
    }
    let (status, _) = create(&router, bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // nothing was persisted
    let (_, all) = send(&router, empty_request("GET", "/nekor/getAll")).await;
    assert_eq!(all["payload"], json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let router = memory_router();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/nekor/create")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"nekor\": "))
        .expect("Failed to build request");
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");

    // missing content type
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/nekor/getNekorsById")
        .body(axum::body::Body::from("{\"nekorIds\": []}"))
        .expect("Failed to build request");
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_is_not_found_envelope() {
    let router = memory_router();

    let (status, body) = send(&router, empty_request("GET", "/nekor/get/nope")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Failed to find nekor with this nekorId." })
    );
}

#[tokio::test]
async fn test_get_nekors_by_id() {
    let router = memory_router();
    for id in ["a", "b", "c"] {
        create(&router, sample_nekor_json(id)).await;
    }

    let (status, body) = send(
        &router,
        json_request("POST", "/nekor/getNekorsById", &json!({ "nekorIds": ["a", "c", "x"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let mut ids: Vec<&str> = body["payload"]
        .as_array()
        .expect("payload array")
        .iter()
        .filter_map(|n| n["nekorId"].as_str())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["a", "c"]);

    let (_, body) = send(
        &router,
        json_request("POST", "/nekor/getNekorsById", &json!({ "nekorIds": [] })),
    )
    .await;
    assert_eq!(body, json!({ "success": true, "payload": [] }));

    let (_, body) = send(
        &router,
        json_request("POST", "/nekor/getNekorsById", &json!({ "nekorIds": ["x", "y"] })),
    )
    .await;
    assert_eq!(body["payload"], json!([]));
}

#[tokio::test]
async fn test_get_nekors_by_id_requires_id_list() {
    let router = memory_router();

    let (status, body) = send(
        &router,
        json_request("POST", "/nekor/getNekorsById", &json!({ "ids": ["a"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_get_all() {
    let router = memory_router();

    let (_, body) = send(&router, empty_request("GET", "/nekor/getAll")).await;
    assert_eq!(body, json!({ "success": true, "payload": [] }));

    for id in ["a", "b", "c", "d"] {
        create(&router, sample_nekor_json(id)).await;
    }
    let (status, body) = send(&router, empty_request("GET", "/nekor/getAll")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_delete_lifecycle() {
    let router = memory_router();
    create(&router, sample_nekor_json("n1")).await;

    let (_, points) = send(&router, empty_request("GET", "/nekor/n1/points")).await;
    assert_eq!(points["payload"].as_array().map(Vec::len), Some(2));

    let (status, body) = send(&router, empty_request("DELETE", "/nekor/n1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "payload": null }));

    let (_, found) = send(&router, empty_request("GET", "/nekor/get/n1")).await;
    assert_eq!(found["success"], false);

    let (_, points) = send(&router, empty_request("GET", "/nekor/n1/points")).await;
    assert_eq!(points["success"], false);

    let (status, body) = send(&router, empty_request("DELETE", "/nekor/n1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": false, "error": "Failed to find the nekor you wanted to delete" })
    );
}

#[tokio::test]
async fn test_delete_ids_matching_fixed_routes() {
    let store = MemoryStore::new();
    let router = test_router(Arc::new(store.clone()));
    let ids = ["create", "getAll", "getNekorsById"];
    for id in ids {
        let (_, body) = create(&router, sample_nekor_json(id)).await;
        assert_eq!(body["success"], true, "create {id}: {body}");
    }

    for id in ids {
        let (status, body) =
            send(&router, empty_request("DELETE", &format!("/nekor/{id}"))).await;
        assert_eq!(status, StatusCode::OK, "delete {id}");
        assert_eq!(body, json!({ "success": true, "payload": null }));
    }
    assert_eq!(store.count(DEFAULT_COLLECTION).await, 0);
    assert_eq!(store.count(DEFAULT_POINTS_COLLECTION).await, 0);

    // the fixed routes still answer their own methods
    let (status, body) = send(&router, empty_request("GET", "/nekor/getAll")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "payload": [] }));
}

#[tokio::test]
async fn test_store_fault_is_generic_internal_error() {
    let router = test_router(Arc::new(FailingStore));

    for request in [
        empty_request("GET", "/nekor/getAll"),
        empty_request("GET", "/nekor/get/e1"),
        empty_request("DELETE", "/nekor/e1"),
        json_request("POST", "/nekor/create", &json!({ "nekor": e1_json() })),
    ] {
        let (status, body) = send_raw(&router, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let text = String::from_utf8_lossy(&body);
        assert!(!text.contains("connection refused"), "Leaked fault: {text}");

        let body: Value = serde_json::from_slice(&body).expect("Body is not JSON");
        assert_eq!(
            body,
            json!({ "code": "INTERNAL_ERROR", "message": "Internal server error" })
        );
    }
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&memory_router(), empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());

    let router = test_router(Arc::new(FailingStore));
    let (status, body) = send(&router, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unavailable");
}

#[tokio::test]
async fn test_unmatched_path_serves_banner() {
    let (status, body) = send_raw(&memory_router(), empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8_lossy(&body), "Nekor Backend Service");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = send(&memory_router(), empty_request("GET", "/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/nekor/create").is_some());
    assert!(body["paths"].get("/nekor/getNekorsById").is_some());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let router = memory_router();
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/nekor/getAll")
        .header("origin", "http://localhost:3000")
        .body(axum::body::Body::empty())
        .expect("Failed to build request");

    let response = tower::ServiceExt::oneshot(router, request)
        .await
        .expect("Request failed");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
