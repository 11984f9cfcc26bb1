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

//! Nekor route handlers.
//!
//! Handlers translate HTTP into gateway calls and nothing else. Gateway
//! outcomes, including expected failures, are answered with 200 and the
//! envelope. Only malformed requests (400) and store faults (500) leave the
//! envelope contract.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::{StatusCode, Uri},
    response::Json,
};
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

use super::error::{ApiError, ErrorResponse};
use super::responses::{HealthResponse, ServiceResponse};
use crate::models::{validate_nekor, Nekor, NekorPoint, Validation};
use crate::nekor::NekorGateway;
use crate::store::DocumentStore;

/// Body of `POST /nekor/create`.
#[derive(Deserialize, ToSchema)]
pub struct CreateNekorRequest {
    pub nekor: Nekor,
}

/// Body of `POST /nekor/getNekorsById`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetNekorsByIdRequest {
    pub nekor_ids: Vec<String>,
}

/// Banner served for any unmatched path
pub async fn banner() -> &'static str {
    "Nekor Backend Service"
}

/// Check server and document store health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server and store are healthy", body = HealthResponse),
        (status = 503, description = "Document store is unreachable", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check(
    Extension(store): Extension<Arc<dyn DocumentStore>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, label) = match store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!("Health check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };
    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            timestamp: chrono::Utc::now(),
        }),
    )
}

/// Create a nekor
///
/// The body is `{"nekor": {...}}`. A bare nekor object is accepted too.
#[utoipa::path(
    post,
    path = "/nekor/create",
    request_body(content = inline(CreateNekorRequest)),
    responses(
        (status = 200, description = "Created nekor, or a failure envelope (duplicate id)", body = ServiceResponse),
        (status = 400, description = "Body is not a valid nekor", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Nekors"
)]
pub async fn create_nekor(
    Extension(gateway): Extension<Arc<NekorGateway>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ServiceResponse<Nekor>>, ApiError> {
    let Json(body) = body?;
    let candidate = match body {
        Value::Object(mut map) => match map.remove("nekor") {
            Some(nekor) => nekor,
            None => Value::Object(map),
        },
        other => other,
    };

    if let Validation::Invalid(reason) = validate_nekor(&candidate) {
        return Err(ApiError::BadRequest(format!("Not a valid nekor: {reason}")));
    }

    Ok(Json(gateway.create_nekor(&candidate).await?))
}

/// Get a nekor by id
#[utoipa::path(
    get,
    path = "/nekor/get/{id}",
    params(
        ("id" = String, Path, description = "Nekor ID")
    ),
    responses(
        (status = 200, description = "Nekor, or a not-found failure envelope", body = ServiceResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Nekors"
)]
pub async fn get_nekor(
    Extension(gateway): Extension<Arc<NekorGateway>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse<Nekor>>, ApiError> {
    Ok(Json(gateway.get_nekor_by_id(&id).await?))
}

/// Get the nekors matching a list of ids
#[utoipa::path(
    post,
    path = "/nekor/getNekorsById",
    request_body(content = inline(GetNekorsByIdRequest)),
    responses(
        (status = 200, description = "Matching nekors, possibly none", body = ServiceResponse),
        (status = 400, description = "Body has no nekorIds array", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Nekors"
)]
pub async fn get_nekors_by_id(
    Extension(gateway): Extension<Arc<NekorGateway>>,
    body: Result<Json<GetNekorsByIdRequest>, JsonRejection>,
) -> Result<Json<ServiceResponse<Vec<Nekor>>>, ApiError> {
    let Json(request) = body?;
    Ok(Json(gateway.get_nekors_by_id(&request.nekor_ids).await?))
}

/// Get every nekor
#[utoipa::path(
    get,
    path = "/nekor/getAll",
    responses(
        (status = 200, description = "All nekors", body = ServiceResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Nekors"
)]
pub async fn get_all_nekors(
    Extension(gateway): Extension<Arc<NekorGateway>>,
) -> Result<Json<ServiceResponse<Vec<Nekor>>>, ApiError> {
    Ok(Json(gateway.get_all_nekors().await?))
}

/// Get the points indexed under a nekor
#[utoipa::path(
    get,
    path = "/nekor/{id}/points",
    params(
        ("id" = String, Path, description = "Nekor ID")
    ),
    responses(
        (status = 200, description = "Points of the nekor, or a not-found failure envelope", body = ServiceResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Nekors"
)]
pub async fn get_nekor_points(
    Extension(gateway): Extension<Arc<NekorGateway>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse<Vec<NekorPoint>>>, ApiError> {
    Ok(Json(gateway.get_points(&id).await?))
}

/// Delete a nekor and its points
#[utoipa::path(
    delete,
    path = "/nekor/{id}",
    params(
        ("id" = String, Path, description = "Nekor ID")
    ),
    responses(
        (status = 200, description = "Deleted, or a not-found failure envelope", body = ServiceResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "Nekors"
)]
pub async fn delete_nekor(
    Extension(gateway): Extension<Arc<NekorGateway>>,
    Path(id): Path<String>,
) -> Result<Json<ServiceResponse<()>>, ApiError> {
    Ok(Json(gateway.delete_nekor(&id).await?))
}

/// `DELETE` on a fixed route such as `/nekor/create`.
///
/// Fixed paths shadow `/nekor/{id}`, so the last path segment is taken as
/// the id here.
pub async fn delete_nekor_at_fixed_path(
    Extension(gateway): Extension<Arc<NekorGateway>>,
    uri: Uri,
) -> Result<Json<ServiceResponse<()>>, ApiError> {
    let id = uri.path().rsplit('/').next().unwrap_or_default();
    Ok(Json(gateway.delete_nekor(id).await?))
}
