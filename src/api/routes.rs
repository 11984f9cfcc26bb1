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

//! Route definitions.
//!
//! The nekor routes are nested under `/nekor`. Health, Swagger UI and the
//! banner fallback sit at the root.

use axum::{
    extract::Extension,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers;
use super::openapi::ApiDoc;
use crate::nekor::NekorGateway;
use crate::store::DocumentStore;

/// Build the router for the `/nekor` mount point.
pub fn build_nekor_router(gateway: Arc<NekorGateway>) -> Router {
    Router::new()
        .route(
            "/create",
            post(handlers::create_nekor).delete(handlers::delete_nekor_at_fixed_path),
        )
        .route("/get/:id", get(handlers::get_nekor))
        .route(
            "/getNekorsById",
            post(handlers::get_nekors_by_id).delete(handlers::delete_nekor_at_fixed_path),
        )
        .route(
            "/getAll",
            get(handlers::get_all_nekors).delete(handlers::delete_nekor_at_fixed_path),
        )
        .route("/:id", delete(handlers::delete_nekor))
        .route("/:id/points", get(handlers::get_nekor_points))
        .layer(Extension(gateway))
}

/// Build the complete application router around one shared store handle.
pub fn build_app_router(store: Arc<dyn DocumentStore>, gateway: Arc<NekorGateway>) -> Router {
    Router::new()
        // Health check at root level, pings the store
        .route("/health", get(handlers::health_check))
        .nest("/nekor", build_nekor_router(gateway))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::banner)
        .layer(Extension(store))
        .layer(CorsLayer::permissive())
}
