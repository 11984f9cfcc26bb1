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

//! OpenAPI documentation, served at `/openapi.json` with Swagger UI at `/docs/`.

use utoipa::OpenApi;

use super::error::ErrorResponse;
use super::handlers::{CreateNekorRequest, GetNekorsByIdRequest};
use super::responses::{HealthResponse, ServiceResponseSchema};
use crate::models::{Difficulty, Nekor, NekorPoint, NekorRoute, PointType};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::health_check,
        super::handlers::create_nekor,
        super::handlers::get_nekor,
        super::handlers::get_nekors_by_id,
        super::handlers::get_all_nekors,
        super::handlers::get_nekor_points,
        super::handlers::delete_nekor,
    ),
    components(
        schemas(
            HealthResponse,
            ServiceResponseSchema,
            ErrorResponse,
            CreateNekorRequest,
            GetNekorsByIdRequest,
            Nekor,
            NekorPoint,
            NekorRoute,
            Difficulty,
            PointType,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Nekors", description = "Nekor pilgrimage routes"),
    ),
    info(
        title = "Nekor Backend API",
        version = "1.0.0",
        description = "CRUD API for nekor pilgrimage routes.\n\nEvery `/nekor` endpoint answers with the envelope `{success, payload?, error?}`. Expected failures such as a duplicate id or an unknown id are returned as `success: false` with HTTP 200.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    )
)]
pub struct ApiDoc;
