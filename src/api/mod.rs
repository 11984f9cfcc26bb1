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

//! Transport router for the nekor backend.
//!
//! ```text
//! /health                      - Health check, pings the document store
//! /nekor/create          POST  - Create a nekor
//! /nekor/get/:id         GET   - Get a nekor
//! /nekor/getNekorsById   POST  - Get nekors by id list
//! /nekor/getAll          GET   - Get every nekor
//! /nekor/:id             DEL   - Delete a nekor and its points
//! /nekor/:id/points      GET   - Points of a nekor
//! /docs, /openapi.json         - Swagger UI and OpenAPI document
//! ```

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod responses;
pub mod routes;

pub use error::{error_codes, ApiError, ErrorResponse};
pub use handlers::{CreateNekorRequest, GetNekorsByIdRequest};
pub use openapi::ApiDoc;
pub use responses::{HealthResponse, ServiceResponse};
pub use routes::{build_app_router, build_nekor_router};
