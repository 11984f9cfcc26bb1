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

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::StoreError;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Message sent in place of any internal fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Pair the response with the status its code maps to
    pub fn with_status(self) -> (StatusCode, Json<Self>) {
        let status = status_from_code(&self.code);
        (status, Json(self))
    }
}

fn status_from_code(code: &str) -> StatusCode {
    match code {
        error_codes::INVALID_REQUEST => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Errors that end a request outside the envelope contract.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request failed a structural check before reaching the gateway.
    #[error("{0}")]
    BadRequest(String),

    /// A store fault. Logged, never sent to the caller.
    #[error(transparent)]
    Internal(#[from] StoreError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::BadRequest(message) => {
                ErrorResponse::new(error_codes::INVALID_REQUEST, message)
            }
            ApiError::Internal(err) => {
                error!("Request failed: {err}");
                ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };
        body.with_status().into_response()
    }
}
