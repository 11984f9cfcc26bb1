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

//! HTTP client for the nekor backend.
//!
//! Every call resolves to a [`ServiceResponse`]. Transport errors, non-2xx
//! statuses and undecodable bodies all become the failure
//! `"[<operation>] Unable to access backend"`, so callers handle one shape
//! regardless of where a request failed.

use log::debug;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::ServiceResponse;
use crate::models::{validate_nekor, Nekor, Validation};

#[derive(Debug, Clone)]
pub struct NekorClient {
    http: reqwest::Client,
    base_url: String,
}

impl NekorClient {
    /// `base_url` is the server root, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>/nekor/<segments>`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("nekor")
            .extend(segments);
        Some(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Option<RequestBuilder> {
        Some(self.http.request(method, self.url(segments)?))
    }

    /// Create a nekor. Candidates that fail the shape check are not sent.
    pub async fn create_nekor(&self, nekor: &Nekor) -> ServiceResponse<Nekor> {
        let candidate = match serde_json::to_value(nekor) {
            Ok(value) => value,
            Err(e) => return ServiceResponse::failure(format!("Not a valid nekor: {e}")),
        };
        if let Validation::Invalid(reason) = validate_nekor(&candidate) {
            return ServiceResponse::failure(format!("Not a valid nekor: {reason}"));
        }

        let request = self
            .request(Method::POST, &["create"])
            .map(|r| r.json(&json!({ "nekor": candidate })));
        self.send("createNekor", request).await
    }

    pub async fn get_nekor(&self, nekor_id: &str) -> ServiceResponse<Nekor> {
        let request = self.request(Method::GET, &["get", nekor_id]);
        self.send("getNekor", request).await
    }

    pub async fn get_nekors(&self, nekor_ids: &[String]) -> ServiceResponse<Vec<Nekor>> {
        let request = self
            .request(Method::POST, &["getNekorsById"])
            .map(|r| r.json(&json!({ "nekorIds": nekor_ids })));
        self.send("getNekors", request).await
    }

    pub async fn get_all_nekors(&self) -> ServiceResponse<Vec<Nekor>> {
        let request = self.request(Method::GET, &["getAll"]);
        self.send("getAllNekors", request).await
    }

    pub async fn delete_nekor(&self, nekor_id: &str) -> ServiceResponse<()> {
        let request = self.request(Method::DELETE, &[nekor_id]);
        self.send("deleteNekor", request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: Option<RequestBuilder>,
    ) -> ServiceResponse<T> {
        let Some(request) = request else {
            debug!("[{operation}] invalid base URL {}", self.base_url);
            return ServiceResponse::failure(format!("[{operation}] Unable to access backend"));
        };
        match fetch(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!("[{operation}] request to {} failed: {e}", self.base_url);
                ServiceResponse::failure(format!("[{operation}] Unable to access backend"))
            }
        }
    }
}

async fn fetch<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<ServiceResponse<T>, reqwest::Error> {
    request.send().await?.error_for_status()?.json().await
}
