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

//! Nekor backend: a REST service for browsing pilgrimage routes.
//!
//! Requests flow through three layers that share one document store handle:
//! the axum router in [`api`], the validating [`nekor::NekorGateway`], and
//! the [`nekor::NekorCollectionConnection`] that alone talks to the
//! [`store::DocumentStore`].

pub mod api;
pub mod builder;
pub mod client;
pub mod config;
pub mod models;
pub mod nekor;
pub mod server;
pub mod store;

pub use api::ServiceResponse;
pub use builder::NekorServerBuilder;
pub use client::NekorClient;
pub use config::{load_config, load_config_file, NekorServerConfig};
pub use models::{Difficulty, Nekor, NekorPoint, NekorRoute, PointType, Validation};
pub use nekor::{NekorFailure, NekorGateway};
pub use server::NekorServer;
pub use store::{DocumentStore, StoreError};
