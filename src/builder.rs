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

use anyhow::Result;
use std::sync::Arc;

use crate::config::NekorServerConfig;
use crate::server::NekorServer;
use crate::store::{self, DocumentStore};

/// Builder for creating a NekorServer programmatically
#[derive(Default)]
pub struct NekorServerBuilder {
    config: NekorServerConfig,
    store: Option<Arc<dyn DocumentStore>>,
}

impl NekorServerBuilder {
    /// Create a new NekorServerBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration
    pub fn with_config(mut self, config: NekorServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Use an existing store handle instead of connecting by URI
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_store_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.store.uri = uri.into();
        self
    }

    pub fn with_collections(
        mut self,
        collection: impl Into<String>,
        points_collection: impl Into<String>,
    ) -> Self {
        self.config.store.collection = collection.into();
        self.config.store.points_collection = points_collection.into();
        self
    }

    /// Build the server, connecting to the store URI unless a store was given
    pub async fn build(self) -> Result<NekorServer> {
        let Some(store) = self.store else {
            return NekorServer::new(&self.config).await;
        };

        self.config.validate()?;
        Ok(NekorServer::from_parts(
            self.config.host,
            self.config.port,
            store,
            &self.config.store.collection,
            &self.config.store.points_collection,
        ))
    }
}
