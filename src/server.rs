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
use axum::Router;
use log::{error, info, warn};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api;
use crate::config::NekorServerConfig;
use crate::nekor::NekorGateway;
use crate::store::{self, uri_scheme, DocumentStore};

/// The nekor backend process: one store handle shared by every request.
pub struct NekorServer {
    host: String,
    port: u16,
    store: Arc<dyn DocumentStore>,
    gateway: Arc<NekorGateway>,
}

impl NekorServer {
    /// Connect to the configured store and wire the gateway
    pub async fn new(config: &NekorServerConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "Connecting to {} document store",
            uri_scheme(&config.store.uri).unwrap_or("unknown")
        );
        let store = store::connect(&config.store.uri).await?;

        Ok(Self::from_parts(
            config.host.clone(),
            config.port,
            store,
            &config.store.collection,
            &config.store.points_collection,
        ))
    }

    /// Wire a server around an existing store handle
    pub fn from_parts(
        host: String,
        port: u16,
        store: Arc<dyn DocumentStore>,
        collection: &str,
        points_collection: &str,
    ) -> Self {
        let gateway = Arc::new(NekorGateway::new(
            store.clone(),
            collection,
            points_collection,
        ));
        Self {
            host,
            port,
            store,
            gateway,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn gateway(&self) -> Arc<NekorGateway> {
        self.gateway.clone()
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    /// The complete application router
    pub fn router(&self) -> Router {
        api::build_app_router(self.store.clone(), self.gateway.clone())
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let addr = self.address();
        let listener = TcpListener::bind(&addr).await?;
        info!("Nekor backend listening on http://{addr}");
        info!("Swagger UI available at http://{addr}/docs/");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Err(e) = self.store.ping().await {
            warn!("Document store did not answer ping at startup: {e}");
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Nekor backend stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutting down Nekor backend");
}
