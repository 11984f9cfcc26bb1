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

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::nekor::{DEFAULT_COLLECTION, DEFAULT_POINTS_COLLECTION};
use crate::store::{redact_uri, supported_schemes, uri_scheme};

/// Log levels accepted in `logLevel`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration used when no config file exists. Every value can be
/// overridden from the environment.
pub const ENV_CONFIG_TEMPLATE: &str = r#"
host: "${HOST:-0.0.0.0}"
port: ${PORT:-8000}
logLevel: "${LOG_LEVEL:-info}"
store:
  uri: "${DB_URI:-memory://}"
  collection: "${NEKOR_COLLECTION:-nekors}"
  pointsCollection: "${NEKOR_POINTS_COLLECTION:-nekorPoints}"
"#;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NekorServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub store: StoreSettings,
}

/// Where documents live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StoreSettings {
    /// `memory://`, `file://<path>` or `mongodb://...`
    #[serde(default = "default_store_uri")]
    pub uri: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_points_collection")]
    pub points_collection: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_store_uri() -> String {
    "memory://".to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_points_collection() -> String {
    DEFAULT_POINTS_COLLECTION.to_string()
}

impl Default for NekorServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            store: StoreSettings::default(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            uri: default_store_uri(),
            collection: default_collection(),
            points_collection: default_points_collection(),
        }
    }
}

impl NekorServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }
        if self.port == 0 {
            return Err(anyhow!("port must be between 1 and 65535"));
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(anyhow!(
                "invalid logLevel '{}', expected one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }
        self.store.validate()
    }

    /// The bind address, `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Copy of the configuration that is safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.store.uri = redact_uri(&self.store.uri);
        copy
    }
}

impl StoreSettings {
    pub fn validate(&self) -> Result<()> {
        let uri = self.uri.trim();
        if uri.is_empty() {
            return Err(anyhow!("store.uri cannot be empty"));
        }

        let schemes = supported_schemes();
        match uri_scheme(uri) {
            Some(scheme) if schemes.contains(&scheme) => {}
            Some(scheme) => {
                return Err(anyhow!(
                    "store.uri scheme '{scheme}' is not supported, expected one of {}",
                    schemes.join(", ")
                ))
            }
            None => {
                return Err(anyhow!(
                    "store.uri '{}' must start with <scheme>://",
                    redact_uri(uri)
                ))
            }
        }
        if uri == "file://" {
            return Err(anyhow!("store.uri for the file store needs a path"));
        }

        if self.collection.trim().is_empty() {
            return Err(anyhow!("store.collection cannot be empty"));
        }
        if self.points_collection.trim().is_empty() {
            return Err(anyhow!("store.pointsCollection cannot be empty"));
        }
        if self.collection == self.points_collection {
            return Err(anyhow!(
                "store.collection and store.pointsCollection must differ (both '{}')",
                self.collection
            ));
        }
        Ok(())
    }
}
