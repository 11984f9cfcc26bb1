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

//! Server configuration.
//!
//! ```yaml
//! host: "${HOST:-0.0.0.0}"
//! port: ${PORT:-8000}
//! logLevel: "${LOG_LEVEL:-info}"
//! store:
//!   uri: "${DB_URI:-memory://}"
//!   collection: nekors
//!   pointsCollection: nekorPoints
//! ```
//!
//! `${VAR}` references are required; `${VAR:-default}` falls back when the
//! variable is unset or empty.

pub mod env_interpolation;
pub mod loader;
pub mod types;

pub use loader::{
    from_json_str, from_yaml_str, load_config, load_config_file, load_config_from_env,
    load_dotenv, ConfigError,
};
pub use types::{NekorServerConfig, StoreSettings, ENV_CONFIG_TEMPLATE, LOG_LEVELS};
