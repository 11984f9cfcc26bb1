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

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Path geometry of a nekor as ordered `[longitude, latitude]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NekorRoute {
    #[schema(value_type = Vec<Vec<f64>>)]
    pub nekor_route: Vec<[f64; 2]>,
}

impl NekorRoute {
    pub fn new(nekor_route: Vec<[f64; 2]>) -> Self {
        Self { nekor_route }
    }

    pub fn len(&self) -> usize {
        self.nekor_route.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nekor_route.is_empty()
    }
}
