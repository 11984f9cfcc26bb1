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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::DEFAULT_IMAGE_URL;

/// Marker type of a waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PointType {
    Site,
    Nature,
    Rest,
}

impl PointType {
    pub const NAMES: [&'static str; 3] = ["site", "nature", "rest"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PointType::Site => "site",
            PointType::Nature => "nature",
            PointType::Rest => "rest",
        }
    }
}

impl Default for PointType {
    fn default() -> Self {
        PointType::Site
    }
}

impl fmt::Display for PointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site" => Ok(PointType::Site),
            "nature" => Ok(PointType::Nature),
            "rest" => Ok(PointType::Rest),
            other => Err(format!(
                "unknown point type '{other}', expected one of {}",
                PointType::NAMES.join(", ")
            )),
        }
    }
}

/// A waypoint along a nekor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NekorPoint {
    pub nekor_point_id: String,
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub long: f64,
    pub image_url: String,
    #[serde(rename = "type")]
    pub point_type: PointType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
}

impl NekorPoint {
    /// Build a point with default title, description, image and type.
    pub fn new(nekor_point_id: impl Into<String>, lat: f64, long: f64) -> Self {
        let nekor_point_id = nekor_point_id.into();
        Self {
            title: format!("nekor {nekor_point_id}"),
            description: format!("description {nekor_point_id}"),
            lat,
            long,
            image_url: DEFAULT_IMAGE_URL.to_string(),
            point_type: PointType::default(),
            date_created: None,
            nekor_point_id,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_type(mut self, point_type: PointType) -> Self {
        self.point_type = point_type;
        self
    }
}
