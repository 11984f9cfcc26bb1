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

use super::{NekorPoint, NekorRoute, DEFAULT_IMAGE_URL};

/// Difficulty rating of a nekor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Wire names accepted by the shape predicate.
    pub const NAMES: [&'static str; 3] = ["easy", "medium", "hard"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{other}', expected one of {}",
                Difficulty::NAMES.join(", ")
            )),
        }
    }
}

/// A pilgrimage route document.
///
/// `nekor_id` is supplied by the caller and is unique across the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Nekor {
    /// Caller-supplied unique identifier
    pub nekor_id: String,
    /// Title of the route
    pub title: String,
    /// Localized display title
    pub d_title: String,
    pub description: String,
    pub image_url: String,
    /// Estimated completion time
    pub time_completion: f64,
    pub difficulty: Difficulty,
    /// Ordered waypoints
    pub points: Vec<NekorPoint>,
    /// Path geometry
    pub route: NekorRoute,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
}

impl Nekor {
    /// Build a nekor with the default title, description, image, completion
    /// time and difficulty filled in.
    pub fn new(nekor_id: impl Into<String>, route: NekorRoute, points: Vec<NekorPoint>) -> Self {
        let nekor_id = nekor_id.into();
        Self {
            title: format!("nekor {nekor_id}"),
            d_title: String::new(),
            description: format!("description {nekor_id}"),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            time_completion: 0.0,
            difficulty: Difficulty::default(),
            points,
            route,
            date_created: None,
            nekor_id,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_d_title(mut self, d_title: impl Into<String>) -> Self {
        self.d_title = d_title.into();
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

    pub fn with_time_completion(mut self, time_completion: f64) -> Self {
        self.time_completion = time_completion;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_date_created(mut self, date_created: DateTime<Utc>) -> Self {
        self.date_created = Some(date_created);
        self
    }

    /// Identifiers of the embedded waypoints, in route order.
    pub fn point_ids(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|point| point.nekor_point_id.clone())
            .collect()
    }
}
