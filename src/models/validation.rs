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

//! Runtime shape predicate for untrusted nekor documents.
//!
//! Request bodies arrive as arbitrary JSON. Before anything reaches the store
//! the candidate is checked field by field: every required field must be
//! present with the right JSON type, enumerants must be members of their
//! closed sets, and every route coordinate must be a pair of numbers. The
//! first violation is reported as the [`Validation::Invalid`] reason.
//!
//! The same functions back the router's pre-check, the gateway's create rule
//! and the client's pre-flight check, so all three enforce identical rules.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{Difficulty, Nekor, NekorPoint, NekorRoute, PointType};

/// Outcome of checking an untrusted value against a target type.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Invalid(String),
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Validation::Valid(value) => Ok(value),
            Validation::Invalid(reason) => Err(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Validation<U> {
        match self {
            Validation::Valid(value) => Validation::Valid(f(value)),
            Validation::Invalid(reason) => Validation::Invalid(reason),
        }
    }
}

impl<T> From<Result<T, String>> for Validation<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => Validation::Valid(value),
            Err(reason) => Validation::Invalid(reason),
        }
    }
}

/// Check `candidate` against the nekor shape and decode it.
pub fn validate_nekor(candidate: &Value) -> Validation<Nekor> {
    check_nekor(candidate)
        .and_then(|()| decode(candidate))
        .into()
}

/// Check `candidate` against the waypoint shape and decode it.
pub fn validate_nekor_point(candidate: &Value) -> Validation<NekorPoint> {
    check_point(candidate)
        .and_then(|()| decode(candidate))
        .into()
}

/// Check `candidate` against the route shape and decode it.
pub fn validate_nekor_route(candidate: &Value) -> Validation<NekorRoute> {
    check_route(candidate)
        .and_then(|()| decode(candidate))
        .into()
}

pub fn is_nekor(candidate: &Value) -> bool {
    validate_nekor(candidate).is_valid()
}

pub fn is_nekor_point(candidate: &Value) -> bool {
    validate_nekor_point(candidate).is_valid()
}

pub fn is_nekor_route(candidate: &Value) -> bool {
    validate_nekor_route(candidate).is_valid()
}

fn decode<T: DeserializeOwned>(candidate: &Value) -> Result<T, String> {
    serde_json::from_value(candidate.clone()).map_err(|e| e.to_string())
}

fn check_nekor(candidate: &Value) -> Result<(), String> {
    let obj = as_object(candidate, "nekor")?;

    for field in ["nekorId", "title", "dTitle", "description", "imageUrl"] {
        require_string(obj, field)?;
    }
    require_number(obj, "timeCompletion")?;
    require_member(obj, "difficulty", &Difficulty::NAMES)?;
    check_date_created(obj)?;

    let points = require(obj, "points")?
        .as_array()
        .ok_or_else(|| "field `points` must be an array".to_string())?;
    for (index, point) in points.iter().enumerate() {
        check_point(point).map_err(|reason| format!("points[{index}]: {reason}"))?;
    }

    check_route(require(obj, "route")?).map_err(|reason| format!("route: {reason}"))
}

fn check_point(candidate: &Value) -> Result<(), String> {
    let obj = as_object(candidate, "nekor point")?;

    for field in ["nekorPointId", "title", "description", "imageUrl"] {
        require_string(obj, field)?;
    }
    require_number(obj, "lat")?;
    require_number(obj, "long")?;
    require_member(obj, "type", &PointType::NAMES)?;
    check_date_created(obj)
}

fn check_route(candidate: &Value) -> Result<(), String> {
    let obj = as_object(candidate, "nekor route")?;
    let coords = require(obj, "nekorRoute")?
        .as_array()
        .ok_or_else(|| "field `nekorRoute` must be an array".to_string())?;

    for (index, coord) in coords.iter().enumerate() {
        let valid_pair = coord
            .as_array()
            .map(|pair| pair.len() == 2 && pair.iter().all(Value::is_number))
            .unwrap_or(false);
        if !valid_pair {
            return Err(format!(
                "nekorRoute[{index}] must be a [longitude, latitude] pair of numbers"
            ));
        }
    }
    Ok(())
}

fn check_date_created(obj: &Map<String, Value>) -> Result<(), String> {
    match obj.get("dateCreated") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(raw)) => chrono::DateTime::parse_from_rfc3339(raw)
            .map(|_| ())
            .map_err(|e| format!("field `dateCreated` is not an RFC 3339 timestamp: {e}")),
        Some(_) => Err("field `dateCreated` must be a string".to_string()),
    }
}

fn as_object<'a>(candidate: &'a Value, what: &str) -> Result<&'a Map<String, Value>, String> {
    candidate
        .as_object()
        .ok_or_else(|| format!("{what} must be a JSON object"))
}

fn require<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, String> {
    match obj.get(field) {
        Some(Value::Null) | None => Err(format!("missing field `{field}`")),
        Some(value) => Ok(value),
    }
}

fn require_string(obj: &Map<String, Value>, field: &str) -> Result<(), String> {
    if require(obj, field)?.is_string() {
        Ok(())
    } else {
        Err(format!("field `{field}` must be a string"))
    }
}

fn require_number(obj: &Map<String, Value>, field: &str) -> Result<(), String> {
    if require(obj, field)?.is_number() {
        Ok(())
    } else {
        Err(format!("field `{field}` must be a number"))
    }
}

fn require_member(obj: &Map<String, Value>, field: &str, allowed: &[&str]) -> Result<(), String> {
    match require(obj, field)?.as_str() {
        Some(value) if allowed.contains(&value) => Ok(()),
        _ => Err(format!(
            "field `{field}` must be one of {}",
            allowed.join(", ")
        )),
    }
}
