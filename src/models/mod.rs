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

//! Domain types for nekor pilgrimage routes.
//!
//! A [`Nekor`] is the persisted document. It embeds an ordered list of
//! [`NekorPoint`] waypoints and a [`NekorRoute`] describing the path geometry
//! as `[longitude, latitude]` pairs.
//!
//! Untrusted JSON must go through [`validation::validate_nekor`] before it is
//! turned into a `Nekor`; the typed structs themselves can only hold values
//! that pass the shape predicate.

pub mod nekor;
pub mod point;
pub mod route;
pub mod validation;

pub use nekor::{Difficulty, Nekor};
pub use point::{NekorPoint, PointType};
pub use route::NekorRoute;
pub use validation::{
    is_nekor, is_nekor_point, is_nekor_route, validate_nekor, validate_nekor_point,
    validate_nekor_route, Validation,
};

/// Image shown for nekors and points created without one.
pub const DEFAULT_IMAGE_URL: &str = "https://images.unsplash.com/photo-1598868660314-f40770bfc932?q=80&w=3042&auto=format&fit=crop&ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D";
