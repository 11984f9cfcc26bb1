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

//! `${VAR}` and `${VAR:-default}` substitution for configuration text.
//!
//! Substitution happens on the raw text before it is parsed, so a variable
//! can stand in for any scalar (`port: ${PORT:-8000}`). A variable that is
//! set but empty counts as unset. Values are inserted verbatim and never
//! re-expanded.

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use std::env;

/// Upper bound on the expanded text
const MAX_EXPANDED_LENGTH: usize = 1_000_000;

lazy_static! {
    // 1: variable name (POSIX), 3: default value
    static ref VARIABLE: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("valid pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Environment variable '{name}' is not valid unicode")]
    NotUnicode { name: String },

    #[error("Expanded configuration exceeds {MAX_EXPANDED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Expand every variable reference in `input` from the process environment.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut output = String::with_capacity(input.len());
    let mut copied_up_to = 0;
    let mut names = Vec::new();

    for caps in VARIABLE.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        output.push_str(&input[copied_up_to..whole.start()]);
        output.push_str(&resolve(name.as_str(), &caps)?);
        copied_up_to = whole.end();
        names.push(name.as_str());

        if output.len() > MAX_EXPANDED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }
    output.push_str(&input[copied_up_to..]);

    if !names.is_empty() {
        // names only, values may be secrets
        debug!("Interpolated environment variables: {}", names.join(", "));
    }
    Ok(output)
}

fn resolve(name: &str, caps: &Captures<'_>) -> Result<String, InterpolationError> {
    let default = caps.get(3).map(|m| m.as_str());
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        Ok(_) | Err(env::VarError::NotPresent) => {
            default
                .map(str::to_string)
                .ok_or_else(|| InterpolationError::MissingVariable {
                    name: name.to_string(),
                })
        }
        Err(env::VarError::NotUnicode(_)) => Err(InterpolationError::NotUnicode {
            name: name.to_string(),
        }),
    }
}
