// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Codec configuration, optionally loaded from environment variables.

use std::str::FromStr;

use spacetime::AttachPolicy;

use crate::error::{StlError, StlResult};

pub const RESOLUTION_VAR: &str = "SPACETIME_STL_RESOLUTION";
pub const PRECISION_VAR: &str = "SPACETIME_STL_PRECISION";
pub const ROOT_POLICY_VAR: &str = "SPACETIME_STL_ROOT_POLICY";
pub const SOLID_NAME_VAR: &str = "SPACETIME_STL_SOLID_NAME";

/// Reader and writer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StlConfig {
    /// Quantization resolution for every face the reader builds.
    pub resolution: f64,
    /// Digits after the decimal point when writing.
    pub precision: usize,
    /// How the reader folds each parsed facet into the root face.
    pub root_policy: AttachPolicy,
    /// Name written after `solid` and `endsolid`.
    pub solid_name: Option<String>,
}

impl Default for StlConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            precision: 6,
            root_policy: AttachPolicy::AppendOnly,
            solid_name: None,
        }
    }
}

impl StlConfig {
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_root_policy(mut self, policy: AttachPolicy) -> Self {
        self.root_policy = policy;
        self
    }

    pub fn with_solid_name(mut self, name: impl Into<String>) -> Self {
        self.solid_name = Some(name.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from environment variables, rejecting invalid
    /// values.
    pub fn try_from_env() -> StlResult<Self> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            resolution: lookup(RESOLUTION_VAR)
                .and_then(|v| parse_resolution(&v).ok())
                .unwrap_or(defaults.resolution),
            precision: lookup(PRECISION_VAR)
                .and_then(|v| parse_var(PRECISION_VAR, &v).ok())
                .unwrap_or(defaults.precision),
            root_policy: lookup(ROOT_POLICY_VAR)
                .and_then(|v| parse_var(ROOT_POLICY_VAR, &v).ok())
                .unwrap_or(defaults.root_policy),
            solid_name: lookup(SOLID_NAME_VAR)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    fn try_from_lookup<F>(lookup: F) -> StlResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = lookup(RESOLUTION_VAR) {
            config.resolution = parse_resolution(&v)?;
        }
        if let Some(v) = lookup(PRECISION_VAR) {
            config.precision = parse_var(PRECISION_VAR, &v)?;
        }
        if let Some(v) = lookup(ROOT_POLICY_VAR) {
            config.root_policy = parse_var(ROOT_POLICY_VAR, &v)?;
        }
        config.solid_name = lookup(SOLID_NAME_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Ok(config)
    }
}

fn parse_var<T>(name: &str, value: &str) -> StlResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| StlError::Config(format!("{name}={value:?}: {e}")))
}

/// Resolution must be finite and nonzero; the sign is ignored downstream.
fn parse_resolution(value: &str) -> StlResult<f64> {
    let resolution: f64 = parse_var(RESOLUTION_VAR, value)?;
    if !resolution.is_finite() || resolution == 0.0 {
        return Err(StlError::Config(format!(
            "{RESOLUTION_VAR}={value:?}: must be finite and nonzero"
        )));
    }
    Ok(resolution)
}
