// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding-box and motion descriptors that can ride along with a point.
//!
//! Both are opaque to the collections: they are never quantized, never
//! indexed and never merged when a dedup insert overwrites a slot.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned extent over x, y, z and t. Any bound may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    x_min: Option<f64>,
    x_max: Option<f64>,
    y_min: Option<f64>,
    y_max: Option<f64>,
    z_min: Option<f64>,
    z_max: Option<f64>,
    t_min: Option<f64>,
    t_max: Option<f64>,
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_x(mut self, min: f64, max: f64) -> Self {
        self.x_min = Some(min);
        self.x_max = Some(max);
        self
    }

    pub fn with_y(mut self, min: f64, max: f64) -> Self {
        self.y_min = Some(min);
        self.y_max = Some(max);
        self
    }

    pub fn with_z(mut self, min: f64, max: f64) -> Self {
        self.z_min = Some(min);
        self.z_max = Some(max);
        self
    }

    pub fn with_t(mut self, min: f64, max: f64) -> Self {
        self.t_min = Some(min);
        self.t_max = Some(max);
        self
    }

    pub fn x_min(&self) -> Option<f64> {
        self.x_min
    }

    pub fn x_max(&self) -> Option<f64> {
        self.x_max
    }

    pub fn y_min(&self) -> Option<f64> {
        self.y_min
    }

    pub fn y_max(&self) -> Option<f64> {
        self.y_max
    }

    pub fn z_min(&self) -> Option<f64> {
        self.z_min
    }

    pub fn z_max(&self) -> Option<f64> {
        self.z_max
    }

    pub fn t_min(&self) -> Option<f64> {
        self.t_min
    }

    pub fn t_max(&self) -> Option<f64> {
        self.t_max
    }
}

/// Kinematic descriptor: a reference time and up to three delta terms per
/// spatial axis.
///
/// No kinematic model is attached yet, so the `delta_*` entry points always
/// report [`Error::Unsupported`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    t: Option<f64>,
    dx: [Option<f64>; 3],
    dy: [Option<f64>; 3],
    dz: [Option<f64>; 3],
}

impl Motion {
    /// A motion descriptor referenced at time `t` with no deltas.
    pub fn at(t: f64) -> Self {
        Self {
            t: Some(t),
            ..Self::default()
        }
    }

    pub fn with_dx(mut self, d1: f64, d2: f64, d3: f64) -> Self {
        self.dx = [Some(d1), Some(d2), Some(d3)];
        self
    }

    pub fn with_dy(mut self, d1: f64, d2: f64, d3: f64) -> Self {
        self.dy = [Some(d1), Some(d2), Some(d3)];
        self
    }

    pub fn with_dz(mut self, d1: f64, d2: f64, d3: f64) -> Self {
        self.dz = [Some(d1), Some(d2), Some(d3)];
        self
    }

    /// Reference time.
    pub fn t(&self) -> Option<f64> {
        self.t
    }

    pub fn dx1(&self) -> Option<f64> {
        self.dx[0]
    }

    pub fn dx2(&self) -> Option<f64> {
        self.dx[1]
    }

    pub fn dx3(&self) -> Option<f64> {
        self.dx[2]
    }

    pub fn dy1(&self) -> Option<f64> {
        self.dy[0]
    }

    pub fn dy2(&self) -> Option<f64> {
        self.dy[1]
    }

    pub fn dy3(&self) -> Option<f64> {
        self.dy[2]
    }

    pub fn dz1(&self) -> Option<f64> {
        self.dz[0]
    }

    pub fn dz2(&self) -> Option<f64> {
        self.dz[1]
    }

    pub fn dz3(&self) -> Option<f64> {
        self.dz[2]
    }

    pub fn delta_x(&self, dt: f64) -> Result<f64> {
        Err(no_model("x", dt))
    }

    pub fn delta_y(&self, dt: f64) -> Result<f64> {
        Err(no_model("y", dt))
    }

    pub fn delta_z(&self, dt: f64) -> Result<f64> {
        Err(no_model("z", dt))
    }
}

fn no_model(axis: &str, dt: f64) -> Error {
    Error::unsupported(format!(
        "no kinematic model for {axis} displacement over dt={dt}"
    ))
}
