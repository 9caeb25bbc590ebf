// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points in up to four dimensions.

use serde::{Deserialize, Serialize};

use crate::attachment::{Bounds, Motion};
use crate::key::SpatialKey;

/// Four optional ordinates. Any axis may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ordinates {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub t: Option<f64>,
}

impl Ordinates {
    /// All four axes unset.
    pub const UNSET: Ordinates = Ordinates {
        x: None,
        y: None,
        z: None,
        t: None,
    };

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            t: None,
        }
    }

    pub fn xyzt(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self {
            t: Some(t),
            ..Self::xyz(x, y, z)
        }
    }

    /// Quantizes these ordinates at `resolution`.
    pub fn key(&self, resolution: f64) -> SpatialKey {
        SpatialKey::for_ordinates(self, resolution)
    }
}

/// Anything that occupies a position and can therefore be keyed spatially.
pub trait Spatial {
    fn ordinates(&self) -> Ordinates;
}

impl Spatial for Ordinates {
    fn ordinates(&self) -> Ordinates {
        *self
    }
}

/// A point with optional bounds and motion attachments.
///
/// Points are plain values; containers of points are
/// [`SpatialCollection`](crate::SpatialCollection)s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(flatten)]
    ordinates: Ordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bounds: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    motion: Option<Motion>,
}

impl Point {
    /// A point at `(x, y, z)` with no time ordinate.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_ordinates(Ordinates::xyz(x, y, z))
    }

    /// A point at `(x, y, z)` at time `t`.
    pub fn with_time(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self::from_ordinates(Ordinates::xyzt(x, y, z, t))
    }

    pub fn from_ordinates(ordinates: Ordinates) -> Self {
        Self {
            ordinates,
            bounds: None,
            motion: None,
        }
    }

    pub fn x(&self) -> Option<f64> {
        self.ordinates.x
    }

    pub fn y(&self) -> Option<f64> {
        self.ordinates.y
    }

    pub fn z(&self) -> Option<f64> {
        self.ordinates.z
    }

    pub fn t(&self) -> Option<f64> {
        self.ordinates.t
    }

    /// Spatial coordinates with unset axes read as 0.
    pub fn coords(&self) -> [f64; 3] {
        [
            self.ordinates.x.unwrap_or(0.0),
            self.ordinates.y.unwrap_or(0.0),
            self.ordinates.z.unwrap_or(0.0),
        ]
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }
}

impl Spatial for Point {
    fn ordinates(&self) -> Ordinates {
        self.ordinates
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point::new(x, y, z)
    }
}
