// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Quantized grid keys for spatial deduplication.
//!
//! A [`SpatialKey`] maps up to four ordinates onto an integer grid by
//! flooring `ordinate * resolution` on each axis independently. Two
//! positions that land in the same grid cell produce equal keys; the input
//! floats and the resolution that produced the key play no further part in
//! equality, hashing or ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::point::Ordinates;

/// Maps one ordinate onto its grid coordinate.
///
/// The float-to-integer conversion saturates at the `i64` range and maps
/// NaN to 0.
#[inline]
pub fn quantize(ordinate: f64, resolution: f64) -> i64 {
    (ordinate * resolution).floor() as i64
}

/// Signed x, y, z, t grid key.
///
/// Keys are immutable once constructed. Equality and [`Ord`] look only at
/// the four grid coordinates; ordering is lexicographic on `(x, y, z, t)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[i64; 4]", into = "[i64; 4]")]
pub struct SpatialKey {
    x: i64,
    y: i64,
    z: i64,
    t: i64,
    compat: i64,
}

impl SpatialKey {
    /// The origin sentinel, also produced whenever x or y is absent.
    pub const ORIGIN: SpatialKey = SpatialKey {
        x: 0,
        y: 0,
        z: 0,
        t: 0,
        compat: 0,
    };

    /// Builds a key from grid coordinates that are already quantized.
    pub fn from_grid(x: i64, y: i64, z: i64, t: i64) -> Self {
        let compat = leading_xor([x, y, z, t]);
        Self { x, y, z, t, compat }
    }

    /// Quantizes four present ordinates at `resolution`.
    ///
    /// The resolution is used by absolute value.
    pub fn new(x: f64, y: f64, z: f64, t: f64, resolution: f64) -> Self {
        let r = resolution.abs();
        Self::from_grid(
            quantize(x, r),
            quantize(y, r),
            quantize(z, r),
            quantize(t, r),
        )
    }

    /// Quantizes possibly-absent ordinates.
    ///
    /// A missing x or y yields [`SpatialKey::ORIGIN`]. A missing z or t only
    /// zeroes that axis.
    pub fn for_ordinates(ordinates: &Ordinates, resolution: f64) -> Self {
        match (ordinates.x, ordinates.y) {
            (Some(x), Some(y)) => Self::new(
                x,
                y,
                ordinates.z.unwrap_or(0.0),
                ordinates.t.unwrap_or(0.0),
                resolution,
            ),
            _ => Self::ORIGIN,
        }
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    pub fn z(&self) -> i64 {
        self.z
    }

    pub fn t(&self) -> i64 {
        self.t
    }

    /// Grid coordinates as `[x, y, z, t]`.
    pub fn grid(&self) -> [i64; 4] {
        [self.x, self.y, self.z, self.t]
    }

    /// Cheap hash compatible with previously indexed data.
    ///
    /// Axes are visited in x, y, z, t order and XOR-ed into the accumulator
    /// until the first axis whose grid coordinate is zero. A zero x therefore
    /// always hashes to 0, whatever the other axes hold.
    pub fn compat_hash(&self) -> i64 {
        self.compat
    }
}

fn leading_xor(grid: [i64; 4]) -> i64 {
    grid.iter().take_while(|&&g| g != 0).fold(0, |h, &g| h ^ g)
}

impl From<[i64; 4]> for SpatialKey {
    fn from([x, y, z, t]: [i64; 4]) -> Self {
        Self::from_grid(x, y, z, t)
    }
}

impl From<SpatialKey> for [i64; 4] {
    fn from(key: SpatialKey) -> Self {
        key.grid()
    }
}

impl PartialEq for SpatialKey {
    fn eq(&self, other: &Self) -> bool {
        self.grid() == other.grid()
    }
}

impl Eq for SpatialKey {}

impl Hash for SpatialKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid().hash(state);
    }
}

impl PartialOrd for SpatialKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpatialKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.grid().cmp(&other.grid())
    }
}

impl Default for SpatialKey {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for SpatialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.t)
    }
}
