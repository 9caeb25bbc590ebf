// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Spacetime
//!
//! Deduplicating collections of points in up to four dimensions (x, y, z and
//! an optional time axis), and the triangle [`Face`] built on top of them.
//!
//! Every ordinate is quantized onto an integer grid (`floor(ordinate *
//! resolution)`), producing a [`SpatialKey`]. A [`SpatialCollection`] keeps a
//! single ordered backing sequence and addresses it three ways:
//!
//! - by spatial key: inserting a point whose key is already present
//!   overwrites the existing slot instead of appending, so coincident points
//!   are stored once;
//! - by role: fixed slots such as the A, B and C vertices of a face;
//! - by an arbitrary caller-supplied key, through a second independent index.
//!
//! ## Example
//!
//! ```
//! use spacetime::{Point, SpatialCollection};
//!
//! let mut points: SpatialCollection<Point> = SpatialCollection::new(10.0);
//! points.put(Point::new(1.0, 2.0, 3.0));
//! points.put(Point::new(1.04, 2.01, 3.05)); // same grid cell at resolution 10
//!
//! assert_eq!(points.count(), 1);
//! assert_eq!(points.get_at(1.0, 2.0, 3.0, None).unwrap().x(), Some(1.04));
//! ```

pub mod attachment;
pub mod collection;
pub mod error;
pub mod face;
pub mod index;
pub mod key;
pub mod point;
pub mod snapshot;

pub use attachment::{Bounds, Motion};
pub use collection::SpatialCollection;
pub use error::{Error, Result};
pub use face::{AttachPolicy, Element, Face, Role};
pub use index::DedupIndex;
pub use key::SpatialKey;
pub use point::{Ordinates, Point, Spatial};
pub use snapshot::{ElementSnapshot, FaceSnapshot};
