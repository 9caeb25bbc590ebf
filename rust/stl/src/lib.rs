// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Spacetime STL
//!
//! Reads and writes ASCII STL text over [`spacetime::Face`] trees.
//!
//! ```text
//! solid [name]
//!   facet normal <fx> <fy> <fz>
//!     outer loop
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!       vertex <x> <y> <z>
//!     endloop
//!   endfacet
//! endsolid [name]
//! ```
//!
//! Reading builds one child face per facet and folds it into a root face
//! under the configured [`AttachPolicy`](spacetime::AttachPolicy). Writing
//! walks the root's child faces in slot order.

pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

pub use config::StlConfig;
pub use error::{StlError, StlResult};
pub use reader::{load_stl, read_stl, read_stl_named};
pub use writer::{save_stl, write_stl};
