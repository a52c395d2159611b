// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # RoomSeg Point Cloud
//!
//! Point types and an ASCII point-record loader for scanned floor plans.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomseg_pointcloud::load_points_from_path;
//!
//! let points = load_points_from_path("office_ascii.ply")?;
//! let bounds = points.bounds().expect("non-empty scan");
//! println!("{} points spanning {:.2} x {:.2}", points.len(), bounds.span_x(), bounds.span_y());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for points, bounds and headers

pub mod error;
pub mod loader;
pub mod point;

pub use error::{Error, Result};
pub use loader::{
    load_points, load_points_from_path, load_points_with_header, parse_header, Header, END_HEADER,
};
pub use point::{Bounds, Point3, PointSet};
