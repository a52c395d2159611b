// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Strided sampling of wall and free cells
//!
//! Visibility costs O(|free| * |wall|) line traversals, so only cells on a
//! coarse sublattice take part. Smaller strides give finer partitions.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Mask};

/// Sampled wall and free cells in row-major scan order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledCells {
    pub walls: Vec<Cell>,
    pub free: Vec<Cell>,
    pub stride: usize,
}

/// Collect wall and free cells whose coordinates are both multiples of `stride`
///
/// A stride of zero is treated as one.
pub fn subsample(walls: &Mask, free: &Mask, stride: usize) -> SampledCells {
    debug_assert!(walls.same_shape(free));
    let stride = stride.max(1);
    let mut sampled = SampledCells {
        stride,
        ..Default::default()
    };

    for y in (0..walls.height()).step_by(stride) {
        for x in (0..walls.width()).step_by(stride) {
            let cell = Cell::new(x, y);
            if walls[cell] {
                sampled.walls.push(cell);
            } else if free[cell] {
                sampled.free.push(cell);
            }
        }
    }

    sampled
}
