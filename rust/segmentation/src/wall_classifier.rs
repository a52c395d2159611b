// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall / free-space classification of a density grid

use serde::{Deserialize, Serialize};

use crate::density::DensityGrid;
use crate::types::{Cell, Grid, Mask};

/// Class of a single raster cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellClass {
    Wall,
    Free,
    Unknown,
}

/// Disjoint wall and free masks; cells in neither are unknown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub walls: Mask,
    pub free: Mask,
}

impl Classification {
    pub fn class_at(&self, cell: Cell) -> CellClass {
        if self.walls[cell] {
            CellClass::Wall
        } else if self.free[cell] {
            CellClass::Free
        } else {
            CellClass::Unknown
        }
    }

    pub fn class_grid(&self) -> Grid<CellClass> {
        self.walls.zip_map(&self.free, |&wall, &free| match (wall, free) {
            (true, _) => CellClass::Wall,
            (false, true) => CellClass::Free,
            (false, false) => CellClass::Unknown,
        })
    }

    /// Count of (wall, free, unknown) cells
    pub fn counts(&self) -> (usize, usize, usize) {
        let walls = self.walls.count();
        let free = self.free.count();
        (walls, free, self.walls.len() - walls - free)
    }
}

/// Classify every cell: wall when its density exceeds `threshold * max`,
/// free when it has any points but is not a wall, unknown otherwise
pub fn classify_cells(density: &DensityGrid, threshold: f64) -> Classification {
    let cutoff = threshold * density.max_density as f64;
    let walls = density.counts.map(|&d| d as f64 > cutoff);
    let free = density.counts.zip_map(&walls, |&d, &wall| d > 0 && !wall);
    Classification { walls, free }
}

/// Free-space likelihood per cell
///
/// Free cells score `threshold * max - density`, so sparsely hit floor
/// scores higher than cells close to the wall cutoff; wall and unknown
/// cells score zero.
pub fn free_space_probability(density: &DensityGrid, threshold: f64) -> Grid<f32> {
    let cutoff = threshold * density.max_density as f64;
    density.counts.map(|&d| {
        let d = d as f64;
        if d == 0.0 || d > cutoff {
            0.0
        } else {
            (cutoff - d) as f32
        }
    })
}
