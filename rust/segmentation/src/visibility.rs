// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Line-of-sight visibility between sampled free and wall cells
//!
//! Each sampled free cell gets a [`Fingerprint`]: which sampled wall cells it
//! can see. Cells in the same room see roughly the same walls, which is what
//! the clustering stage exploits.
//!
//! # Line traversal
//!
//! A digital line steps one cell at a time along the axis with the larger
//! span; the other coordinate is linearly interpolated and rounded to the
//! nearest cell. Occlusion is tested against the full-resolution wall mask,
//! skipping `buffer` cells next to each endpoint so that a free cell hugging
//! a wall, or a wall sample inside a thick wall, is not self-occluded.

use rayon::prelude::*;

use crate::subsample::SampledCells;
use crate::types::{Cell, Fingerprint, Mask};

/// True when no wall lies strictly between `from` and `to`, ignoring the
/// `buffer` cells nearest each endpoint
///
/// Endpoints themselves are never tested, so a buffer of 0 checks every
/// intermediate cell.
pub fn line_of_sight(walls: &Mask, from: Cell, to: Cell, buffer: usize) -> bool {
    let (mut x0, mut y0) = (from.x as i64, from.y as i64);
    let (mut x1, mut y1) = (to.x as i64, to.y as i64);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        (x0, y0) = (y0, x0);
        (x1, y1) = (y1, x1);
    }
    if x0 > x1 {
        (x0, y0, x1, y1) = (x1, y1, x0, y0);
    }

    let run = x1 - x0;
    if run == 0 {
        return true;
    }

    let inset = buffer.max(1) as i64;
    let rise = (y1 - y0) as f64;
    for major in (x0 + inset)..=(x1 - inset) {
        let minor = y0 + ((major - x0) as f64 * rise / run as f64).round() as i64;
        let (cx, cy) = if steep { (minor, major) } else { (major, minor) };
        if walls[Cell::new(cx as usize, cy as usize)] {
            return false;
        }
    }

    true
}

/// Fingerprint of one free cell against every sampled wall cell
pub fn fingerprint(walls: &Mask, free_cell: Cell, wall_samples: &[Cell], buffer: usize) -> Fingerprint {
    Fingerprint::from_visibility(
        wall_samples
            .iter()
            .map(|&wall| line_of_sight(walls, free_cell, wall, buffer)),
    )
}

/// Fingerprints for every sampled free cell, in `sampled.free` order
///
/// Free cells are processed in parallel; the output order and values are
/// identical to a sequential run.
pub fn compute_fingerprints(walls: &Mask, sampled: &SampledCells, buffer: usize) -> Vec<Fingerprint> {
    sampled
        .free
        .par_iter()
        .map(|&cell| fingerprint(walls, cell, &sampled.walls, buffer))
        .collect()
}

/// Debug view: the sampled wall cells visible from `free_cell`
pub fn visibility_mask(walls: &Mask, free_cell: Cell, wall_samples: &[Cell], buffer: usize) -> Mask {
    let mut mask = Mask::filled(walls.width(), walls.height(), false);
    for &wall in wall_samples {
        mask[wall] = line_of_sight(walls, free_cell, wall, buffer);
    }
    mask
}
