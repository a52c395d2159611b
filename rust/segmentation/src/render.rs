// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory raster views of pipeline grids
//!
//! Images are top-row-first in grid row order; encoding them to files is
//! left to the caller.

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

use crate::cluster::cluster_color;
use crate::density::DensityGrid;
use crate::types::{Cell, LabelGrid, Mask};

/// Grayscale density, scaled so the densest cell is white
pub fn density_image(density: &DensityGrid) -> GrayImage {
    let max = density.max_density;
    ImageBuffer::from_fn(density.width() as u32, density.height() as u32, |x, y| {
        let d = density.counts[Cell::new(x as usize, y as usize)];
        let level = if max == 0 {
            0
        } else {
            (255 * d as u64 / max as u64) as u8
        };
        Luma([level])
    })
}

/// Set cells white, unset cells black
pub fn mask_image(mask: &Mask) -> GrayImage {
    ImageBuffer::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        Luma([if mask[Cell::new(x as usize, y as usize)] { 255 } else { 0 }])
    })
}

/// Labelled cells in their cluster colour, unlabelled cells black
pub fn label_image(labels: &LabelGrid) -> RgbImage {
    ImageBuffer::from_fn(labels.width() as u32, labels.height() as u32, |x, y| {
        match labels[Cell::new(x as usize, y as usize)] {
            Some(id) => Rgb(cluster_color(id)),
            None => Rgb([0, 0, 0]),
        }
    })
}
