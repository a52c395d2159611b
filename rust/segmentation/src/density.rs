// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rasterization of a point set into a density grid

use roomseg_pointcloud::{Bounds, PointSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Cell, Grid};

/// Per-cell point counts plus the geometry they were rasterized with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityGrid {
    pub counts: Grid<u32>,
    pub max_density: u32,
    pub bounds: Bounds,
}

impl DensityGrid {
    pub fn width(&self) -> usize {
        self.counts.width()
    }

    pub fn height(&self) -> usize {
        self.counts.height()
    }

    /// Cell containing the world position `(x, y)`, clamped to the grid
    pub fn cell_of(&self, x: f64, y: f64) -> Cell {
        Cell::new(
            axis_index(x, self.bounds.min_x, self.bounds.span_x(), self.width()),
            axis_index(y, self.bounds.min_y, self.bounds.span_y(), self.height()),
        )
    }

    /// World position of the lower corner of `cell`
    pub fn cell_to_world(&self, cell: Cell) -> (f64, f64) {
        (
            self.bounds.min_x + cell.x as f64 * self.bounds.span_x() / self.width() as f64,
            self.bounds.min_y + cell.y as f64 * self.bounds.span_y() / self.height() as f64,
        )
    }
}

#[inline]
fn axis_index(value: f64, min: f64, span: f64, cells: usize) -> usize {
    let index = ((value - min) / span * cells as f64).floor();
    (index.max(0.0) as usize).min(cells - 1)
}

/// Grid height preserving the footprint aspect ratio, at least one row
pub fn grid_height(width: usize, bounds: &Bounds) -> usize {
    ((width as f64 * bounds.span_y() / bounds.span_x()).round() as usize).max(1)
}

/// Rasterize `points` into a `width`-column density grid
///
/// Fails when the point set is empty, the width is zero, or the x/y
/// footprint is degenerate (no cell size can be derived).
pub fn build_density_grid(points: &PointSet, width: usize) -> Result<DensityGrid> {
    if width == 0 {
        return Err(Error::Config("grid width must be positive".into()));
    }
    let bounds = *points
        .bounds()
        .ok_or_else(|| Error::Config("point set is empty".into()))?;
    if bounds.is_degenerate_xy() {
        return Err(Error::Config(format!(
            "degenerate bounding box: x [{}, {}], y [{}, {}]",
            bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
        )));
    }

    let height = grid_height(width, &bounds);
    let mut grid = DensityGrid {
        counts: Grid::filled(width, height, 0u32),
        max_density: 0,
        bounds,
    };

    for p in points {
        let cell = grid.cell_of(p.x, p.y);
        let count = &mut grid.counts[cell];
        *count += 1;
        grid.max_density = grid.max_density.max(*count);
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn box_with_centroid(cx: f64, cy: f64) -> PointSet {
        PointSet::from_xyz([
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 0.0),
            (0.0, 6.0, 0.0),
            (10.0, 6.0, 0.0),
            (cx, cy, 1.0),
        ])
    }

    #[test]
    fn test_height_from_aspect() {
        let grid = build_density_grid(&box_with_centroid(5.0, 3.0), 10).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 6);

        let grid = build_density_grid(&box_with_centroid(5.0, 3.0), 7).unwrap();
        assert_eq!(grid.height(), 4); // round(4.2)
    }

    #[test]
    fn test_centroid_lands_in_middle_cell() {
        for width in [7, 10, 31] {
            let grid = build_density_grid(&box_with_centroid(5.0, 3.0), width).unwrap();
            let cell = grid.cell_of(5.0, 3.0);
            assert_eq!(cell, Cell::new(grid.width() / 2, grid.height() / 2));
            assert_eq!(grid.counts[cell], 1);
        }
    }

    #[test]
    fn test_max_edge_clamps_to_last_cell() {
        let grid = build_density_grid(&box_with_centroid(5.0, 3.0), 10).unwrap();
        assert_eq!(grid.cell_of(10.0, 6.0), Cell::new(9, 5));
        assert_eq!(grid.counts[Cell::new(9, 5)], 1);
        assert_eq!(grid.counts[Cell::new(0, 0)], 1);
    }

    #[test]
    fn test_counts_and_max_density() {
        let points = PointSet::from_xyz([
            (0.0, 0.0, 0.0),
            (0.1, 0.1, 0.0),
            (0.2, 0.05, 0.0),
            (4.0, 4.0, 0.0),
        ]);
        let grid = build_density_grid(&points, 4).unwrap();
        assert_eq!(grid.max_density, 3);
        assert_eq!(grid.counts.as_slice().iter().sum::<u32>(), 4);
    }

    #[test]
    fn test_cell_to_world() {
        let grid = build_density_grid(&box_with_centroid(5.0, 3.0), 10).unwrap();
        let (x, y) = grid.cell_to_world(Cell::new(5, 3));
        assert_relative_eq!(x, 5.0);
        assert_relative_eq!(y, 3.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(matches!(
            build_density_grid(&PointSet::default(), 10),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            build_density_grid(&box_with_centroid(5.0, 3.0), 0),
            Err(Error::Config(_))
        ));
        let line = PointSet::from_xyz([(0.0, 1.0, 0.0), (5.0, 1.0, 0.0)]);
        assert!(matches!(build_density_grid(&line, 10), Err(Error::Config(_))));
    }
}
