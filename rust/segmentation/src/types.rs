// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core raster and vector types shared by the segmentation pipeline

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Identifier of a cluster. Assigned once at initialization, never reused.
pub type ClusterId = usize;

/// Grid coordinate: `x` is the column, `y` the row
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Row-major `width` x `height` raster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Boolean raster (wall mask, free mask, morphology results)
pub type Mask = Grid<bool>;

/// Cluster label per cell; `None` for cells that carry no sampled free cell
pub type LabelGrid = Grid<Option<ClusterId>>;

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(x, y)` for every cell
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap row-major data; `None` if the length does not match
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            Some(&self.data[self.offset(x, y)])
        } else {
            None
        }
    }

    /// Read with edge replication: out-of-range coordinates are clamped
    /// to the nearest boundary cell. The grid must not be empty.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> &T {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        &self.data[self.offset(cx, cy)]
    }

    /// Row-major backing slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate `(cell, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (Cell::new(i % width, i / width), v))
    }

    /// Cellwise transform into a new grid of the same shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Cellwise combination of two grids of the same shape
    pub fn zip_map<U, V>(&self, other: &Grid<U>, mut f: impl FnMut(&T, &U) -> V) -> Grid<V> {
        debug_assert!(self.same_shape(other));
        Grid {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| f(a, b))
                .collect(),
        }
    }
}

impl<T> Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &T {
        assert!(cell.x < self.width && cell.y < self.height);
        &self.data[self.offset(cell.x, cell.y)]
    }
}

impl<T> IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        assert!(cell.x < self.width && cell.y < self.height);
        let idx = self.offset(cell.x, cell.y);
        &mut self.data[idx]
    }
}

impl Grid<bool> {
    /// Number of set cells
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True when every set cell of `self` is also set in `other`
    pub fn is_subset_of(&self, other: &Mask) -> bool {
        self.same_shape(other) && self.data.iter().zip(&other.data).all(|(&a, &b)| !a || b)
    }

    /// True when no cell is set in both masks
    pub fn is_disjoint(&self, other: &Mask) -> bool {
        self.same_shape(other) && self.data.iter().zip(&other.data).all(|(&a, &b)| !(a && b))
    }

    /// Build a mask from text rows, `#` marking set cells
    ///
    /// Handy for small hand-drawn fixtures.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        Self::from_fn(width, height, |x, y| rows[y].as_bytes().get(x) == Some(&b'#'))
    }
}

/// Visibility vector of one sampled free cell
///
/// One entry per sampled wall cell, normalized to sum to 1 unless no wall
/// was visible, in which case every entry is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fingerprint(Vec<f32>);

impl Fingerprint {
    /// Normalize raw 0/1 visibility flags
    pub fn from_visibility(flags: impl IntoIterator<Item = bool>) -> Self {
        let mut values: Vec<f32> = flags
            .into_iter()
            .map(|v| if v { 1.0 } else { 0.0 })
            .collect();
        let sum: f32 = values.iter().sum();
        if sum > 0.0 {
            for v in &mut values {
                *v /= sum;
            }
        }
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when no sampled wall cell is visible
    pub fn is_blind(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// Number of visible wall samples
    pub fn visible_count(&self) -> usize {
        self.0.iter().filter(|&&v| v != 0.0).count()
    }
}
