// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary morphology on wall and free-space masks
//!
//! Erosion and dilation here are majority votes under a structuring kernel
//! rather than the min/max filters of classical morphology: a cell flips
//! when at least `kernel_sum / 2` of its kernel neighbours disagree with it.
//! Neighbours outside the grid replicate the nearest boundary cell.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::types::Mask;

/// Square boolean structuring kernel
///
/// `kernel_sum` (the number of set entries) is computed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Kernel {
    size: usize,
    cells: Vec<bool>,
    kernel_sum: usize,
    /// `(dx, dy)` of each set entry relative to the kernel centre
    offsets: SmallVec<[(isize, isize); 9]>,
}

impl Kernel {
    /// Build from rows. Must be square, odd-sized and have at least one set entry.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 || size % 2 == 0 {
            return Err(Error::Config(format!(
                "kernel size must be odd and non-zero, got {}",
                size
            )));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != size) {
            return Err(Error::Config(format!(
                "kernel must be square: row of length {} in a {}x{} kernel",
                row.len(),
                size,
                size
            )));
        }

        let cells: Vec<bool> = rows.into_iter().flatten().collect();
        let center = (size / 2) as isize;
        let offsets: SmallVec<[(isize, isize); 9]> = cells
            .iter()
            .enumerate()
            .filter(|(_, &set)| set)
            .map(|(i, _)| ((i % size) as isize - center, (i / size) as isize - center))
            .collect();

        if offsets.is_empty() {
            return Err(Error::Config("kernel has no set entries".into()));
        }

        Ok(Self {
            size,
            kernel_sum: offsets.len(),
            cells,
            offsets,
        })
    }

    /// 3x3 cross: the four edge neighbours, centre excluded
    pub fn cross() -> Self {
        let offsets: SmallVec<[(isize, isize); 9]> =
            SmallVec::from_slice(&[(0, -1), (-1, 0), (1, 0), (0, 1)]);
        Self {
            size: 3,
            cells: vec![false, true, false, true, false, true, false, true, false],
            kernel_sum: offsets.len(),
            offsets,
        }
    }

    /// Fully set `size` x `size` kernel
    pub fn square(size: usize) -> Result<Self> {
        Self::from_rows(vec![vec![true; size]; size])
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn kernel_sum(&self) -> usize {
        self.kernel_sum
    }

    /// Support count needed to flip a cell
    pub fn vote_threshold(&self) -> usize {
        self.kernel_sum / 2
    }

    pub fn rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::cross()
    }
}

impl TryFrom<Vec<Vec<bool>>> for Kernel {
    type Error = Error;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Kernel> for Vec<Vec<bool>> {
    fn from(kernel: Kernel) -> Self {
        kernel.rows()
    }
}

/// Applies erode/dilate/open/close with a fixed kernel
///
/// Every operation returns a new mask and leaves the input and the kernel
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct MorphologyEngine {
    kernel: Kernel,
}

impl MorphologyEngine {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Replace the structuring kernel; its sum is recomputed
    pub fn set_kernel(&mut self, rows: Vec<Vec<bool>>) -> Result<()> {
        self.kernel = Kernel::from_rows(rows)?;
        Ok(())
    }

    /// Count kernel neighbours of `(x, y)` whose value equals `target`
    #[inline]
    fn support(&self, mask: &Mask, x: usize, y: usize, target: bool) -> usize {
        self.kernel
            .offsets
            .iter()
            .filter(|&&(dx, dy)| *mask.get_clamped(x as isize + dx, y as isize + dy) == target)
            .count()
    }

    /// Flip cells equal to `from` whose opposite-valued support reaches the vote threshold
    fn vote(&self, mask: &Mask, from: bool) -> Mask {
        if mask.is_empty() {
            return mask.clone();
        }
        let threshold = self.kernel.vote_threshold();
        Mask::from_fn(mask.width(), mask.height(), |x, y| {
            let value = *mask.get_clamped(x as isize, y as isize);
            if value != from {
                return value;
            }
            if self.support(mask, x, y, !from) >= threshold {
                !from
            } else {
                from
            }
        })
    }

    /// Morphological dilation - false cells with enough set neighbours become set
    pub fn dilate(&self, mask: &Mask) -> Mask {
        self.vote(mask, false)
    }

    /// Morphological erosion - set cells with enough unset neighbours are cleared
    pub fn erode(&self, mask: &Mask) -> Mask {
        self.vote(mask, true)
    }

    /// Morphological opening (erode then dilate) - removes small noise
    ///
    /// Cells the dilation pass would add that were not set in the input are
    /// dropped, so the result is always contained in `mask`.
    pub fn open(&self, mask: &Mask) -> Mask {
        let opened = self.dilate(&self.erode(mask));
        opened.zip_map(mask, |&o, &m| o && m)
    }

    /// Morphological closing (dilate then erode) - fills small gaps
    ///
    /// Cells set in the input are kept, so the result always contains `mask`.
    pub fn close(&self, mask: &Mask) -> Mask {
        let closed = self.erode(&self.dilate(mask));
        closed.zip_map(mask, |&c, &m| c || m)
    }
}
