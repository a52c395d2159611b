// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::morphology::Kernel;

/// Tunables for one segmentation run
///
/// Missing JSON fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Density grid width in cells; height follows the footprint aspect ratio
    pub grid_width: usize,
    /// Cells denser than `wall_threshold * max_density` are walls
    pub wall_threshold: f64,
    /// Structuring kernel for opening/closing
    pub kernel: Kernel,
    /// Open the free mask to drop isolated specks
    pub open_free_space: bool,
    /// Close the wall mask to bridge small gaps
    pub close_walls: bool,
    /// Sampling stride for wall and free cells
    pub subsample_stride: usize,
    /// Cells skipped next to each endpoint of a visibility line
    pub visibility_buffer: usize,
    /// Initial medoid count, clamped to the number of sampled free cells
    pub requested_clusters: usize,
    /// Clusters whose medoids are closer than this are merged
    pub merge_threshold: f32,
    /// Clustering round cap
    pub max_rounds: usize,
    /// Seed for the initial medoid draw
    pub seed: u64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            grid_width: 300,
            wall_threshold: 0.25,
            kernel: Kernel::cross(),
            open_free_space: true,
            close_walls: true,
            subsample_stride: 3,
            visibility_buffer: 2,
            requested_clusters: 50,
            merge_threshold: 0.6,
            max_rounds: 20,
            seed: 0,
        }
    }
}

impl SegmentationConfig {
    pub fn with_grid_width(mut self, width: usize) -> Self {
        self.grid_width = width;
        self
    }

    pub fn with_wall_threshold(mut self, threshold: f64) -> Self {
        self.wall_threshold = threshold;
        self
    }

    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    pub fn with_open_free_space(mut self, enabled: bool) -> Self {
        self.open_free_space = enabled;
        self
    }

    pub fn with_close_walls(mut self, enabled: bool) -> Self {
        self.close_walls = enabled;
        self
    }

    pub fn with_subsample_stride(mut self, stride: usize) -> Self {
        self.subsample_stride = stride;
        self
    }

    pub fn with_visibility_buffer(mut self, buffer: usize) -> Self {
        self.visibility_buffer = buffer;
        self
    }

    pub fn with_requested_clusters(mut self, clusters: usize) -> Self {
        self.requested_clusters = clusters;
        self
    }

    pub fn with_merge_threshold(mut self, threshold: f32) -> Self {
        self.merge_threshold = threshold;
        self
    }

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject values no run can use
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 {
            return Err(Error::Config("grid_width must be positive".into()));
        }
        if !self.wall_threshold.is_finite() || self.wall_threshold <= 0.0 || self.wall_threshold > 1.0 {
            return Err(Error::Config(format!(
                "wall_threshold must be in (0, 1], got {}",
                self.wall_threshold
            )));
        }
        if self.subsample_stride == 0 {
            return Err(Error::Config("subsample_stride must be at least 1".into()));
        }
        if self.requested_clusters == 0 {
            return Err(Error::Config("requested_clusters must be at least 1".into()));
        }
        if !self.merge_threshold.is_finite() || self.merge_threshold < 0.0 {
            return Err(Error::Config(format!(
                "merge_threshold must be a non-negative number, got {}",
                self.merge_threshold
            )));
        }
        if self.max_rounds == 0 {
            return Err(Error::Config("max_rounds must be at least 1".into()));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
