// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room segmentation of scanned floor plans
//!
//! This crate turns a floor-plan point cloud into a room partition:
//! 1. Rasterizing points into a density grid
//! 2. Classifying cells as wall, free or unknown
//! 3. Refining the masks with majority-vote morphology
//! 4. Fingerprinting sampled free cells by which sampled walls they can see
//! 5. Clustering fingerprints into rooms with adaptive medoids
//!
//! # Usage
//!
//! ```rust,ignore
//! use roomseg::{segment_rooms, SegmentationConfig, TracingObserver};
//! use roomseg_pointcloud::load_points_from_path;
//!
//! let points = load_points_from_path("office_ascii.ply")?;
//! let config = SegmentationConfig::default().with_seed(7);
//! let segmentation = segment_rooms(&points, &config, &mut TracingObserver)?;
//!
//! println!("{} rooms", segmentation.partition.clusters.len());
//! let labels = segmentation.label_grid();
//! ```

pub mod cluster;
pub mod config;
pub mod density;
pub mod distance;
pub mod error;
pub mod morphology;
pub mod observer;
pub mod render;
pub mod subsample;
pub mod types;
pub mod visibility;
pub mod wall_classifier;

// Re-export commonly used types and functions
pub use cluster::{cluster_color, Cluster, ClusterEngine, ClusterState, RoundReport, Termination};
pub use config::SegmentationConfig;
pub use density::{build_density_grid, DensityGrid};
pub use distance::fingerprint_distance;
pub use error::{Error, Result};
pub use morphology::{Kernel, MorphologyEngine};
pub use observer::{Checkpoint, CheckpointLog, NoopObserver, PipelineObserver, TracingObserver};
pub use subsample::{subsample, SampledCells};
pub use types::{Cell, ClusterId, Fingerprint, Grid, LabelGrid, Mask};
pub use visibility::{compute_fingerprints, line_of_sight, visibility_mask};
pub use wall_classifier::{classify_cells, free_space_probability, CellClass, Classification};

use roomseg_pointcloud::PointSet;
use serde::{Deserialize, Serialize};

/// Wall/free partition of sampled free cells into rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomPartition {
    /// Wall mask the fingerprints were traced against
    pub walls: Mask,
    pub free: Mask,
    pub samples: SampledCells,
    /// One per `samples.free` entry, same order
    pub fingerprints: Vec<Fingerprint>,
    pub clusters: ClusterState,
    pub termination: Termination,
}

impl RoomPartition {
    /// Cluster id for every sampled free cell, `None` elsewhere
    pub fn label_grid(&self) -> LabelGrid {
        let mut labels = Grid::filled(self.walls.width(), self.walls.height(), None);
        let assignments = self.clusters.assignments(self.samples.free.len());
        for (&cell, label) in self.samples.free.iter().zip(assignments) {
            labels[cell] = label;
        }
        labels
    }

    /// Cluster holding the sampled free cell at `cell`, if any
    pub fn cluster_at(&self, cell: Cell) -> Option<ClusterId> {
        let index = self.samples.free.iter().position(|&c| c == cell)?;
        self.clusters
            .iter()
            .find(|(_, c)| c.members.binary_search(&index).is_ok())
            .map(|(id, _)| id)
    }
}

/// Everything produced by a run from points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segmentation {
    pub density: DensityGrid,
    /// Classification before morphology
    pub classification: Classification,
    pub partition: RoomPartition,
}

impl Segmentation {
    pub fn label_grid(&self) -> LabelGrid {
        self.partition.label_grid()
    }
}

/// Apply the configured morphology to raw classification masks
///
/// The free mask is opened and the wall mask optionally closed. Cells the
/// closing turns into walls are removed from the free mask so the two stay
/// disjoint.
pub fn refine_masks(classification: &Classification, config: &SegmentationConfig) -> Classification {
    let engine = MorphologyEngine::new(config.kernel.clone());

    let walls = if config.close_walls {
        engine.close(&classification.walls)
    } else {
        classification.walls.clone()
    };
    let free = if config.open_free_space {
        engine.open(&classification.free)
    } else {
        classification.free.clone()
    };
    let free = free.zip_map(&walls, |&f, &w| f && !w);

    Classification { walls, free }
}

/// Run the whole pipeline on a point set
///
/// # Arguments
///
/// * `points` - Scanned points; only x and y are used
/// * `config` - Run parameters, validated first
/// * `observer` - Receives a checkpoint after every stage
pub fn segment_rooms(
    points: &PointSet,
    config: &SegmentationConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<Segmentation> {
    config.validate()?;

    let density = build_density_grid(points, config.grid_width)?;
    observer.checkpoint(&Checkpoint::GridBuilt {
        width: density.width(),
        height: density.height(),
        max_density: density.max_density,
    });

    let classification = classify_cells(&density, config.wall_threshold);
    let (walls, free, unknown) = classification.counts();
    observer.checkpoint(&Checkpoint::WallsClassified {
        walls,
        free,
        unknown,
    });

    let refined = refine_masks(&classification, config);
    observer.checkpoint(&Checkpoint::MasksRefined {
        walls: refined.walls.count(),
        free: refined.free.count(),
    });

    let partition = segment_masks(refined.walls, refined.free, config, observer)?;

    Ok(Segmentation {
        density,
        classification,
        partition,
    })
}

/// Parse point records from text and run [`segment_rooms`] on them
pub fn segment_rooms_from_text(
    text: &str,
    config: &SegmentationConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<Segmentation> {
    let points = roomseg_pointcloud::load_points(text)?;
    tracing::debug!(points = points.len(), "Loaded point records");
    segment_rooms(&points, config, observer)
}

/// Run subsampling, visibility and clustering on already refined masks
///
/// The masks must have the same shape and must not share a set cell.
pub fn segment_masks(
    walls: Mask,
    free: Mask,
    config: &SegmentationConfig,
    observer: &mut dyn PipelineObserver,
) -> Result<RoomPartition> {
    config.validate()?;
    if !walls.same_shape(&free) {
        return Err(Error::Config(format!(
            "mask shapes differ: {}x{} walls vs {}x{} free",
            walls.width(),
            walls.height(),
            free.width(),
            free.height()
        )));
    }
    if !walls.is_disjoint(&free) {
        return Err(Error::Config("wall and free masks overlap".into()));
    }

    let samples = subsample(&walls, &free, config.subsample_stride);
    observer.checkpoint(&Checkpoint::Subsampled {
        walls: samples.walls.len(),
        free: samples.free.len(),
    });

    let fingerprints = compute_fingerprints(&walls, &samples, config.visibility_buffer);
    observer.checkpoint(&Checkpoint::VisibilityComputed {
        fingerprints: fingerprints.len(),
        dimensions: samples.walls.len(),
        blind: fingerprints.iter().filter(|f| f.is_blind()).count(),
    });

    let mut engine = ClusterEngine::new(&fingerprints, config.merge_threshold, config.max_rounds);
    let termination = engine.run(config.requested_clusters, config.seed, observer)?;
    let clusters = engine.into_state();
    observer.checkpoint(&Checkpoint::ClusteringFinished {
        clusters: clusters.len(),
        termination,
    });

    Ok(RoomPartition {
        walls,
        free,
        samples,
        fingerprints,
        clusters,
        termination,
    })
}
