// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Progress checkpoints emitted while a segmentation runs
//!
//! The pipeline reports each stage to a [`PipelineObserver`] instead of
//! rendering anything itself. [`TracingObserver`] forwards checkpoints to
//! `tracing`; [`CheckpointLog`] keeps them for inspection; any
//! `FnMut(&Checkpoint)` closure works as an ad-hoc observer.

use serde::{Deserialize, Serialize};

use crate::cluster::{RoundReport, Termination};

/// One observable step of the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Checkpoint {
    GridBuilt {
        width: usize,
        height: usize,
        max_density: u32,
    },
    WallsClassified {
        walls: usize,
        free: usize,
        unknown: usize,
    },
    MasksRefined {
        walls: usize,
        free: usize,
    },
    Subsampled {
        walls: usize,
        free: usize,
    },
    VisibilityComputed {
        fingerprints: usize,
        dimensions: usize,
        /// Sampled free cells that see no sampled wall
        blind: usize,
    },
    ClusterRound(RoundReport),
    ClusteringFinished {
        clusters: usize,
        termination: Termination,
    },
}

/// Receives checkpoints in pipeline order
pub trait PipelineObserver {
    fn checkpoint(&mut self, checkpoint: &Checkpoint);
}

impl<F> PipelineObserver for F
where
    F: FnMut(&Checkpoint),
{
    fn checkpoint(&mut self, checkpoint: &Checkpoint) {
        self(checkpoint)
    }
}

/// Logs every checkpoint through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn checkpoint(&mut self, checkpoint: &Checkpoint) {
        match checkpoint {
            Checkpoint::GridBuilt {
                width,
                height,
                max_density,
            } => {
                tracing::info!(width, height, max_density, "Density grid built");
            }
            Checkpoint::WallsClassified {
                walls,
                free,
                unknown,
            } => {
                tracing::info!(walls, free, unknown, "Cells classified");
            }
            Checkpoint::MasksRefined { walls, free } => {
                tracing::debug!(walls, free, "Masks refined");
            }
            Checkpoint::Subsampled { walls, free } => {
                tracing::debug!(walls, free, "Cells subsampled");
            }
            Checkpoint::VisibilityComputed {
                fingerprints,
                dimensions,
                blind,
            } => {
                if *blind > 0 {
                    tracing::warn!(blind, "Sampled free cells with no visible wall");
                }
                tracing::info!(fingerprints, dimensions, "Visibility fingerprints computed");
            }
            Checkpoint::ClusterRound(report) => {
                tracing::debug!(
                    round = report.round,
                    live = report.live,
                    merges = report.merges,
                    "Clustering round"
                );
            }
            Checkpoint::ClusteringFinished {
                clusters,
                termination,
            } => {
                if termination.is_converged() {
                    tracing::info!(clusters, ?termination, "Clustering finished");
                } else {
                    tracing::warn!(clusters, ?termination, "Clustering stopped at round cap");
                }
            }
        }
    }
}

/// Records checkpoints in the order received
#[derive(Debug, Clone, Default)]
pub struct CheckpointLog {
    pub checkpoints: Vec<Checkpoint>,
}

impl CheckpointLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-round reports, in round order
    pub fn rounds(&self) -> impl Iterator<Item = &RoundReport> + '_ {
        self.checkpoints.iter().filter_map(|c| match c {
            Checkpoint::ClusterRound(report) => Some(report),
            _ => None,
        })
    }
}

impl PipelineObserver for CheckpointLog {
    fn checkpoint(&mut self, checkpoint: &Checkpoint) {
        self.checkpoints.push(checkpoint.clone());
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn checkpoint(&mut self, _checkpoint: &Checkpoint) {}
}
