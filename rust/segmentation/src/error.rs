// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::types::ClusterId;

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during segmentation
///
/// All of them are fatal to a run. Hitting the clustering iteration cap is
/// not an error; it is reported through [`crate::cluster::Termination`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Point records could not be parsed: {0}")]
    Parse(#[from] roomseg_pointcloud::Error),

    #[error("Fingerprint length mismatch: {left} vs {right}")]
    Dimension { left: usize, right: usize },

    #[error("Cluster {0} has no members to recenter")]
    EmptyCluster(ClusterId),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(format!("JSON error: {}", err))
    }
}
