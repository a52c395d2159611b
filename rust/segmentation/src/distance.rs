// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dissimilarity between visibility fingerprints

use crate::error::{Error, Result};
use crate::types::Fingerprint;

/// Half the mass of entries visible from exactly one of the two cells
///
/// `0.5 * sum(a[i] + b[i])` over the positions where exactly one of `a[i]`,
/// `b[i]` is non-zero. Identical fingerprints score 0; two normalized
/// fingerprints with no wall in common score 1.
pub fn fingerprint_distance(a: &Fingerprint, b: &Fingerprint) -> Result<f32> {
    if a.len() != b.len() {
        return Err(Error::Dimension {
            left: a.len(),
            right: b.len(),
        });
    }

    let exclusive: f32 = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .filter(|(&x, &y)| (x != 0.0) != (y != 0.0))
        .map(|(&x, &y)| x + y)
        .sum();

    Ok(0.5 * exclusive)
}
