// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for point-record loading.

use thiserror::Error;

/// Result type for point loading.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading point records.
///
/// Line numbers are 1-based and count from the start of the input,
/// header included.
#[derive(Error, Debug)]
pub enum Error {
    #[error("header is not terminated by an `end_header` line")]
    MissingSentinel,

    #[error("malformed header line {line}: `{text}`")]
    MalformedHeader { line: usize, text: String },

    #[error("header does not declare a vertex element")]
    MissingVertexCount,

    #[error("header declares {expected} points but only {found} records follow")]
    TruncatedBody { expected: usize, found: usize },

    #[error("record on line {line} has {found} columns, expected at least 3")]
    ShortRecord { line: usize, found: usize },

    #[error("invalid number `{token}` on line {line}")]
    InvalidNumber { line: usize, token: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
