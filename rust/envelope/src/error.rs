// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for envelope generation.
//!
//! Every error is terminal for the run: the enclosing transaction rolls back
//! and the document is left unchanged. Lookup failures (levels, catalog
//! types) and rejected host operations propagate from the model crate.

use buildgen_model::WallKey;
use thiserror::Error;

/// Result type for envelope generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a generation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid footprint dimension: {width} x {depth} (width and depth must be positive)")]
    InvalidDimension { width: f64, depth: f64 },

    #[error("invalid wall loop: {0}")]
    InvalidLoop(String),

    #[error("invalid envelope configuration: {0}")]
    InvalidConfig(String),

    #[error("wall {0:?} has no linear location curve")]
    UnsupportedHost(WallKey),

    #[error("host model error: {0}")]
    Model(#[from] buildgen_model::Error),
}
