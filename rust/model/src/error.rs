// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document operations.

use crate::catalog::Category;
use crate::keys::{CatalogTypeKey, InstanceKey, LevelKey, PlaneKey, RoofKey, WallKey};

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying or editing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No level carries the requested display name.
    #[error("level not found: \"{0}\"")]
    LevelNotFound(String),

    /// No catalog type matches the requested category/type/family names.
    #[error("catalog type not found: {category} \"{type_name}\" of family \"{family_name}\"")]
    CatalogTypeNotFound {
        category: Category,
        type_name: String,
        family_name: String,
    },

    /// Level key does not resolve in this document.
    #[error("level not in document: {0:?}")]
    UnknownLevel(LevelKey),

    /// Catalog type key does not resolve in this document.
    #[error("catalog type not in document: {0:?}")]
    UnknownCatalogType(CatalogTypeKey),

    /// Wall key does not resolve in this document.
    #[error("wall not in document: {0:?}")]
    UnknownWall(WallKey),

    /// Instance key does not resolve in this document.
    #[error("instance not in document: {0:?}")]
    UnknownInstance(InstanceKey),

    /// Reference plane key does not resolve in this document.
    #[error("reference plane not in document: {0:?}")]
    UnknownPlane(PlaneKey),

    /// Roof key does not resolve in this document.
    #[error("roof not in document: {0:?}")]
    UnknownRoof(RoofKey),

    /// The model rejected a creation or edit request.
    #[error("host operation rejected: {0}")]
    OperationFailed(String),

    /// Snapshot serialization/deserialization error.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}
