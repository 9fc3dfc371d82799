// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Buildgen Model
//!
//! In-memory host building model: named elevation levels, a reusable
//! component catalog, unit conversion, and transactional element creation
//! (walls, hosted instances, reference planes, extrusion roofs).
//!
//! Generators never touch a process-wide document; they consume the
//! [`BuildingModel`] capability trait, implemented by [`Transaction`], so
//! every edit sequence is atomic: commit on success, rollback on any early
//! exit.

pub mod catalog;
pub mod document;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod keys;
pub mod serialization;
pub mod transaction;
pub mod units;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use catalog::{CatalogType, Category, StructuralKind};
pub use document::Document;
pub use elements::{ExtrusionRoof, Instance, Level, ParamKind, ReferencePlane, Wall};
pub use error::{Error, Result};
pub use geometry::{Curve, Line3};
pub use keys::{CatalogTypeKey, InstanceKey, LevelKey, PlaneKey, RoofKey, WallKey};
pub use serialization::DocumentSnapshot;
pub use transaction::{BuildingModel, Transaction};
pub use units::{convert_to_internal, LengthUnit};
