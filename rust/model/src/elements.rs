// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Materialized building elements stored in the document.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

use crate::catalog::StructuralKind;
use crate::geometry::{Curve, Line3};
use crate::keys::{CatalogTypeKey, LevelKey, PlaneKey, WallKey};

/// A named horizontal elevation reference.
///
/// Walls and roofs are anchored to levels rather than raw coordinates, so
/// they stay valid when a level's elevation changes.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    /// Elevation in internal units.
    pub elevation: f64,
}

/// A wall element bound to a base level.
#[derive(Debug, Clone)]
pub struct Wall {
    pub curve: Curve,
    pub base_level: LevelKey,
    /// Top constraint. `None` means the wall is unconnected.
    pub top_level: Option<LevelKey>,
    pub structural: bool,
}

/// Instance parameter slots understood by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Vertical offset from the host level up to the bottom of the opening.
    SillHeight,
    /// Vertical offset from the host level up to the top of the opening.
    HeadHeight,
}

impl ParamKind {
    /// Returns the parameter name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::SillHeight => "sill_height",
            ParamKind::HeadHeight => "head_height",
        }
    }

    /// Inverse of [`ParamKind::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sill_height" => Some(ParamKind::SillHeight),
            "head_height" => Some(ParamKind::HeadHeight),
            _ => None,
        }
    }
}

/// A placed component instance (door or window) hosted on a wall.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Insertion point on the host wall's base curve.
    pub point: Point3<f64>,
    pub catalog_type: CatalogTypeKey,
    pub host_wall: WallKey,
    pub level: LevelKey,
    pub structural_kind: StructuralKind,
    pub params: FxHashMap<ParamKind, f64>,
}

/// A vertical work plane defined by an origin and two direction points.
#[derive(Debug, Clone)]
pub struct ReferencePlane {
    pub origin: Point3<f64>,
    pub bubble_end: Point3<f64>,
    pub free_end: Point3<f64>,
}

/// A roof swept from a boundary profile along a reference plane, between two
/// offsets from that plane.
#[derive(Debug, Clone)]
pub struct ExtrusionRoof {
    pub boundary: Vec<Line3>,
    pub plane: PlaneKey,
    pub level: LevelKey,
    pub roof_type: CatalogTypeKey,
    pub extrusion_start: f64,
    pub extrusion_end: f64,
}
