// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gable roof construction: boundary profile, reference plane, extrusion.
//!
//! The roof cross-section is a two-segment open boundary from one eave up to
//! the ridge and back down, extruded along the ridge direction between two
//! offsets from a vertical reference plane through the origin.

use buildgen_model::{BuildingModel, CatalogTypeKey, LevelKey, Line3, PlaneKey, RoofKey};
use nalgebra::Point3;

use crate::error::Result;
use crate::footprint::Footprint;

// Legacy cross-section, in internal units. These literals are not derived
// from the footprint; they reproduce the behavior of the first generator
// release and are only consistent with one footprint size.
const LEGACY_SECTION_X: f64 = -20.0;
const LEGACY_EAVE_Y: f64 = 10.0;
const LEGACY_EAVE_Z: f64 = 13.5;
const LEGACY_RIDGE_Z: f64 = 20.0;
const LEGACY_EXTENT: f64 = 20.0;

/// How the gable cross-section is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GableProfile {
    /// The legacy fixed cross-section, kept for compatibility with models
    /// generated by earlier releases.
    Fixed,
    /// Couple the roof to the generated footprint: eaves sit at ±depth/2 on
    /// the top level, the ridge is raised by `rise` (internal units), and the
    /// extrusion spans ±width/2.
    Footprint { rise: f64 },
}

/// A gable profile ready for materialization.
#[derive(Debug, Clone)]
pub struct RoofProfile {
    /// Two segments: eave → ridge, ridge → eave.
    pub boundary: Vec<Line3>,
    pub plane_origin: Point3<f64>,
    pub plane_bubble: Point3<f64>,
    pub plane_free: Point3<f64>,
    pub extrusion_start: f64,
    pub extrusion_end: f64,
}

/// Build the gable boundary and reference-plane frame for a footprint.
///
/// `top_elevation` is the elevation of the level the roof sits on; it is
/// only consulted by [`GableProfile::Footprint`].
pub fn build_profile(
    profile: GableProfile,
    footprint: &Footprint,
    top_elevation: f64,
) -> RoofProfile {
    match profile {
        GableProfile::Fixed => RoofProfile {
            boundary: vec![
                Line3::new(
                    Point3::new(LEGACY_SECTION_X, -LEGACY_EAVE_Y, LEGACY_EAVE_Z),
                    Point3::new(LEGACY_SECTION_X, 0.0, LEGACY_RIDGE_Z),
                ),
                Line3::new(
                    Point3::new(LEGACY_SECTION_X, 0.0, LEGACY_RIDGE_Z),
                    Point3::new(LEGACY_SECTION_X, LEGACY_EAVE_Y, LEGACY_EAVE_Z),
                ),
            ],
            plane_origin: Point3::origin(),
            plane_bubble: Point3::new(0.0, 0.0, LEGACY_RIDGE_Z),
            plane_free: Point3::new(0.0, LEGACY_EXTENT, 0.0),
            extrusion_start: -LEGACY_EXTENT,
            extrusion_end: LEGACY_EXTENT,
        },
        GableProfile::Footprint { rise } => {
            let (dx, dy) = footprint.half_extents();
            let eave_z = top_elevation;
            let ridge_z = top_elevation + rise;
            RoofProfile {
                boundary: vec![
                    Line3::new(
                        Point3::new(-dx, -dy, eave_z),
                        Point3::new(-dx, 0.0, ridge_z),
                    ),
                    Line3::new(
                        Point3::new(-dx, 0.0, ridge_z),
                        Point3::new(-dx, dy, eave_z),
                    ),
                ],
                plane_origin: Point3::origin(),
                plane_bubble: Point3::new(0.0, 0.0, 1.0),
                plane_free: Point3::new(0.0, 1.0, 0.0),
                extrusion_start: -dx,
                extrusion_end: dx,
            }
        }
    }
}

/// Materialize the reference plane and the extrusion roof on the host model.
pub fn create_roof<M: BuildingModel>(
    model: &mut M,
    profile: &RoofProfile,
    level: LevelKey,
    roof_type: CatalogTypeKey,
) -> Result<(PlaneKey, RoofKey)> {
    let plane = model.create_reference_plane(
        profile.plane_origin,
        profile.plane_bubble,
        profile.plane_free,
    )?;
    let roof = model.create_extrusion_roof(
        profile.boundary.clone(),
        plane,
        level,
        roof_type,
        profile.extrusion_start,
        profile.extrusion_end,
    )?;
    tracing::debug!(
        segments = profile.boundary.len(),
        start = profile.extrusion_start,
        end = profile.extrusion_end,
        "created extrusion roof"
    );
    Ok((plane, roof))
}
