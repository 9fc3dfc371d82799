// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening placement: doors and windows at wall-segment midpoints.

use buildgen_model::{
    BuildingModel, CatalogTypeKey, InstanceKey, LengthUnit, ParamKind, StructuralKind, WallKey,
};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::walls::WallSegment;

/// Default window sill height, in millimetres.
pub const DEFAULT_SILL_MM: f64 = 1000.0;

/// Kind of wall-hosted opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpeningKind::Door => "Door",
            OpeningKind::Window => "Window",
        }
    }
}

impl std::fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved opening request for one wall edge.
#[derive(Debug, Clone, Copy)]
pub struct OpeningSpec {
    pub kind: OpeningKind,
    pub catalog_type: CatalogTypeKey,
    /// Sill height in millimetres. Windows only.
    pub sill_mm: Option<f64>,
}

/// A placed opening.
#[derive(Debug, Clone, Copy)]
pub struct Opening {
    pub kind: OpeningKind,
    pub host: WallKey,
    pub insertion_point: Point3<f64>,
    /// Sill offset in internal units. Set only for windows.
    pub sill_offset: Option<f64>,
    pub instance: InstanceKey,
}

/// Place one opening at the midpoint of a wall segment's base curve.
///
/// The insertion point stays at z = 0; the host projects it onto the wall's
/// vertical face. Curved walls cannot host openings.
pub fn place_opening<M: BuildingModel>(
    model: &mut M,
    spec: &OpeningSpec,
    segment: &WallSegment,
) -> Result<Opening> {
    let curve = model.wall_curve(segment.wall)?;
    let line = curve
        .as_line()
        .ok_or(Error::UnsupportedHost(segment.wall))?;
    let insertion_point = line.midpoint();

    model.activate_type(spec.catalog_type)?;
    let instance = model.create_instance(
        insertion_point,
        spec.catalog_type,
        segment.wall,
        segment.base_level,
        StructuralKind::NonStructural,
    )?;

    let sill_offset = match spec.kind {
        OpeningKind::Window => {
            let sill = model.convert_to_internal(
                spec.sill_mm.unwrap_or(DEFAULT_SILL_MM),
                LengthUnit::Millimetre,
            );
            model.set_instance_param(instance, ParamKind::SillHeight, sill)?;
            Some(sill)
        }
        OpeningKind::Door => None,
    };

    tracing::debug!(
        kind = %spec.kind,
        wall = segment.index,
        x = insertion_point.x,
        y = insertion_point.y,
        "placed opening"
    );

    Ok(Opening {
        kind: spec.kind,
        host: segment.wall,
        insertion_point,
        sill_offset,
        instance,
    })
}
