// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Envelope configuration: logical roles mapped to document lookup keys.
//!
//! Display names (levels, catalog types) and external dimensions live here,
//! not in the generator code. [`EnvelopeConfig::resolve`] validates the whole
//! configuration against a document once, before any element is created, so
//! every lookup failure surfaces as an explicit error up front.

use buildgen_model::{
    convert_to_internal, CatalogTypeKey, Category, Document, LengthUnit, LevelKey,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::footprint::Footprint;
use crate::openings::{OpeningKind, OpeningSpec, DEFAULT_SILL_MM};
use crate::roof::GableProfile;
use crate::walls::WALLS_PER_LOOP;

/// Footprint dimensions, in millimetres.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FootprintConfig {
    pub width_mm: f64,
    pub depth_mm: f64,
}

/// Display names of the two elevation levels the envelope binds to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRoles {
    pub base: String,
    pub top: String,
}

/// One entry of the per-edge opening plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpeningConfig {
    pub kind: OpeningKind,
    pub type_name: String,
    pub family: String,
    /// Sill height in millimetres; windows only. Defaults to 1000 mm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sill_mm: Option<f64>,
}

/// Gable cross-section selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofProfileConfig {
    /// Legacy constant cross-section (the default).
    Fixed,
    /// Derive the cross-section from the footprint.
    Footprint { rise_mm: f64 },
}

impl Default for RoofProfileConfig {
    fn default() -> Self {
        RoofProfileConfig::Fixed
    }
}

/// Roof type selection and profile strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofConfig {
    pub type_name: String,
    pub family: String,
    #[serde(default)]
    pub profile: RoofProfileConfig,
}

/// Full configuration for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    pub footprint: FootprintConfig,
    pub levels: LevelRoles,
    /// Ordered plan: entry i is placed on wall segment i.
    pub openings: Vec<OpeningConfig>,
    pub roof: RoofConfig,
}

/// A fully resolved run plan: every display name looked up, every dimension
/// converted to internal units.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub footprint: Footprint,
    pub base_level: LevelKey,
    pub top_level: LevelKey,
    pub openings: Vec<OpeningSpec>,
    pub roof_type: CatalogTypeKey,
    pub gable: GableProfile,
}

impl EnvelopeConfig {
    /// The built-in plan: a 10000 × 5000 mm footprint, a door on the south
    /// wall and a window on each remaining wall, under the legacy gable.
    pub fn sample() -> Self {
        let window = || OpeningConfig {
            kind: OpeningKind::Window,
            type_name: "0915 x 1220mm".to_string(),
            family: "Fixed".to_string(),
            sill_mm: None,
        };
        Self {
            footprint: FootprintConfig {
                width_mm: 10000.0,
                depth_mm: 5000.0,
            },
            levels: LevelRoles {
                base: "Level 1".to_string(),
                top: "Level 2".to_string(),
            },
            openings: vec![
                OpeningConfig {
                    kind: OpeningKind::Door,
                    type_name: "0915 x 2134mm".to_string(),
                    family: "Single-Flush".to_string(),
                    sill_mm: None,
                },
                window(),
                window(),
                window(),
            ],
            roof: RoofConfig {
                type_name: "Generic - 400mm".to_string(),
                family: "Basic Roof".to_string(),
                profile: RoofProfileConfig::Fixed,
            },
        }
    }

    /// Validate the configuration against a document and resolve every
    /// display name to a key.
    pub fn resolve(&self, doc: &Document) -> Result<GenerationPlan> {
        let footprint = Footprint::new(
            convert_to_internal(self.footprint.width_mm, LengthUnit::Millimetre),
            convert_to_internal(self.footprint.depth_mm, LengthUnit::Millimetre),
        )?;

        let base_level = doc.find_level_by_name(&self.levels.base)?;
        let top_level = doc.find_level_by_name(&self.levels.top)?;

        if self.openings.len() != WALLS_PER_LOOP {
            return Err(Error::InvalidConfig(format!(
                "opening plan must cover exactly {WALLS_PER_LOOP} wall edges, got {}",
                self.openings.len()
            )));
        }
        let mut openings = Vec::with_capacity(self.openings.len());
        for (edge, opening) in self.openings.iter().enumerate() {
            let category = match opening.kind {
                OpeningKind::Door => Category::Door,
                OpeningKind::Window => Category::Window,
            };
            if opening.kind == OpeningKind::Door && opening.sill_mm.is_some() {
                return Err(Error::InvalidConfig(format!(
                    "door on edge {edge} cannot carry a sill offset"
                )));
            }
            let catalog_type =
                doc.find_catalog_type(category, &opening.type_name, &opening.family)?;
            openings.push(OpeningSpec {
                kind: opening.kind,
                catalog_type,
                sill_mm: match opening.kind {
                    OpeningKind::Window => Some(opening.sill_mm.unwrap_or(DEFAULT_SILL_MM)),
                    OpeningKind::Door => None,
                },
            });
        }

        let roof_type =
            doc.find_catalog_type(Category::Roof, &self.roof.type_name, &self.roof.family)?;
        let gable = match self.roof.profile {
            RoofProfileConfig::Fixed => GableProfile::Fixed,
            RoofProfileConfig::Footprint { rise_mm } => {
                if rise_mm <= 0.0 {
                    return Err(Error::InvalidConfig(format!(
                        "roof rise must be positive, got {rise_mm} mm"
                    )));
                }
                GableProfile::Footprint {
                    rise: convert_to_internal(rise_mm, LengthUnit::Millimetre),
                }
            }
        };

        Ok(GenerationPlan {
            footprint,
            base_level,
            top_level,
            openings,
            roof_type,
            gable,
        })
    }
}
