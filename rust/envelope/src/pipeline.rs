// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The generation pipeline: footprint → walls → openings → roof, atomically.

use buildgen_model::{BuildingModel, Document, PlaneKey, RoofKey};

use crate::config::{EnvelopeConfig, GenerationPlan};
use crate::error::Result;
use crate::openings::{place_opening, Opening};
use crate::roof::{build_profile, create_roof};
use crate::walls::{generate_wall_loop, WallSegment};

/// Label on the single transaction wrapping a generation run.
pub const TRANSACTION_LABEL: &str = "Generate building envelope";

/// Everything created by one generation run.
#[derive(Debug, Clone)]
pub struct EnvelopeSummary {
    pub walls: Vec<WallSegment>,
    pub openings: Vec<Opening>,
    pub plane: PlaneKey,
    pub roof: RoofKey,
}

/// Run one full generation pass against a document.
///
/// The configuration is resolved first, so lookup failures surface before
/// anything is created; the stages then run inside a single transaction that
/// commits on success and rolls back on any error. Runs are not idempotent:
/// each call materializes an independent set of elements.
pub fn generate_envelope(doc: &mut Document, config: &EnvelopeConfig) -> Result<EnvelopeSummary> {
    let plan = config.resolve(doc)?;
    tracing::info!(
        width = plan.footprint.width(),
        depth = plan.footprint.depth(),
        "generating building envelope"
    );

    let mut tx = doc.transaction(TRANSACTION_LABEL);
    let summary = build_envelope(&mut tx, &plan)?;
    tx.commit();

    tracing::info!(
        walls = summary.walls.len(),
        openings = summary.openings.len(),
        "building envelope committed"
    );
    Ok(summary)
}

/// Run the generation stages against an already-open model scope.
///
/// Hosts that manage their own transaction boundaries call this directly;
/// [`generate_envelope`] is the committed wrapper.
pub fn build_envelope<M: BuildingModel>(
    model: &mut M,
    plan: &GenerationPlan,
) -> Result<EnvelopeSummary> {
    let boundary = plan.footprint.loop_points();
    let walls = generate_wall_loop(model, &boundary, plan.base_level, plan.top_level)?;

    let mut openings = Vec::with_capacity(walls.len());
    for (segment, spec) in walls.iter().zip(&plan.openings) {
        openings.push(place_opening(model, spec, segment)?);
    }

    let top_elevation = model.level_elevation(plan.top_level)?;
    let profile = build_profile(plan.gable, &plan.footprint, top_elevation);
    let (plane, roof) = create_roof(model, &profile, plan.top_level, plan.roof_type)?;

    Ok(EnvelopeSummary {
        walls,
        openings,
        plane,
        roof,
    })
}
