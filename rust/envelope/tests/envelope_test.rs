// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end generation tests: the concrete 10000 × 5000 mm scenario,
//! transaction atomicity, and run independence.

use approx::assert_relative_eq;
use buildgen_envelope::{
    build_envelope, generate_envelope, EnvelopeConfig, OpeningKind, RoofProfileConfig,
};
use buildgen_model::{
    BuildingModel, CatalogTypeKey, Category, Curve, Document, InstanceKey, LengthUnit, LevelKey,
    Line3, ParamKind, PlaneKey, Point3, RoofKey, StructuralKind, WallKey,
};

/// A project document the way a host would hand it over: two levels and the
/// catalog types the sample configuration asks for.
fn sample_project() -> Document {
    let mut doc = Document::new();
    doc.add_level("Level 1", 0.0);
    doc.add_level("Level 2", 4.0);
    doc.add_catalog_type(Category::Wall, "Generic - 200mm", "Basic Wall");
    doc.add_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush");
    doc.add_catalog_type(Category::Window, "0915 x 1220mm", "Fixed");
    doc.add_catalog_type(Category::Roof, "Generic - 400mm", "Basic Roof");
    doc
}

#[test]
fn generates_the_reference_envelope() {
    let mut doc = sample_project();
    let summary = generate_envelope(&mut doc, &EnvelopeConfig::sample()).unwrap();

    assert_eq!(doc.wall_count(), 4);
    assert_eq!(doc.instance_count(), 4);
    assert_eq!(doc.plane_count(), 1);
    assert_eq!(doc.roof_count(), 1);

    // 10000 x 5000 mm footprint in internal units: corners at (±5, ±2.5).
    let walls = &summary.walls;
    assert_eq!(walls.len(), 4);
    assert_relative_eq!(walls[0].start, Point3::new(-5.0, -2.5, 0.0));
    assert_relative_eq!(walls[0].end, Point3::new(5.0, -2.5, 0.0));
    assert_relative_eq!(walls[1].end, Point3::new(5.0, 2.5, 0.0));
    assert_relative_eq!(walls[2].end, Point3::new(-5.0, 2.5, 0.0));
    assert_relative_eq!(walls[3].end, walls[0].start);

    // Door on the south wall at its midpoint, no sill.
    let door = &summary.openings[0];
    assert_eq!(door.kind, OpeningKind::Door);
    assert_eq!(door.host, walls[0].wall);
    assert_relative_eq!(door.insertion_point, Point3::new(0.0, -2.5, 0.0));
    assert_eq!(door.sill_offset, None);

    // Windows on the remaining walls; the east one sits at (5, 0) with a
    // 1000 mm sill in internal units.
    assert_eq!(summary.openings.len(), 4);
    let east = &summary.openings[1];
    assert_eq!(east.kind, OpeningKind::Window);
    assert_relative_eq!(east.insertion_point, Point3::new(5.0, 0.0, 0.0));
    assert_eq!(east.sill_offset, Some(1.0));
    for window in &summary.openings[1..] {
        assert_eq!(window.kind, OpeningKind::Window);
        assert_eq!(window.sill_offset, Some(1.0));
        let instance = doc.instance(window.instance).unwrap();
        assert_eq!(instance.params.get(&ParamKind::SillHeight), Some(&1.0));
    }

    // Legacy gable: constants, decoupled from the footprint.
    let roof = doc.roof(summary.roof).unwrap();
    assert_eq!(roof.boundary.len(), 2);
    assert_relative_eq!(roof.boundary[0].start, Point3::new(-20.0, -10.0, 13.5));
    assert_eq!(roof.extrusion_start, -20.0);
    assert_eq!(roof.extrusion_end, 20.0);
    assert_eq!(roof.level, walls[0].top_level);
}

#[test]
fn footprint_coupled_roof_tracks_the_walls() {
    let mut doc = sample_project();
    let mut config = EnvelopeConfig::sample();
    config.roof.profile = RoofProfileConfig::Footprint { rise_mm: 2000.0 };
    let summary = generate_envelope(&mut doc, &config).unwrap();

    let roof = doc.roof(summary.roof).unwrap();
    assert_relative_eq!(roof.boundary[0].start, Point3::new(-5.0, -2.5, 4.0));
    assert_relative_eq!(roof.boundary[0].end, Point3::new(-5.0, 0.0, 6.0));
    assert_eq!(roof.extrusion_start, -5.0);
    assert_eq!(roof.extrusion_end, 5.0);
}

#[test]
fn runs_are_independent_not_idempotent() {
    let mut doc = sample_project();
    let config = EnvelopeConfig::sample();
    let first = generate_envelope(&mut doc, &config).unwrap();
    let second = generate_envelope(&mut doc, &config).unwrap();

    assert_eq!(doc.wall_count(), 8);
    assert_eq!(doc.instance_count(), 8);
    assert_eq!(doc.roof_count(), 2);
    assert_ne!(first.roof, second.roof);
    assert_ne!(first.walls[0].wall, second.walls[0].wall);
}

#[test]
fn resolution_failure_creates_nothing() {
    let mut doc = sample_project();
    let mut config = EnvelopeConfig::sample();
    config.roof.family = "Sloped Glazing".to_string();

    assert!(generate_envelope(&mut doc, &config).is_err());
    assert_eq!(doc.wall_count(), 0);
    assert_eq!(doc.instance_count(), 0);
    assert_eq!(doc.roof_count(), 0);
}

/// Delegating model that rejects roof creation, to force a late-stage
/// failure after walls and openings already exist in the transaction.
struct RoofRejectingModel<'m, M: BuildingModel>(&'m mut M);

impl<M: BuildingModel> BuildingModel for RoofRejectingModel<'_, M> {
    fn convert_to_internal(&self, value: f64, unit: LengthUnit) -> f64 {
        self.0.convert_to_internal(value, unit)
    }

    fn level_elevation(&self, level: LevelKey) -> buildgen_model::Result<f64> {
        self.0.level_elevation(level)
    }

    fn wall_curve(&self, wall: WallKey) -> buildgen_model::Result<Curve> {
        self.0.wall_curve(wall)
    }

    fn activate_type(&mut self, catalog_type: CatalogTypeKey) -> buildgen_model::Result<()> {
        self.0.activate_type(catalog_type)
    }

    fn create_wall(
        &mut self,
        curve: Curve,
        base_level: LevelKey,
        structural: bool,
    ) -> buildgen_model::Result<WallKey> {
        self.0.create_wall(curve, base_level, structural)
    }

    fn set_wall_top_level(
        &mut self,
        wall: WallKey,
        top_level: LevelKey,
    ) -> buildgen_model::Result<()> {
        self.0.set_wall_top_level(wall, top_level)
    }

    fn create_instance(
        &mut self,
        point: Point3<f64>,
        catalog_type: CatalogTypeKey,
        host_wall: WallKey,
        level: LevelKey,
        structural_kind: StructuralKind,
    ) -> buildgen_model::Result<InstanceKey> {
        self.0
            .create_instance(point, catalog_type, host_wall, level, structural_kind)
    }

    fn set_instance_param(
        &mut self,
        instance: InstanceKey,
        param: ParamKind,
        value: f64,
    ) -> buildgen_model::Result<()> {
        self.0.set_instance_param(instance, param, value)
    }

    fn create_reference_plane(
        &mut self,
        origin: Point3<f64>,
        bubble_end: Point3<f64>,
        free_end: Point3<f64>,
    ) -> buildgen_model::Result<PlaneKey> {
        self.0.create_reference_plane(origin, bubble_end, free_end)
    }

    fn create_extrusion_roof(
        &mut self,
        _boundary: Vec<Line3>,
        _plane: PlaneKey,
        _level: LevelKey,
        _roof_type: CatalogTypeKey,
        _extrusion_start: f64,
        _extrusion_end: f64,
    ) -> buildgen_model::Result<RoofKey> {
        Err(buildgen_model::Error::OperationFailed(
            "roof creation rejected by host".to_string(),
        ))
    }
}

#[test]
fn late_stage_failure_rolls_back_walls_and_openings() {
    let mut doc = sample_project();
    let config = EnvelopeConfig::sample();
    let plan = config.resolve(&doc).unwrap();

    {
        let mut tx = doc.transaction("doomed run");
        let mut model = RoofRejectingModel(&mut tx);
        let err = build_envelope(&mut model, &plan);
        assert!(err.is_err());
        // tx dropped uncommitted: full rollback.
    }

    assert_eq!(doc.wall_count(), 0);
    assert_eq!(doc.instance_count(), 0);
    assert_eq!(doc.plane_count(), 0);
    assert_eq!(doc.roof_count(), 0);
    // Types activated mid-run are rolled back too.
    let door = doc
        .find_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush")
        .unwrap();
    assert!(!doc.catalog_type(door).unwrap().active);
}
