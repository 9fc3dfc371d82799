// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped edit transactions with guaranteed commit-or-rollback.
//!
//! A [`Transaction`] borrows the document exclusively and journals every
//! applied change. [`Transaction::commit`] keeps the changes; dropping an
//! uncommitted transaction undoes the journal in reverse order, so the
//! document is never observed half-built — any early return, including error
//! propagation with `?`, rolls back.

use nalgebra::Point3;

use crate::catalog::StructuralKind;
use crate::document::Document;
use crate::elements::ParamKind;
use crate::error::Result;
use crate::geometry::{Curve, Line3};
use crate::keys::{CatalogTypeKey, InstanceKey, LevelKey, PlaneKey, RoofKey, WallKey};
use crate::units::{self, LengthUnit};

/// Host capabilities consumed by element generators.
///
/// Implemented by [`Transaction`]; generators take `&mut impl BuildingModel`
/// instead of touching a process-wide document, which keeps them testable
/// and keeps every mutation inside a transaction scope.
pub trait BuildingModel {
    /// Convert an external measurement to the internal length unit.
    fn convert_to_internal(&self, value: f64, unit: LengthUnit) -> f64;

    /// Elevation of a level, in internal units.
    fn level_elevation(&self, level: LevelKey) -> Result<f64>;

    /// Location curve of an existing wall.
    fn wall_curve(&self, wall: WallKey) -> Result<Curve>;

    /// Make a catalog type usable for placement. Idempotent.
    fn activate_type(&mut self, catalog_type: CatalogTypeKey) -> Result<()>;

    /// Create a wall along a curve on a base level.
    fn create_wall(&mut self, curve: Curve, base_level: LevelKey, structural: bool)
        -> Result<WallKey>;

    /// Constrain a wall's top to a level (level-to-level reference, not a raw
    /// height).
    fn set_wall_top_level(&mut self, wall: WallKey, top_level: LevelKey) -> Result<()>;

    /// Place a component instance hosted on a wall.
    fn create_instance(
        &mut self,
        point: Point3<f64>,
        catalog_type: CatalogTypeKey,
        host_wall: WallKey,
        level: LevelKey,
        structural_kind: StructuralKind,
    ) -> Result<InstanceKey>;

    /// Set an instance parameter, in internal units.
    fn set_instance_param(
        &mut self,
        instance: InstanceKey,
        param: ParamKind,
        value: f64,
    ) -> Result<()>;

    /// Create a reference plane from an origin and two direction points.
    fn create_reference_plane(
        &mut self,
        origin: Point3<f64>,
        bubble_end: Point3<f64>,
        free_end: Point3<f64>,
    ) -> Result<PlaneKey>;

    /// Create an extrusion roof swept between two offsets along a plane.
    fn create_extrusion_roof(
        &mut self,
        boundary: Vec<Line3>,
        plane: PlaneKey,
        level: LevelKey,
        roof_type: CatalogTypeKey,
        extrusion_start: f64,
        extrusion_end: f64,
    ) -> Result<RoofKey>;
}

/// One journaled change, undone in reverse order on rollback.
#[derive(Debug)]
enum UndoStep {
    WallCreated(WallKey),
    InstanceCreated(InstanceKey),
    PlaneCreated(PlaneKey),
    RoofCreated(RoofKey),
    TypeActivated(CatalogTypeKey),
    TopLevelSet {
        wall: WallKey,
        previous: Option<LevelKey>,
    },
    ParamSet {
        instance: InstanceKey,
        param: ParamKind,
        previous: Option<f64>,
    },
}

/// A scoped edit transaction against a [`Document`].
#[derive(Debug)]
pub struct Transaction<'d> {
    doc: &'d mut Document,
    label: String,
    journal: Vec<UndoStep>,
    committed: bool,
}

impl<'d> Transaction<'d> {
    pub(crate) fn new(doc: &'d mut Document, label: String) -> Self {
        tracing::debug!(label = %label, "transaction started");
        Self {
            doc,
            label,
            journal: Vec::new(),
            committed: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Read access to the document mid-transaction.
    pub fn document(&self) -> &Document {
        self.doc
    }

    /// Keep all journaled changes.
    pub fn commit(mut self) {
        tracing::debug!(label = %self.label, steps = self.journal.len(), "transaction committed");
        self.committed = true;
    }

    fn rollback(&mut self) {
        while let Some(step) = self.journal.pop() {
            match step {
                UndoStep::WallCreated(key) => self.doc.remove_wall(key),
                UndoStep::InstanceCreated(key) => self.doc.remove_instance(key),
                UndoStep::PlaneCreated(key) => self.doc.remove_plane(key),
                UndoStep::RoofCreated(key) => self.doc.remove_roof(key),
                UndoStep::TypeActivated(key) => {
                    if let Some(ty) = self.doc.catalog.get_mut(key) {
                        ty.active = false;
                    }
                }
                UndoStep::TopLevelSet { wall, previous } => {
                    if let Some(wall) = self.doc.walls.get_mut(wall) {
                        wall.top_level = previous;
                    }
                }
                UndoStep::ParamSet {
                    instance,
                    param,
                    previous,
                } => {
                    if let Some(instance) = self.doc.instances.get_mut(instance) {
                        match previous {
                            Some(value) => {
                                instance.params.insert(param, value);
                            }
                            None => {
                                instance.params.remove(&param);
                            }
                        }
                    }
                }
            }
        }
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            tracing::warn!(label = %self.label, steps = self.journal.len(), "transaction rolled back");
            self.rollback();
        }
    }
}

impl BuildingModel for Transaction<'_> {
    fn convert_to_internal(&self, value: f64, unit: LengthUnit) -> f64 {
        units::convert_to_internal(value, unit)
    }

    fn level_elevation(&self, level: LevelKey) -> Result<f64> {
        Ok(self.doc.level(level)?.elevation)
    }

    fn wall_curve(&self, wall: WallKey) -> Result<Curve> {
        Ok(self.doc.wall(wall)?.curve)
    }

    fn activate_type(&mut self, catalog_type: CatalogTypeKey) -> Result<()> {
        let was_active = self.doc.activate_type(catalog_type)?;
        if !was_active {
            self.journal.push(UndoStep::TypeActivated(catalog_type));
        }
        Ok(())
    }

    fn create_wall(
        &mut self,
        curve: Curve,
        base_level: LevelKey,
        structural: bool,
    ) -> Result<WallKey> {
        let key = self.doc.insert_wall(curve, base_level, structural)?;
        self.journal.push(UndoStep::WallCreated(key));
        Ok(key)
    }

    fn set_wall_top_level(&mut self, wall: WallKey, top_level: LevelKey) -> Result<()> {
        let previous = self.doc.set_wall_top_level(wall, top_level)?;
        self.journal.push(UndoStep::TopLevelSet { wall, previous });
        Ok(())
    }

    fn create_instance(
        &mut self,
        point: Point3<f64>,
        catalog_type: CatalogTypeKey,
        host_wall: WallKey,
        level: LevelKey,
        structural_kind: StructuralKind,
    ) -> Result<InstanceKey> {
        let key = self
            .doc
            .insert_instance(point, catalog_type, host_wall, level, structural_kind)?;
        self.journal.push(UndoStep::InstanceCreated(key));
        Ok(key)
    }

    fn set_instance_param(
        &mut self,
        instance: InstanceKey,
        param: ParamKind,
        value: f64,
    ) -> Result<()> {
        let previous = self.doc.set_instance_param(instance, param, value)?;
        self.journal.push(UndoStep::ParamSet {
            instance,
            param,
            previous,
        });
        Ok(())
    }

    fn create_reference_plane(
        &mut self,
        origin: Point3<f64>,
        bubble_end: Point3<f64>,
        free_end: Point3<f64>,
    ) -> Result<PlaneKey> {
        let key = self.doc.insert_plane(origin, bubble_end, free_end)?;
        self.journal.push(UndoStep::PlaneCreated(key));
        Ok(key)
    }

    fn create_extrusion_roof(
        &mut self,
        boundary: Vec<Line3>,
        plane: PlaneKey,
        level: LevelKey,
        roof_type: CatalogTypeKey,
        extrusion_start: f64,
        extrusion_end: f64,
    ) -> Result<RoofKey> {
        let key = self.doc.insert_roof(
            boundary,
            plane,
            level,
            roof_type,
            extrusion_start,
            extrusion_end,
        )?;
        self.journal.push(UndoStep::RoofCreated(key));
        Ok(key)
    }
}
