// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The building document: the single shared mutable model.
//!
//! A [`Document`] owns levels, the component catalog, and every materialized
//! element in slot maps with stable generational keys. Read-only queries are
//! available directly; all edits go through a [`crate::Transaction`] so that
//! a failed edit sequence never leaves the document half-built.

use slotmap::SlotMap;

use crate::catalog::{CatalogType, Category, StructuralKind};
use crate::elements::{ExtrusionRoof, Instance, Level, ParamKind, ReferencePlane, Wall};
use crate::error::{Error, Result};
use crate::geometry::{Curve, Line3};
use crate::keys::{CatalogTypeKey, InstanceKey, LevelKey, PlaneKey, RoofKey, WallKey};
use crate::transaction::Transaction;
use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// An in-memory building document.
#[derive(Debug, Default)]
pub struct Document {
    pub(crate) levels: SlotMap<LevelKey, Level>,
    pub(crate) catalog: SlotMap<CatalogTypeKey, CatalogType>,
    pub(crate) walls: SlotMap<WallKey, Wall>,
    pub(crate) instances: SlotMap<InstanceKey, Instance>,
    pub(crate) planes: SlotMap<PlaneKey, ReferencePlane>,
    pub(crate) roofs: SlotMap<RoofKey, ExtrusionRoof>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scoped edit transaction. Changes are kept only if the returned
    /// guard is committed; dropping it rolls everything back.
    pub fn transaction(&mut self, label: impl Into<String>) -> Transaction<'_> {
        Transaction::new(self, label.into())
    }

    // --- document content (levels and catalog are part of the pre-existing model) ---

    pub fn add_level(&mut self, name: impl Into<String>, elevation: f64) -> LevelKey {
        self.levels.insert(Level {
            name: name.into(),
            elevation,
        })
    }

    pub fn add_catalog_type(
        &mut self,
        category: Category,
        type_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> CatalogTypeKey {
        self.catalog
            .insert(CatalogType::new(category, type_name, family_name))
    }

    // --- lookups by display name ---

    /// Resolve a level by its display name.
    pub fn find_level_by_name(&self, name: &str) -> Result<LevelKey> {
        self.levels
            .iter()
            .find(|(_, level)| level.name == name)
            .map(|(key, _)| key)
            .ok_or_else(|| Error::LevelNotFound(name.to_string()))
    }

    /// Resolve a catalog type by category, type name and family name.
    pub fn find_catalog_type(
        &self,
        category: Category,
        type_name: &str,
        family_name: &str,
    ) -> Result<CatalogTypeKey> {
        self.catalog
            .iter()
            .find(|(_, ty)| {
                ty.category == category
                    && ty.type_name == type_name
                    && ty.family_name == family_name
            })
            .map(|(key, _)| key)
            .ok_or_else(|| Error::CatalogTypeNotFound {
                category,
                type_name: type_name.to_string(),
                family_name: family_name.to_string(),
            })
    }

    // --- accessors ---

    pub fn level(&self, key: LevelKey) -> Result<&Level> {
        self.levels.get(key).ok_or(Error::UnknownLevel(key))
    }

    pub fn catalog_type(&self, key: CatalogTypeKey) -> Result<&CatalogType> {
        self.catalog.get(key).ok_or(Error::UnknownCatalogType(key))
    }

    pub fn wall(&self, key: WallKey) -> Result<&Wall> {
        self.walls.get(key).ok_or(Error::UnknownWall(key))
    }

    pub fn instance(&self, key: InstanceKey) -> Result<&Instance> {
        self.instances.get(key).ok_or(Error::UnknownInstance(key))
    }

    pub fn plane(&self, key: PlaneKey) -> Result<&ReferencePlane> {
        self.planes.get(key).ok_or(Error::UnknownPlane(key))
    }

    pub fn roof(&self, key: RoofKey) -> Result<&ExtrusionRoof> {
        self.roofs.get(key).ok_or(Error::UnknownRoof(key))
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn roof_count(&self) -> usize {
        self.roofs.len()
    }

    pub fn levels(&self) -> impl Iterator<Item = (LevelKey, &Level)> {
        self.levels.iter()
    }

    pub fn catalog_types(&self) -> impl Iterator<Item = (CatalogTypeKey, &CatalogType)> {
        self.catalog.iter()
    }

    pub fn walls(&self) -> impl Iterator<Item = (WallKey, &Wall)> {
        self.walls.iter()
    }

    pub fn instances(&self) -> impl Iterator<Item = (InstanceKey, &Instance)> {
        self.instances.iter()
    }

    pub fn planes(&self) -> impl Iterator<Item = (PlaneKey, &ReferencePlane)> {
        self.planes.iter()
    }

    pub fn roofs(&self) -> impl Iterator<Item = (RoofKey, &ExtrusionRoof)> {
        self.roofs.iter()
    }

    // --- raw edit operations, reachable only through Transaction and snapshot restore ---

    pub(crate) fn insert_wall(
        &mut self,
        curve: Curve,
        base_level: LevelKey,
        structural: bool,
    ) -> Result<WallKey> {
        self.level(base_level)?;
        if curve.is_degenerate() {
            return Err(Error::OperationFailed(
                "wall location curve is degenerate".to_string(),
            ));
        }
        Ok(self.walls.insert(Wall {
            curve,
            base_level,
            top_level: None,
            structural,
        }))
    }

    pub(crate) fn set_wall_top_level(
        &mut self,
        wall: WallKey,
        top_level: LevelKey,
    ) -> Result<Option<LevelKey>> {
        self.level(top_level)?;
        let wall = self.walls.get_mut(wall).ok_or(Error::UnknownWall(wall))?;
        Ok(wall.top_level.replace(top_level))
    }

    pub(crate) fn insert_instance(
        &mut self,
        point: Point3<f64>,
        catalog_type: CatalogTypeKey,
        host_wall: WallKey,
        level: LevelKey,
        structural_kind: StructuralKind,
    ) -> Result<InstanceKey> {
        self.level(level)?;
        self.wall(host_wall)?;
        let ty = self.catalog_type(catalog_type)?;
        if !ty.category.is_wall_hosted() {
            return Err(Error::OperationFailed(format!(
                "{} types cannot be hosted on a wall",
                ty.category
            )));
        }
        if !ty.active {
            return Err(Error::OperationFailed(format!(
                "catalog type \"{}\" must be activated before placement",
                ty.type_name
            )));
        }
        Ok(self.instances.insert(Instance {
            point,
            catalog_type,
            host_wall,
            level,
            structural_kind,
            params: FxHashMap::default(),
        }))
    }

    pub(crate) fn set_instance_param(
        &mut self,
        instance: InstanceKey,
        param: ParamKind,
        value: f64,
    ) -> Result<Option<f64>> {
        let instance = self
            .instances
            .get_mut(instance)
            .ok_or(Error::UnknownInstance(instance))?;
        Ok(instance.params.insert(param, value))
    }

    /// Flips a catalog type to active. Returns the previous flag.
    pub(crate) fn activate_type(&mut self, key: CatalogTypeKey) -> Result<bool> {
        let ty = self
            .catalog
            .get_mut(key)
            .ok_or(Error::UnknownCatalogType(key))?;
        let was_active = ty.active;
        ty.active = true;
        Ok(was_active)
    }

    pub(crate) fn insert_plane(
        &mut self,
        origin: Point3<f64>,
        bubble_end: Point3<f64>,
        free_end: Point3<f64>,
    ) -> Result<PlaneKey> {
        if (bubble_end - origin).norm() == 0.0 || (free_end - origin).norm() == 0.0 {
            return Err(Error::OperationFailed(
                "reference plane direction points coincide with the origin".to_string(),
            ));
        }
        Ok(self.planes.insert(ReferencePlane {
            origin,
            bubble_end,
            free_end,
        }))
    }

    pub(crate) fn insert_roof(
        &mut self,
        boundary: Vec<Line3>,
        plane: PlaneKey,
        level: LevelKey,
        roof_type: CatalogTypeKey,
        extrusion_start: f64,
        extrusion_end: f64,
    ) -> Result<RoofKey> {
        self.plane(plane)?;
        self.level(level)?;
        let ty = self.catalog_type(roof_type)?;
        if ty.category != Category::Roof {
            return Err(Error::OperationFailed(format!(
                "expected a roof catalog type, got {}",
                ty.category
            )));
        }
        if boundary.is_empty() {
            return Err(Error::OperationFailed("roof boundary is empty".to_string()));
        }
        if extrusion_start >= extrusion_end {
            return Err(Error::OperationFailed(format!(
                "empty extrusion range: {extrusion_start}..{extrusion_end}"
            )));
        }
        Ok(self.roofs.insert(ExtrusionRoof {
            boundary,
            plane,
            level,
            roof_type,
            extrusion_start,
            extrusion_end,
        }))
    }

    pub(crate) fn remove_wall(&mut self, key: WallKey) {
        self.walls.remove(key);
    }

    pub(crate) fn remove_instance(&mut self, key: InstanceKey) {
        self.instances.remove(key);
    }

    pub(crate) fn remove_plane(&mut self, key: PlaneKey) {
        self.planes.remove(key);
    }

    pub(crate) fn remove_roof(&mut self, key: RoofKey) {
        self.roofs.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn seeded() -> Document {
        let mut doc = Document::new();
        doc.add_level("Level 1", 0.0);
        doc.add_level("Level 2", 4.0);
        doc.add_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush");
        doc.add_catalog_type(Category::Window, "0915 x 1220mm", "Fixed");
        doc.add_catalog_type(Category::Roof, "Generic - 400mm", "Basic Roof");
        doc
    }

    #[test]
    fn find_level_by_name() {
        let doc = seeded();
        let key = doc.find_level_by_name("Level 2").unwrap();
        assert_eq!(doc.level(key).unwrap().elevation, 4.0);
    }

    #[test]
    fn missing_level_is_an_error() {
        let doc = seeded();
        assert!(matches!(
            doc.find_level_by_name("Level 99"),
            Err(Error::LevelNotFound(name)) if name == "Level 99"
        ));
    }

    #[test]
    fn find_catalog_type_matches_all_three_names() {
        let doc = seeded();
        assert!(doc
            .find_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush")
            .is_ok());
        // Same display text under the wrong category must not resolve.
        assert!(matches!(
            doc.find_catalog_type(Category::Window, "0915 x 2134mm", "Single-Flush"),
            Err(Error::CatalogTypeNotFound { .. })
        ));
        assert!(matches!(
            doc.find_catalog_type(Category::Door, "0915 x 2134mm", "Double-Flush"),
            Err(Error::CatalogTypeNotFound { .. })
        ));
    }

    #[test]
    fn degenerate_wall_curve_is_rejected() {
        let mut doc = seeded();
        let base = doc.find_level_by_name("Level 1").unwrap();
        let p = Point3::new(1.0, 1.0, 0.0);
        let err = doc.insert_wall(Curve::Line(Line3::new(p, p)), base, false);
        assert!(matches!(err, Err(Error::OperationFailed(_))));
        assert_eq!(doc.wall_count(), 0);
    }

    #[test]
    fn inactive_type_cannot_host_instances() {
        let mut doc = seeded();
        let base = doc.find_level_by_name("Level 1").unwrap();
        let door = doc
            .find_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush")
            .unwrap();
        let wall = doc
            .insert_wall(
                Curve::Line(Line3::new(
                    Point3::origin(),
                    Point3::new(10.0, 0.0, 0.0),
                )),
                base,
                false,
            )
            .unwrap();
        let err = doc.insert_instance(
            Point3::new(5.0, 0.0, 0.0),
            door,
            wall,
            base,
            StructuralKind::NonStructural,
        );
        assert!(matches!(err, Err(Error::OperationFailed(_))));

        doc.activate_type(door).unwrap();
        assert!(doc
            .insert_instance(
                Point3::new(5.0, 0.0, 0.0),
                door,
                wall,
                base,
                StructuralKind::NonStructural,
            )
            .is_ok());
    }

    #[test]
    fn roof_requires_roof_category_and_real_range() {
        let mut doc = seeded();
        let top = doc.find_level_by_name("Level 2").unwrap();
        let roof_type = doc
            .find_catalog_type(Category::Roof, "Generic - 400mm", "Basic Roof")
            .unwrap();
        let door = doc
            .find_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush")
            .unwrap();
        let plane = doc
            .insert_plane(
                Point3::origin(),
                Point3::new(0.0, 0.0, 20.0),
                Point3::new(0.0, 20.0, 0.0),
            )
            .unwrap();
        let boundary = vec![Line3::new(
            Point3::new(-20.0, -10.0, 13.5),
            Point3::new(-20.0, 0.0, 20.0),
        )];

        assert!(matches!(
            doc.insert_roof(boundary.clone(), plane, top, door, -20.0, 20.0),
            Err(Error::OperationFailed(_))
        ));
        assert!(matches!(
            doc.insert_roof(boundary.clone(), plane, top, roof_type, 20.0, 20.0),
            Err(Error::OperationFailed(_))
        ));
        assert!(doc
            .insert_roof(boundary, plane, top, roof_type, -20.0, 20.0)
            .is_ok());
    }
}
