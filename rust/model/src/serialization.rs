// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of a document.
//!
//! A snapshot is a portable, index-based image of the document: levels and
//! catalog types carry their display data, elements reference them by array
//! index. Snapshots are how a pre-existing project (levels + catalog) enters
//! the process and how a generated model leaves it.

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, StructuralKind};
use crate::document::Document;
use crate::elements::ParamKind;
use crate::error::{Error, Result};
use crate::geometry::{Curve, Line3};

/// Serializable image of a full document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub levels: Vec<LevelSnapshot>,
    pub catalog: Vec<CatalogTypeSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<WallSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instances: Vec<InstanceSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub planes: Vec<PlaneSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roofs: Vec<RoofSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub name: String,
    /// Elevation in internal units.
    pub elevation: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTypeSnapshot {
    pub category: Category,
    pub type_name: String,
    pub family_name: String,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CurveSnapshot {
    Line {
        start: [f64; 3],
        end: [f64; 3],
    },
    Arc {
        center: [f64; 3],
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSnapshot {
    pub curve: CurveSnapshot,
    pub base_level: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_level: Option<usize>,
    #[serde(default)]
    pub structural: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSnapshot {
    pub kind: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub point: [f64; 3],
    pub catalog_type: usize,
    pub host_wall: usize,
    pub level: usize,
    pub structural_kind: StructuralKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneSnapshot {
    pub origin: [f64; 3],
    pub bubble_end: [f64; 3],
    pub free_end: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSnapshot {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofSnapshot {
    pub boundary: Vec<LineSnapshot>,
    pub plane: usize,
    pub level: usize,
    pub roof_type: usize,
    pub extrusion_start: f64,
    pub extrusion_end: f64,
}

fn pt(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn point(c: [f64; 3]) -> Point3<f64> {
    Point3::new(c[0], c[1], c[2])
}

fn index_of<K: slotmap::Key>(map: &FxHashMap<K, usize>, key: K, what: &str) -> Result<usize> {
    map.get(&key)
        .copied()
        .ok_or_else(|| Error::Snapshot(format!("dangling {what} reference")))
}

fn resolve<K: Copy>(keys: &[K], index: usize, what: &str) -> Result<K> {
    keys.get(index)
        .copied()
        .ok_or_else(|| Error::Snapshot(format!("{what} index {index} out of range")))
}

impl DocumentSnapshot {
    /// Capture the full state of a document.
    pub fn capture(doc: &Document) -> Result<Self> {
        let mut level_index = FxHashMap::default();
        let levels = doc
            .levels()
            .enumerate()
            .map(|(i, (key, level))| {
                level_index.insert(key, i);
                LevelSnapshot {
                    name: level.name.clone(),
                    elevation: level.elevation,
                }
            })
            .collect();

        let mut type_index = FxHashMap::default();
        let catalog = doc
            .catalog_types()
            .enumerate()
            .map(|(i, (key, ty))| {
                type_index.insert(key, i);
                CatalogTypeSnapshot {
                    category: ty.category,
                    type_name: ty.type_name.clone(),
                    family_name: ty.family_name.clone(),
                    active: ty.active,
                }
            })
            .collect();

        let mut wall_index = FxHashMap::default();
        let mut walls = Vec::with_capacity(doc.wall_count());
        for (i, (key, wall)) in doc.walls().enumerate() {
            wall_index.insert(key, i);
            walls.push(WallSnapshot {
                curve: match wall.curve {
                    Curve::Line(line) => CurveSnapshot::Line {
                        start: pt(&line.start),
                        end: pt(&line.end),
                    },
                    Curve::Arc {
                        center,
                        radius,
                        start_angle,
                        end_angle,
                    } => CurveSnapshot::Arc {
                        center: pt(&center),
                        radius,
                        start_angle,
                        end_angle,
                    },
                },
                base_level: index_of(&level_index, wall.base_level, "level")?,
                top_level: wall
                    .top_level
                    .map(|key| index_of(&level_index, key, "level"))
                    .transpose()?,
                structural: wall.structural,
            });
        }

        let mut instances = Vec::with_capacity(doc.instance_count());
        for (_, instance) in doc.instances() {
            let mut params: Vec<ParamSnapshot> = instance
                .params
                .iter()
                .map(|(kind, value)| ParamSnapshot {
                    kind: kind.as_str().to_string(),
                    value: *value,
                })
                .collect();
            params.sort_by(|a, b| a.kind.cmp(&b.kind));
            instances.push(InstanceSnapshot {
                point: pt(&instance.point),
                catalog_type: index_of(&type_index, instance.catalog_type, "catalog type")?,
                host_wall: index_of(&wall_index, instance.host_wall, "wall")?,
                level: index_of(&level_index, instance.level, "level")?,
                structural_kind: instance.structural_kind,
                params,
            });
        }

        let mut plane_index = FxHashMap::default();
        let mut planes = Vec::with_capacity(doc.plane_count());
        for (i, (key, plane)) in doc.planes().enumerate() {
            plane_index.insert(key, i);
            planes.push(PlaneSnapshot {
                origin: pt(&plane.origin),
                bubble_end: pt(&plane.bubble_end),
                free_end: pt(&plane.free_end),
            });
        }

        let mut roofs = Vec::with_capacity(doc.roof_count());
        for (_, roof) in doc.roofs() {
            roofs.push(RoofSnapshot {
                boundary: roof
                    .boundary
                    .iter()
                    .map(|line| LineSnapshot {
                        start: pt(&line.start),
                        end: pt(&line.end),
                    })
                    .collect(),
                plane: index_of(&plane_index, roof.plane, "reference plane")?,
                level: index_of(&level_index, roof.level, "level")?,
                roof_type: index_of(&type_index, roof.roof_type, "catalog type")?,
                extrusion_start: roof.extrusion_start,
                extrusion_end: roof.extrusion_end,
            });
        }

        Ok(Self {
            levels,
            catalog,
            walls,
            instances,
            planes,
            roofs,
        })
    }

    /// Rebuild a document from this snapshot.
    ///
    /// All creation goes through the document's validating operations, so a
    /// malformed snapshot (dangling indices, degenerate geometry) is rejected
    /// rather than materialized.
    pub fn restore(&self) -> Result<Document> {
        let mut doc = Document::new();

        let level_keys: Vec<_> = self
            .levels
            .iter()
            .map(|level| doc.add_level(level.name.clone(), level.elevation))
            .collect();

        let mut type_keys = Vec::with_capacity(self.catalog.len());
        for ty in &self.catalog {
            let key = doc.add_catalog_type(ty.category, &*ty.type_name, &*ty.family_name);
            if ty.active {
                doc.activate_type(key)?;
            }
            type_keys.push(key);
        }

        let mut wall_keys = Vec::with_capacity(self.walls.len());
        for wall in &self.walls {
            let curve = match &wall.curve {
                CurveSnapshot::Line { start, end } => {
                    Curve::Line(Line3::new(point(*start), point(*end)))
                }
                CurveSnapshot::Arc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                } => Curve::Arc {
                    center: point(*center),
                    radius: *radius,
                    start_angle: *start_angle,
                    end_angle: *end_angle,
                },
            };
            let base = resolve(&level_keys, wall.base_level, "level")?;
            let key = doc.insert_wall(curve, base, wall.structural)?;
            if let Some(top) = wall.top_level {
                doc.set_wall_top_level(key, resolve(&level_keys, top, "level")?)?;
            }
            wall_keys.push(key);
        }

        for instance in &self.instances {
            let key = doc.insert_instance(
                point(instance.point),
                resolve(&type_keys, instance.catalog_type, "catalog type")?,
                resolve(&wall_keys, instance.host_wall, "wall")?,
                resolve(&level_keys, instance.level, "level")?,
                instance.structural_kind,
            )?;
            for param in &instance.params {
                let kind = ParamKind::from_name(&param.kind)
                    .ok_or_else(|| Error::Snapshot(format!("unknown parameter \"{}\"", param.kind)))?;
                doc.set_instance_param(key, kind, param.value)?;
            }
        }

        let mut plane_keys = Vec::with_capacity(self.planes.len());
        for plane in &self.planes {
            plane_keys.push(doc.insert_plane(
                point(plane.origin),
                point(plane.bubble_end),
                point(plane.free_end),
            )?);
        }

        for roof in &self.roofs {
            doc.insert_roof(
                roof.boundary
                    .iter()
                    .map(|line| Line3::new(point(line.start), point(line.end)))
                    .collect(),
                resolve(&plane_keys, roof.plane, "reference plane")?,
                resolve(&level_keys, roof.level, "level")?,
                resolve(&type_keys, roof.roof_type, "catalog type")?,
                roof.extrusion_start,
                roof.extrusion_end,
            )?;
        }

        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Snapshot(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Snapshot(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::transaction::BuildingModel;

    fn sample() -> Document {
        let mut doc = Document::new();
        let base = doc.add_level("Level 1", 0.0);
        let top = doc.add_level("Level 2", 4.0);
        let door = doc.add_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush");

        let mut tx = doc.transaction("seed");
        let wall = tx
            .create_wall(
                Curve::Line(Line3::new(
                    Point3::new(-5.0, -2.5, 0.0),
                    Point3::new(5.0, -2.5, 0.0),
                )),
                base,
                false,
            )
            .unwrap();
        tx.set_wall_top_level(wall, top).unwrap();
        tx.activate_type(door).unwrap();
        let instance = tx
            .create_instance(
                Point3::new(0.0, -2.5, 0.0),
                door,
                wall,
                base,
                StructuralKind::NonStructural,
            )
            .unwrap();
        tx.set_instance_param(instance, ParamKind::SillHeight, 1.0)
            .unwrap();
        tx.commit();
        doc
    }

    #[test]
    fn snapshot_round_trip() {
        let doc = sample();
        let json = DocumentSnapshot::capture(&doc).unwrap().to_json().unwrap();
        let restored = DocumentSnapshot::from_json(&json).unwrap().restore().unwrap();

        assert_eq!(restored.level_count(), 2);
        assert_eq!(restored.wall_count(), 1);
        assert_eq!(restored.instance_count(), 1);

        let (_, wall) = restored.walls().next().unwrap();
        assert!(wall.top_level.is_some());
        let (_, instance) = restored.instances().next().unwrap();
        assert_eq!(instance.params.get(&ParamKind::SillHeight), Some(&1.0));
        assert!(restored
            .find_catalog_type(Category::Door, "0915 x 2134mm", "Single-Flush")
            .map(|key| restored.catalog_type(key).unwrap().active)
            .unwrap());
    }

    #[test]
    fn dangling_index_is_rejected() {
        let snapshot = DocumentSnapshot {
            levels: vec![],
            catalog: vec![],
            walls: vec![WallSnapshot {
                curve: CurveSnapshot::Line {
                    start: [0.0, 0.0, 0.0],
                    end: [1.0, 0.0, 0.0],
                },
                base_level: 0,
                top_level: None,
                structural: false,
            }],
            instances: vec![],
            planes: vec![],
            roofs: vec![],
        };
        assert!(matches!(snapshot.restore(), Err(Error::Snapshot(_))));
    }

    #[test]
    fn empty_document_captures_cleanly() {
        let doc = Document::new();
        let snapshot = DocumentSnapshot::capture(&doc).unwrap();
        assert!(snapshot.levels.is_empty());
        assert!(snapshot.walls.is_empty());
    }
}
