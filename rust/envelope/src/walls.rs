// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall loop generation: a closed boundary to four level-bound walls.

use buildgen_model::{BuildingModel, Curve, LevelKey, WallKey};
use nalgebra::Point3;

use crate::error::Result;
use crate::footprint::ClosedLoop;

/// A rectangular envelope always has four perimeter walls.
pub const WALLS_PER_LOOP: usize = 4;

/// One straight wall edge of the generated loop.
///
/// Segment `index` connects loop point `index` to `index + 1`; index 0 is the
/// south wall, proceeding counter-clockwise.
#[derive(Debug, Clone, Copy)]
pub struct WallSegment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub index: usize,
    pub wall: WallKey,
    pub base_level: LevelKey,
    pub top_level: LevelKey,
}

/// Create one wall per loop edge, bound to the base level and constrained to
/// the top level.
///
/// The top constraint is a level-to-level reference rather than a raw height,
/// so the walls stay valid when either level's elevation changes. Walls are
/// created in loop order; callers can rely on segment 0 being the south wall.
pub fn generate_wall_loop<M: BuildingModel>(
    model: &mut M,
    boundary: &ClosedLoop,
    base_level: LevelKey,
    top_level: LevelKey,
) -> Result<Vec<WallSegment>> {
    boundary.validate()?;

    let mut segments = Vec::with_capacity(WALLS_PER_LOOP);
    for (index, edge) in boundary.edges().enumerate() {
        let wall = model.create_wall(Curve::Line(edge), base_level, false)?;
        model.set_wall_top_level(wall, top_level)?;
        tracing::debug!(index, length = edge.length(), "created perimeter wall");
        segments.push(WallSegment {
            start: edge.start,
            end: edge.end,
            index,
            wall,
            base_level,
            top_level,
        });
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::footprint::Footprint;
    use buildgen_model::Document;

    fn two_level_doc() -> Document {
        let mut doc = Document::new();
        doc.add_level("Level 1", 0.0);
        doc.add_level("Level 2", 4.0);
        doc
    }

    #[test]
    fn four_walls_in_loop_order() {
        let mut doc = two_level_doc();
        let base = doc.find_level_by_name("Level 1").unwrap();
        let top = doc.find_level_by_name("Level 2").unwrap();
        let boundary = Footprint::new(10.0, 5.0).unwrap().loop_points();

        let mut tx = doc.transaction("walls");
        let segments = generate_wall_loop(&mut tx, &boundary, base, top).unwrap();
        assert_eq!(segments.len(), WALLS_PER_LOOP);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.index, i);
            assert_eq!(segment.start, boundary.points()[i]);
            assert_eq!(segment.end, boundary.points()[i + 1]);
        }
        tx.commit();

        assert_eq!(doc.wall_count(), 4);
        for segment in &segments {
            let wall = doc.wall(segment.wall).unwrap();
            assert_eq!(wall.base_level, base);
            assert_eq!(wall.top_level, Some(top));
            assert!(!wall.structural);
        }
    }

    #[test]
    fn open_boundary_is_rejected_before_any_wall_exists() {
        let mut doc = two_level_doc();
        let base = doc.find_level_by_name("Level 1").unwrap();
        let top = doc.find_level_by_name("Level 2").unwrap();
        let open = ClosedLoop::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.25, 0.0, 0.0),
        ]);

        {
            let mut tx = doc.transaction("bad loop");
            let err = generate_wall_loop(&mut tx, &open, base, top);
            assert!(matches!(err, Err(Error::InvalidLoop(_))));
        }
        assert_eq!(doc.wall_count(), 0);
    }
}
