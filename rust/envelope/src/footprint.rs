// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint derivation: width/depth to a closed rectangular boundary.

use buildgen_model::Line3;
use nalgebra::Point3;

use crate::error::{Error, Result};

/// Two loop endpoints closer than this are treated as coincident.
const CLOSURE_EPS: f64 = 1e-9;

/// A rectangular building footprint centered at the origin, in internal
/// units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    width: f64,
    depth: f64,
}

impl Footprint {
    pub fn new(width: f64, depth: f64) -> Result<Self> {
        if width <= 0.0 || depth <= 0.0 {
            return Err(Error::InvalidDimension { width, depth });
        }
        Ok(Self { width, depth })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Half-extents (dx, dy) from the center to the faces.
    pub fn half_extents(&self) -> (f64, f64) {
        (self.width / 2.0, self.depth / 2.0)
    }

    /// The boundary as a closed loop at z = 0, traversed counter-clockwise
    /// starting at the (-dx, -dy) corner. The first point is repeated at the
    /// end as an explicit closure marker.
    pub fn loop_points(&self) -> ClosedLoop {
        let (dx, dy) = self.half_extents();
        ClosedLoop::new(vec![
            Point3::new(-dx, -dy, 0.0),
            Point3::new(dx, -dy, 0.0),
            Point3::new(dx, dy, 0.0),
            Point3::new(-dx, dy, 0.0),
            Point3::new(-dx, -dy, 0.0),
        ])
    }
}

/// An ordered boundary polygon whose last point repeats the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedLoop {
    points: Vec<Point3<f64>>,
}

impl ClosedLoop {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// A rectangular wall loop carries exactly 5 points and closes on itself.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() != 5 {
            return Err(Error::InvalidLoop(format!(
                "expected 5 points, got {}",
                self.points.len()
            )));
        }
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if (last - first).norm() > CLOSURE_EPS {
            return Err(Error::InvalidLoop("loop is not closed".to_string()));
        }
        Ok(())
    }

    /// Consecutive-point edges, in loop order.
    pub fn edges(&self) -> impl Iterator<Item = Line3> + '_ {
        self.points.windows(2).map(|pair| Line3::new(pair[0], pair[1]))
    }
}
