// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Location-curve geometry for hosted elements.

use nalgebra::Point3;

/// Geometry below this size is rejected as degenerate.
const DEGENERATE_EPS: f64 = 1e-9;

/// A bound straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line3 {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Arithmetic midpoint of the two endpoints.
    pub fn midpoint(&self) -> Point3<f64> {
        Point3::from((self.start.coords + self.end.coords) / 2.0)
    }
}

/// Location curve of a host element.
///
/// Walls carry one of these; only [`Curve::Line`] walls can host openings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Curve {
    Line(Line3),
    Arc {
        center: Point3<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
}

impl Curve {
    /// Returns the underlying line for straight curves, `None` for arcs.
    pub fn as_line(&self) -> Option<&Line3> {
        match self {
            Curve::Line(line) => Some(line),
            Curve::Arc { .. } => None,
        }
    }

    /// A curve too small to bound an element.
    pub fn is_degenerate(&self) -> bool {
        match self {
            Curve::Line(line) => line.length() < DEGENERATE_EPS,
            Curve::Arc {
                radius,
                start_angle,
                end_angle,
                ..
            } => *radius < DEGENERATE_EPS || (end_angle - start_angle).abs() < DEGENERATE_EPS,
        }
    }
}
