// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Buildgen Envelope
//!
//! Generates a rectangular single-story building envelope — four perimeter
//! walls, a door, three windows, and a gable roof — on top of a host
//! building model that supplies elevation levels and component catalogs.
//!
//! The whole run is one linear pipeline inside one transaction: footprint →
//! wall loop → openings → roof. Any failure rolls the host document back.

pub mod config;
pub mod error;
pub mod footprint;
pub mod openings;
pub mod pipeline;
pub mod roof;
pub mod walls;

pub use config::{EnvelopeConfig, GenerationPlan, RoofProfileConfig};
pub use error::{Error, Result};
pub use footprint::{ClosedLoop, Footprint};
pub use openings::{place_opening, Opening, OpeningKind, OpeningSpec, DEFAULT_SILL_MM};
pub use pipeline::{build_envelope, generate_envelope, EnvelopeSummary};
pub use roof::{build_profile, create_roof, GableProfile, RoofProfile};
pub use walls::{generate_wall_loop, WallSegment, WALLS_PER_LOOP};
