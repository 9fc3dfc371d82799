// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length unit conversion.
//!
//! The document's internal length unit is the base metre. All external
//! measurements (millimetre-denominated catalog dimensions, sill heights,
//! footprint sizes) must be converted before use.

/// External length units accepted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Millimetre,
    Centimetre,
    Metre,
}

impl LengthUnit {
    /// SI multiplier to the internal base metre.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        match self {
            LengthUnit::Millimetre => 1e-3,
            LengthUnit::Centimetre => 1e-2,
            LengthUnit::Metre => 1.0,
        }
    }

    /// Returns the unit name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Millimetre => "mm",
            LengthUnit::Centimetre => "cm",
            LengthUnit::Metre => "m",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convert an external measurement to the internal length unit.
#[inline]
pub fn convert_to_internal(value: f64, unit: LengthUnit) -> f64 {
    value * unit.multiplier()
}
