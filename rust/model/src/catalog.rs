// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reusable component catalog.
//!
//! A catalog type is a named component definition (wall type, door/window
//! type, roof type) resolved by its display text: category + type name +
//! family name. Types start out inactive and must be activated before the
//! first instance is placed.

use serde::{Deserialize, Serialize};

/// Catalog category a component type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Wall,
    Door,
    Window,
    Roof,
}

impl Category {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Wall => "Wall",
            Category::Door => "Door",
            Category::Window => "Window",
            Category::Roof => "Roof",
        }
    }

    /// Whether instances of this category are hosted on a wall.
    pub fn is_wall_hosted(&self) -> bool {
        matches!(self, Category::Door | Category::Window)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable, named component definition from the document's library.
#[derive(Debug, Clone)]
pub struct CatalogType {
    pub category: Category,
    /// Display name of the size variant, e.g. "0915 x 2134mm".
    pub type_name: String,
    /// Display name of the owning family, e.g. "Single-Flush".
    pub family_name: String,
    /// Inactive types cannot host instances yet.
    pub active: bool,
}

impl CatalogType {
    pub fn new(
        category: Category,
        type_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        Self {
            category,
            type_name: type_name.into(),
            family_name: family_name.into(),
            active: false,
        }
    }
}

/// Structural role of a placed component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralKind {
    NonStructural,
    Structural,
}
