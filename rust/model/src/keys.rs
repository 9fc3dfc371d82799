// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based document storage.
//!
//! Every entity in a [`crate::Document`] gets a unique, type-safe key for
//! O(1) lookup. Keys are created by `slotmap::SlotMap` and remain valid even
//! after other entities are removed (generational indices).

use slotmap::new_key_type;

new_key_type! {
    /// Key for a named elevation level.
    pub struct LevelKey;

    /// Key for a reusable catalog component type.
    pub struct CatalogTypeKey;

    /// Key for a wall element.
    pub struct WallKey;

    /// Key for a placed component instance (door, window).
    pub struct InstanceKey;

    /// Key for a reference plane.
    pub struct PlaneKey;

    /// Key for an extrusion roof element.
    pub struct RoofKey;
}
