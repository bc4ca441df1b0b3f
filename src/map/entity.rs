// src/map/entity.rs

use serde::{Deserialize, Serialize};

use crate::bsp::BspNode;
use crate::map::{BrushId, PatchMesh};
use crate::utils::util::{atoi, starts_with_ignore_case};

/// A map entity: ordered key/value pairs plus the geometry it owns.
///
/// Upstream stages also hang their results on the entity: the solved tree
/// for its model and how many draw surfaces they emitted for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    /// Key/value pairs in file order.
    pub epairs: Vec<(String, String)>,

    pub brushes: Vec<BrushId>,

    pub patches: Vec<PatchMesh>,

    /// Draw surfaces already emitted for this entity's model.
    pub draw_surfaces: usize,

    /// Solved BSP tree for this entity's model.
    pub tree: Option<BspNode>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pairs(pairs: &[(&str, &str)]) -> Self {
        Entity {
            epairs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    /// Looks up a key; key comparison ignores case.
    pub fn value_for_key(&self, key: &str) -> Option<&str> {
        self.epairs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Overwrites an existing key in place, or appends a new pair.
    pub fn set_key_value(&mut self, key: &str, value: &str) {
        match self.epairs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some(pair) => pair.1 = value.to_string(),
            None => self.epairs.push((key.to_string(), value.to_string())),
        }
    }

    /// Missing keys read as 0.
    pub fn int_for_key(&self, key: &str) -> i32 {
        self.value_for_key(key).map(atoi).unwrap_or(0)
    }

    pub fn bool_for_key(&self, key: &str) -> bool {
        self.int_for_key(key) != 0
    }

    pub fn classname(&self) -> &str {
        self.value_for_key("classname").unwrap_or("")
    }

    pub fn classname_prefixed(&self, prefix: &str) -> bool {
        starts_with_ignore_case(self.classname(), prefix)
    }

    /// Owns at least one brush or patch, and so gets a model of its own.
    pub fn has_geometry(&self) -> bool {
        !self.brushes.is_empty() || !self.patches.is_empty()
    }
}
