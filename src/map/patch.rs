// src/map/patch.rs

use serde::{Deserialize, Serialize};

use crate::utils::Point3D;

/// A curved-surface control mesh owned by an entity. Only its vertex
/// positions matter here: they extend the owning model's bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchMesh {
    pub width: usize,
    pub height: usize,
    pub verts: Vec<Point3D>,
}

impl PatchMesh {
    pub fn new(width: usize, height: usize, verts: Vec<Point3D>) -> Self {
        PatchMesh { width, height, verts }
    }

    /// The `width * height` grid points, ignoring any surplus.
    pub fn grid(&self) -> impl Iterator<Item = &Point3D> {
        self.verts.iter().take(self.width * self.height)
    }
}
