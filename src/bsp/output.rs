// src/bsp/output.rs
// Records of the flat output arrays. Indices between them are plain usize;
// the writer converts to the file's signed 32-bit fields.

use crate::utils::BoundingBox;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BspShader {
    pub shader: String,
    pub surface_flags: i32,
    pub content_flags: i32,
}

/// Child link of an output node.
///
/// Kept as a tagged value while the tree is being flattened; only the writer
/// turns it into the engine's signed form, where `n >= 0` is node `n` and
/// `-(leaf + 1)` is leaf `leaf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Node(usize),
    Leaf(usize),
}

impl NodeRef {
    pub fn to_signed(self) -> i32 {
        match self {
            NodeRef::Node(index) => index as i32,
            NodeRef::Leaf(index) => -(index as i32) - 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BspTreeNode {
    pub plane_num: usize,
    pub children: [NodeRef; 2],
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BspLeaf {
    pub cluster: i32,
    pub area: i32,
    pub bounds: BoundingBox,
    pub first_leaf_surface: usize,
    pub num_leaf_surfaces: usize,
    pub first_leaf_brush: usize,
    pub num_leaf_brushes: usize,
}

impl Default for BspLeaf {
    // Zeroed, like the reserved slot 0.
    fn default() -> Self {
        let zero = crate::utils::Point3D::default();
        BspLeaf {
            cluster: 0,
            area: 0,
            bounds: BoundingBox::new(zero, zero),
            first_leaf_surface: 0,
            num_leaf_surfaces: 0,
            first_leaf_brush: 0,
            num_leaf_brushes: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BspBrush {
    pub first_side: usize,
    pub num_sides: usize,
    pub shader_num: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BspBrushSide {
    pub plane_num: usize,
    pub shader_num: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BspFog {
    pub shader: String,
    /// `None` for global fog.
    pub brush_num: Option<usize>,
    /// `None` for global fog, or when no side of the brush is visible.
    pub visible_side: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BspModel {
    pub bounds: BoundingBox,
    pub first_surface: usize,
    pub num_surfaces: usize,
    pub first_brush: usize,
    pub num_brushes: usize,
}
