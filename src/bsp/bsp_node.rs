//! src/bsp/bsp_node.rs

use serde::{Deserialize, Serialize};

use crate::map::BrushId;
use crate::utils::BoundingBox;

/// A node of a solved BSP tree, as the upstream stages hand it over.
/// Each node has:
/// - Its bounds.
/// - Either a partition plane with two children, or leaf data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BspNode {
    pub bounds: BoundingBox,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Internal {
        plane_num: usize,
        children: Box<[BspNode; 2]>,
    },
    Leaf(LeafData),
}

/// What a leaf carries into the output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafData {
    pub cluster: i32,
    pub area: i32,

    /// Solid leaf. Nothing can be seen from inside it, so it gets no
    /// surface references.
    pub opaque: bool,

    /// Brushes touching this leaf.
    pub brushes: Vec<BrushId>,

    /// Output draw-surface numbers referenced from this leaf, in order.
    pub draw_surfaces: Vec<usize>,
}

impl BspNode {
    /// Create a leaf node.
    pub fn create_leaf(bounds: BoundingBox, leaf: LeafData) -> Self {
        BspNode {
            bounds,
            kind: NodeKind::Leaf(leaf),
        }
    }

    /// Create an internal node splitting on `plane_num`, with `front` as
    /// child 0 and `back` as child 1.
    pub fn create_node(
        plane_num: usize,
        front: BspNode,
        back: BspNode,
        bounds: BoundingBox,
    ) -> Self {
        BspNode {
            bounds,
            kind: NodeKind::Internal {
                plane_num,
                children: Box::new([front, back]),
            },
        }
    }

    /// Construct an empty, non-opaque leaf.
    pub fn empty_leaf() -> Self {
        BspNode::create_leaf(BoundingBox::new_empty(), LeafData::default())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Counts (internal nodes, leafs) in this subtree.
    pub fn count(&self) -> (usize, usize) {
        match &self.kind {
            NodeKind::Leaf(_) => (0, 1),
            NodeKind::Internal { children, .. } => {
                let (n0, l0) = children[0].count();
                let (n1, l1) = children[1].count();
                (1 + n0 + n1, l0 + l1)
            }
        }
    }
}
