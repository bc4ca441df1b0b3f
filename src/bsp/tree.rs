// src/bsp/tree.rs
// Flattens a solved tree into the node, leaf, leaf-brush and leaf-surface
// arrays.

use crate::bsp::{BspLeaf, BspNode, BspTreeNode, CompileContext, LeafData, NodeKind, NodeRef};
use crate::error::{CompileError, Result};
use crate::utils::BoundingBox;

impl CompileContext {
    /// Emits `node` and everything below it, depth first with child 0 fully
    /// written before child 1. A parent's slot is taken before its children.
    pub fn emit_draw_node(&mut self, node: &BspNode) -> Result<NodeRef> {
        let (plane_num, children) = match &node.kind {
            NodeKind::Leaf(leaf) => {
                return Ok(NodeRef::Leaf(self.emit_leaf(&node.bounds, leaf)?));
            }
            NodeKind::Internal { plane_num, children } => (*plane_num, children),
        };

        if plane_num & 1 != 0 {
            return Err(CompileError::OddPlaneNum { plane: plane_num });
        }

        let index = self.nodes.push(BspTreeNode {
            plane_num,
            children: [NodeRef::Leaf(0); 2],
            bounds: node.bounds,
        });

        for (i, child) in children.iter().enumerate() {
            let child_ref = self.emit_draw_node(child)?;
            // The node array may have grown under the recursion; go through
            // the index again.
            self.nodes[index].children[i] = child_ref;
        }

        Ok(NodeRef::Node(index))
    }

    /// Emits one leaf and returns its index (never 0, which is reserved).
    pub fn emit_leaf(&mut self, bounds: &BoundingBox, leaf: &LeafData) -> Result<usize> {
        if self.leafs.len() >= self.config.max_leafs {
            return Err(CompileError::LeafLimit {
                limit: self.config.max_leafs,
            });
        }

        let mut out = BspLeaf {
            cluster: leaf.cluster,
            area: leaf.area,
            bounds: *bounds,
            first_leaf_brush: self.leaf_brushes.len(),
            ..BspLeaf::default()
        };

        for &id in &leaf.brushes {
            let brush_num = self
                .outputs
                .brush(id)
                .ok_or(CompileError::UnemittedBrush(id))?;
            self.leaf_brushes.push(brush_num);
        }
        out.num_leaf_brushes = self.leaf_brushes.len() - out.first_leaf_brush;

        // Opaque leafs can't be seen into.
        if !leaf.opaque {
            out.first_leaf_surface = self.leaf_surfaces.len();
            for &surface in &leaf.draw_surfaces {
                self.leaf_surfaces.push(surface);
            }
            out.num_leaf_surfaces = self.leaf_surfaces.len() - out.first_leaf_surface;
        }

        Ok(self.leafs.push(out))
    }
}
