// src/bsp/brushes.rs

use crate::bsp::{BspBrush, BspBrushSide, CompileContext};
use crate::error::{CompileError, Result};
use crate::map::{Brush, BrushId, ShaderCatalog, Side};

/// A contiguous run of output brushes belonging to one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrushRange {
    pub first: usize,
    pub count: usize,
}

/// Maps input brushes and sides to the output slots they were written to.
/// Leaf and fog emission read it, so they can only run after the brushes
/// they reference were emitted.
#[derive(Debug, Clone, Default)]
pub struct OutputMap {
    brushes: Vec<Option<usize>>,
    sides: Vec<Vec<Option<usize>>>,
}

impl OutputMap {
    fn slot(&mut self, id: BrushId) -> usize {
        if id.0 >= self.brushes.len() {
            self.brushes.resize(id.0 + 1, None);
            self.sides.resize(id.0 + 1, Vec::new());
        }
        id.0
    }

    pub fn record_brush(&mut self, id: BrushId, output: usize, num_sides: usize) {
        let slot = self.slot(id);
        self.brushes[slot] = Some(output);
        // Every side starts out unassigned.
        self.sides[slot] = vec![None; num_sides];
    }

    pub fn record_side(&mut self, id: BrushId, side: usize, output: usize) {
        let slot = self.slot(id);
        let sides = &mut self.sides[slot];
        if side >= sides.len() {
            sides.resize(side + 1, None);
        }
        sides[side] = Some(output);
    }

    pub fn brush(&self, id: BrushId) -> Option<usize> {
        self.brushes.get(id.0).copied().flatten()
    }

    pub fn side(&self, id: BrushId, side: usize) -> Option<usize> {
        self.sides.get(id.0)?.get(side).copied().flatten()
    }
}

impl CompileContext {
    /// Writes `list` (ids into `arena`) to the brush and brush side arrays,
    /// in order, and returns the range they occupy.
    pub fn emit_brushes(
        &mut self,
        catalog: &ShaderCatalog,
        arena: &[Brush],
        list: &[BrushId],
    ) -> Result<BrushRange> {
        let mut range = BrushRange {
            first: self.brushes.len(),
            count: 0,
        };

        for &id in list {
            let brush = arena.get(id.0).ok_or(CompileError::UnknownBrush(id))?;

            let content = catalog.info_for(&brush.content_shader);
            let shader_num = self.shaders.emit(
                catalog,
                Some(&content.shader),
                Some(content.content_flags),
                Some(content.surface_flags),
            );

            let index = self.brushes.push(BspBrush {
                first_side: self.brush_sides.len(),
                num_sides: 0,
                shader_num,
            });
            self.outputs.record_brush(id, index, brush.sides.len());
            range.count += 1;

            for (side_num, side) in brush.sides.iter().enumerate() {
                let shader_num = self.emit_side_shader(catalog, side);
                let side_index = self.brush_sides.push(BspBrushSide {
                    plane_num: side.plane_num,
                    shader_num,
                });
                self.outputs.record_side(id, side_num, side_index);
                self.brushes[index].num_sides += 1;
            }
        }

        Ok(range)
    }

    fn emit_side_shader(&mut self, catalog: &ShaderCatalog, side: &Side) -> usize {
        if let Some(name) = &side.shader {
            let info = catalog.info_for(name);
            self.shaders.emit(
                catalog,
                Some(&info.shader),
                Some(info.content_flags),
                Some(info.surface_flags),
            )
        } else if side.bevel {
            // Bevels keep their surface flags so walkable edges behave.
            self.shaders.emit(catalog, None, None, Some(side.surface_flags))
        } else {
            self.shaders.emit(catalog, None, None, None)
        }
    }
}
