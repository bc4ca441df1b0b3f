// src/bsp/model.rs

use log::debug;

use crate::bsp::{BrushRange, BspModel, BspNode, CompileContext};
use crate::error::{CompileError, Result};
use crate::map::{Brush, Entity};
use crate::utils::BoundingBox;

/// A model between `begin_model` and `end_model`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingModel {
    pub bounds: BoundingBox,
    pub first_surface: usize,
    pub first_brush: usize,
}

/// Bounds of everything `entity` owns: real brushes and patch control
/// points. When any brush is flagged as a light grid volume, the union of
/// those brushes is returned instead.
pub fn model_bounds(entity: &Entity, arena: &[Brush]) -> Result<BoundingBox> {
    let mut bounds = BoundingBox::new_empty();
    let mut lightgrid = BoundingBox::new_empty();

    for &id in &entity.brushes {
        let brush = arena.get(id.0).ok_or(CompileError::UnknownBrush(id))?;
        // Skip origin brushes and the like.
        if !brush.is_real() {
            continue;
        }
        bounds.combine(&brush.bounds);
        if brush.lightgrid {
            lightgrid.combine(&brush.bounds);
        }
    }

    for patch in &entity.patches {
        for point in patch.grid() {
            bounds.expand_point(*point);
        }
    }

    debug!(
        "BSP bounds: {{ {} {} {} }} {{ {} {} {} }}",
        bounds.mins.x, bounds.mins.y, bounds.mins.z, bounds.maxs.x, bounds.maxs.y, bounds.maxs.z
    );
    if lightgrid.is_valid() {
        debug!(
            "Lightgrid bounds: {{ {} {} {} }} {{ {} {} {} }}",
            lightgrid.mins.x,
            lightgrid.mins.y,
            lightgrid.mins.z,
            lightgrid.maxs.x,
            lightgrid.maxs.y,
            lightgrid.maxs.z
        );
        return Ok(lightgrid);
    }
    Ok(bounds)
}

impl CompileContext {
    /// Sets up a new model for `entity`, bracketing the surfaces and brushes
    /// emitted from here on.
    pub fn begin_model(&mut self, entity: &Entity, arena: &[Brush]) -> Result<PendingModel> {
        self.models.ensure_capacity(self.models.len() + 1);
        Ok(PendingModel {
            bounds: model_bounds(entity, arena)?,
            first_surface: self.num_draw_surfaces,
            first_brush: self.brushes.len(),
        })
    }

    /// Flattens the model's tree and appends the finished model. Returns the
    /// model's index.
    pub fn end_model(
        &mut self,
        model: PendingModel,
        brushes: BrushRange,
        root: &BspNode,
    ) -> Result<usize> {
        debug!("--- EndModel ---");

        self.emit_draw_node(root)?;

        Ok(self.models.push(BspModel {
            bounds: model.bounds,
            first_surface: model.first_surface,
            num_surfaces: self.num_draw_surfaces - model.first_surface,
            first_brush: brushes.first,
            num_brushes: brushes.count,
        }))
    }
}
