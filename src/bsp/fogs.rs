// src/bsp/fogs.rs

use log::{debug, warn};

use crate::bsp::{BspFog, CompileContext};
use crate::error::{CompileError, Result};
use crate::map::{Brush, LogicalFog, ShaderCatalog};

/// Only the six axial sides of a fog brush are candidates.
const FOG_SIDE_CANDIDATES: usize = 6;

impl CompileContext {
    /// Turns map fogs into output fogs. Brush fogs must have had their brush
    /// emitted already.
    pub fn emit_fogs(
        &mut self,
        catalog: &ShaderCatalog,
        fogs: &[LogicalFog],
        arena: &[Brush],
    ) -> Result<()> {
        self.fogs.clear();
        self.fogs.ensure_capacity(fogs.len());

        for (i, fog) in fogs.iter().enumerate() {
            let shader = catalog.info_for(&fog.shader).shader;

            // Global fog has no brush.
            let Some(id) = fog.brush else {
                self.fogs.push(BspFog {
                    shader,
                    brush_num: None,
                    visible_side: None,
                });
                continue;
            };

            let brush_num = self
                .outputs
                .brush(id)
                .ok_or(CompileError::UnemittedBrush(id))?;

            let visible_side = match fog.visible_side {
                Some(forced) => Some(forced),
                None => {
                    let brush = arena.get(id.0).ok_or(CompileError::UnknownBrush(id))?;
                    let side = find_visible_side(brush);
                    match side {
                        Some(side) => debug!("Fog {} has visible side {}", i, side),
                        None => warn!("Fog {} ({}) has no visible side", i, shader),
                    }
                    side
                }
            };

            self.fogs.push(BspFog {
                shader,
                brush_num: Some(brush_num),
                visible_side,
            });
        }
        Ok(())
    }
}

fn find_visible_side(brush: &Brush) -> Option<usize> {
    brush
        .sides
        .iter()
        .take(FOG_SIDE_CANDIDATES)
        .position(|side| !side.visible_hull.is_empty())
}
