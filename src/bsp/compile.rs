// src/bsp/compile.rs

use log::{info, warn};

use crate::bsp::entities::{assign_light_styles, assign_model_numbers};
use crate::bsp::{BspNode, BspSink, CompileContext};
use crate::config::EmitConfig;
use crate::document::Document;
use crate::error::Result;
use crate::map::Entity;

/// Runs one full emission pass over `doc`.
///
/// The world (entity 0) always becomes model 0; every other entity with
/// brushes or patches becomes the next model. A document without entities
/// still gets an empty world model. Fogs are emitted once every model's
/// brushes are in place, so any brush can carry one. Model and style keys are
/// written back into `doc`'s entities before they are serialized.
pub fn compile(
    doc: &mut Document,
    config: EmitConfig,
    sink: Option<&mut dyn BspSink>,
) -> Result<CompileContext> {
    let mut ctx = CompileContext::new(config);
    ctx.begin_bsp_file();

    let num_models = assign_model_numbers(&mut doc.entities);
    info!("{:9} models", num_models);

    if doc.entities.is_empty() {
        warn!("No world entity, emitting an empty world model");
        emit_model(&mut ctx, doc, &Entity::new())?;
    }
    for (index, entity) in doc.entities.iter().enumerate() {
        if index != 0 && !entity.has_geometry() {
            continue;
        }
        emit_model(&mut ctx, doc, entity)?;
    }

    ctx.emit_fogs(&doc.shaders, &doc.fogs, &doc.brushes)?;

    let report = assign_light_styles(&mut doc.entities, &ctx.config)?;
    ctx.num_stripped_lights = report.num_stripped;
    info!("{:9} switchable light styles", report.num_styles);

    ctx.end_bsp_file(&doc.planes, &doc.entities, sink)?;

    info!("{:9} nodes", ctx.nodes.len());
    info!("{:9} leafs", ctx.leafs.len());
    info!("{:9} brushes", ctx.brushes.len());
    info!("{:9} shaders", ctx.shaders.len());
    Ok(ctx)
}

/// Brushes, surfaces and tree of one entity's model. An entity without a
/// solved tree gets a single empty leaf.
fn emit_model(ctx: &mut CompileContext, doc: &Document, entity: &Entity) -> Result<usize> {
    let pending = ctx.begin_model(entity, &doc.brushes)?;
    let range = ctx.emit_brushes(&doc.shaders, &doc.brushes, &entity.brushes)?;
    ctx.add_draw_surfaces(entity.draw_surfaces);
    match &entity.tree {
        Some(root) => ctx.end_model(pending, range, root),
        None => ctx.end_model(pending, range, &BspNode::empty_leaf()),
    }
}
