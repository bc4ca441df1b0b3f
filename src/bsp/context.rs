// src/bsp/context.rs

use log::{debug, info};

use crate::bsp::entities::unparse_entities;
use crate::bsp::{
    BspBrush, BspBrushSide, BspFog, BspLeaf, BspModel, BspSink, BspTreeNode, GrowableStore,
    OutputMap, ShaderTable, ARRAY_CHUNK, MODEL_CHUNK, QUAD_DRAW_INDEXES,
};
use crate::config::EmitConfig;
use crate::error::Result;
use crate::map::Entity;
use crate::utils::Plane;

/// Owns every output array of one compile pass.
///
/// `begin_bsp_file` resets it, the emitters fill it, and `end_bsp_file`
/// finishes it and hands it to a [`BspSink`]. Nothing mutates it afterwards
/// until the next `begin_bsp_file`.
#[derive(Debug, Clone)]
pub struct CompileContext {
    pub config: EmitConfig,
    pub shaders: ShaderTable,
    pub planes: GrowableStore<Plane>,
    pub nodes: GrowableStore<BspTreeNode>,
    pub leafs: GrowableStore<BspLeaf>,
    pub leaf_brushes: GrowableStore<usize>,
    pub leaf_surfaces: GrowableStore<usize>,
    pub brushes: GrowableStore<BspBrush>,
    pub brush_sides: GrowableStore<BspBrushSide>,
    pub fogs: GrowableStore<BspFog>,
    pub models: GrowableStore<BspModel>,
    pub draw_indexes: GrowableStore<i32>,
    /// Draw surfaces emitted so far by the surface stage.
    pub num_draw_surfaces: usize,
    pub entity_data: String,
    pub num_stripped_lights: usize,
    /// Where each input brush and side landed in the output.
    pub outputs: OutputMap,
}

impl CompileContext {
    pub fn new(config: EmitConfig) -> Self {
        CompileContext {
            shaders: ShaderTable::new(config.apply_shader_remaps),
            config,
            planes: GrowableStore::new(ARRAY_CHUNK),
            nodes: GrowableStore::new(ARRAY_CHUNK),
            leafs: GrowableStore::new(ARRAY_CHUNK),
            leaf_brushes: GrowableStore::new(ARRAY_CHUNK),
            leaf_surfaces: GrowableStore::new(ARRAY_CHUNK),
            brushes: GrowableStore::new(ARRAY_CHUNK),
            brush_sides: GrowableStore::new(ARRAY_CHUNK),
            fogs: GrowableStore::new(ARRAY_CHUNK),
            models: GrowableStore::new(MODEL_CHUNK),
            draw_indexes: GrowableStore::new(ARRAY_CHUNK),
            num_draw_surfaces: 0,
            entity_data: String::new(),
            num_stripped_lights: 0,
            outputs: OutputMap::default(),
        }
    }

    /// Starts a new BSP file.
    ///
    /// Leaf 0 is reserved as an error slot because leafs are referenced as
    /// negative node numbers. The first six draw indexes hold the quad
    /// triangulation every later quad points back at.
    pub fn begin_bsp_file(&mut self) {
        self.shaders.clear();
        self.planes.clear();
        self.nodes.clear();
        self.leafs.clear();
        self.leaf_brushes.clear();
        self.leaf_surfaces.clear();
        self.brushes.clear();
        self.brush_sides.clear();
        self.fogs.clear();
        self.models.clear();
        self.draw_indexes.clear();
        self.num_draw_surfaces = 0;
        self.entity_data.clear();
        self.num_stripped_lights = 0;
        self.outputs = OutputMap::default();

        self.leafs.push(BspLeaf::default());

        self.draw_indexes.ensure_capacity(QUAD_DRAW_INDEXES.len());
        for index in QUAD_DRAW_INDEXES {
            self.draw_indexes.push(index);
        }
    }

    /// Copies the canonical plane list verbatim. Planes were deduplicated
    /// upstream, and every original brush is saved, so none can be dropped.
    pub fn emit_planes(&mut self, planes: &[Plane]) {
        self.planes.ensure_capacity(self.planes.len() + planes.len());
        for plane in planes {
            self.planes.push(*plane);
        }
        debug!("{:9} BSP planes", self.planes.len());
    }

    /// Records `count` draw surfaces emitted by the surface stage and
    /// returns the index of the first.
    pub fn add_draw_surfaces(&mut self, count: usize) -> usize {
        let first = self.num_draw_surfaces;
        self.num_draw_surfaces += count;
        first
    }

    /// Finishes the file: planes, entity text, then the writers when a sink
    /// is given.
    pub fn end_bsp_file(
        &mut self,
        planes: &[Plane],
        entities: &[Entity],
        sink: Option<&mut dyn BspSink>,
    ) -> Result<()> {
        info!("--- EndBSPFile ---");

        self.emit_planes(planes);
        self.entity_data = unparse_entities(entities);

        if let Some(sink) = sink {
            sink.write_surface_extras(self)?;
            sink.write_bsp(self)?;
        }
        Ok(())
    }
}
