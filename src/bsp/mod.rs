// src/bsp/mod.rs
pub mod brushes;
pub mod bsp_node;
pub mod compile;
pub mod context;
pub mod entities;
pub mod fogs;
pub mod model;
pub mod output;
pub mod shader_table;
pub mod store;
pub mod tree;
pub mod writer;

pub use brushes::{BrushRange, OutputMap};
pub use bsp_node::{BspNode, LeafData, NodeKind};
pub use compile::compile;
pub use context::CompileContext;
pub use model::PendingModel;
pub use output::{
    BspBrush, BspBrushSide, BspFog, BspLeaf, BspModel, BspShader, BspTreeNode, NodeRef,
};
pub use shader_table::ShaderTable;
pub use store::GrowableStore;
pub use writer::{BspSink, IbspWriter};

// Growth step for every output array except models.
pub const ARRAY_CHUNK: usize = 1024;
pub const MODEL_CHUNK: usize = 256;

pub const MAX_MAP_LEAFS: usize = 0x20000;
pub const MAX_SWITCHED_LIGHTS: usize = 32;

// Legal range for a light's declared `style`.
pub const LS_NORMAL: i32 = 0x0000;
pub const LS_NONE: i32 = 0x00FF;
/// First style value handed out to switchable lights.
pub const LIGHT_STYLE_BASE: i32 = 32;

/// Name emitted for sides and bevels that carry no shader.
pub const DEFAULT_SHADER: &str = "noshader";

/// Triangulation shared by every quad: two triangles over four corners.
pub const QUAD_DRAW_INDEXES: [i32; 6] = [0, 1, 2, 0, 2, 3];

pub const IBSP_IDENT: &[u8; 4] = b"IBSP";
pub const IBSP_VERSION: i32 = 46;
pub const NAME_LEN: usize = 64;
