// src/map/mod.rs
pub mod brush;
pub mod entity;
pub mod fog;
pub mod patch;
pub mod shader;

pub use brush::{Brush, BrushId, Side};
pub use entity::Entity;
pub use fog::LogicalFog;
pub use patch::PatchMesh;
pub use shader::{ShaderCatalog, ShaderInfo};
