// src/map/brush.rs

use serde::{Deserialize, Serialize};

use crate::utils::{BoundingBox, Point3D};

/// Index of a brush in the document's brush arena. Entities, leafs and fogs
/// all refer to brushes through this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrushId(pub usize);

/// One bounding plane of a brush.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Side {
    /// Index into the canonical plane list.
    pub plane_num: usize,

    /// Shader applied to this face, if any.
    pub shader: Option<String>,

    /// Set on the axial/edge sides added to round off brush corners. Bevels
    /// have no real shader but still carry surface flags for physics.
    pub bevel: bool,

    /// Surface flags emitted for bevel sides.
    pub surface_flags: i32,

    /// The part of this face that survived clipping against the hull. An
    /// empty winding means the face is never seen.
    pub visible_hull: Vec<Point3D>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub sides: Vec<Side>,

    /// Shader whose content flags classify the whole brush.
    #[serde(default = "default_content_shader")]
    pub content_shader: String,

    #[serde(default)]
    pub bounds: BoundingBox,

    /// Brush was flagged as a light grid volume.
    #[serde(default)]
    pub lightgrid: bool,
}

fn default_content_shader() -> String {
    crate::bsp::DEFAULT_SHADER.to_string()
}

impl Brush {
    pub fn new(content_shader: &str, sides: Vec<Side>, bounds: BoundingBox) -> Self {
        Brush {
            sides,
            content_shader: content_shader.to_string(),
            bounds,
            lightgrid: false,
        }
    }

    /// Origin brushes and similar helpers end up with no sides after CSG.
    pub fn is_real(&self) -> bool {
        !self.sides.is_empty()
    }
}

impl Side {
    pub fn with_shader(plane_num: usize, shader: &str) -> Self {
        Side {
            plane_num,
            shader: Some(shader.to_string()),
            ..Default::default()
        }
    }

    pub fn bevel(plane_num: usize, surface_flags: i32) -> Self {
        Side {
            plane_num,
            bevel: true,
            surface_flags,
            ..Default::default()
        }
    }
}
