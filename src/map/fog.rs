// src/map/fog.rs

use serde::{Deserialize, Serialize};

use crate::map::BrushId;

/// A fog volume as the map describes it: either tied to a brush or global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalFog {
    pub shader: String,

    /// Backing brush. `None` makes the fog global.
    #[serde(default)]
    pub brush: Option<BrushId>,

    /// Side forced by the map author, bypassing visible-hull detection.
    #[serde(default)]
    pub visible_side: Option<usize>,
}

impl LogicalFog {
    pub fn global(shader: &str) -> Self {
        LogicalFog {
            shader: shader.to_string(),
            brush: None,
            visible_side: None,
        }
    }

    pub fn on_brush(shader: &str, brush: BrushId) -> Self {
        LogicalFog {
            shader: shader.to_string(),
            brush: Some(brush),
            visible_side: None,
        }
    }
}
