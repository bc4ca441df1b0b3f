// src/error.rs

use thiserror::Error;

use crate::map::BrushId;

/// Every condition that stops a compile. None of these are recoverable: the
/// pass that hits one hands nothing to the writer.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("MAX_MAP_LEAFS ({limit}) exceeded")]
    LeafLimit { limit: usize },

    #[error("MAX_SWITCHED_LIGHTS ({limit}) exceeded, reduce the number of lights with targetnames")]
    SwitchedLightLimit { limit: usize },

    #[error("odd plane number {plane} on a tree node")]
    OddPlaneNum { plane: usize },

    #[error("Invalid lightstyle ({style}) on entity {entity}")]
    InvalidLightStyle { style: i32, entity: usize },

    #[error("brush {0:?} is referenced before it was emitted")]
    UnemittedBrush(BrushId),

    #[error("brush {0:?} does not exist in the document")]
    UnknownBrush(BrushId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompileError>;
