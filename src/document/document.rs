// src/document/document.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::map::{Brush, BrushId, Entity, LogicalFog, ShaderCatalog};
use crate::utils::Plane;

/// Everything the upstream stages hand to the emitter: the canonical plane
/// list, shader infos, the global brush arena, entities with their solved
/// trees, and the logical fogs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub planes: Vec<Plane>,
    #[serde(skip_serializing)]
    pub shaders: ShaderCatalog,
    pub brushes: Vec<Brush>,
    pub entities: Vec<Entity>,
    pub fogs: Vec<LogicalFog>,
}

impl Document {
    /// Create a new empty Document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a document from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let doc: Document = serde_json::from_reader(reader)?;
        info!(
            "{:9} planes, {} brushes, {} entities, {} fogs",
            doc.planes.len(),
            doc.brushes.len(),
            doc.entities.len(),
            doc.fogs.len()
        );
        Ok(doc)
    }

    /// Adds a plane and returns its index.
    pub fn add_plane(&mut self, plane: Plane) -> usize {
        self.planes.push(plane);
        self.planes.len() - 1
    }

    /// Adds a brush to the arena and returns its id.
    pub fn add_brush(&mut self, brush: Brush) -> BrushId {
        self.brushes.push(brush);
        BrushId(self.brushes.len() - 1)
    }

    /// Adds an entity. The first one added is the world.
    pub fn add_entity(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    pub fn world(&self) -> Option<&Entity> {
        self.entities.first()
    }
}
