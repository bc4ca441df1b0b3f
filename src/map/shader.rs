// src/map/shader.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Content flag every shader gets unless its script says otherwise.
pub const CONTENTS_SOLID: i32 = 0x1;

/// Parsed shader script data this stage needs: default flags plus the
/// optional remap and damage shader names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderInfo {
    pub shader: String,
    #[serde(default)]
    pub surface_flags: i32,
    #[serde(default = "default_content_flags")]
    pub content_flags: i32,
    #[serde(default)]
    pub remap: Option<String>,
    #[serde(default)]
    pub damage_shader: Option<String>,
}

fn default_content_flags() -> i32 {
    CONTENTS_SOLID
}

impl ShaderInfo {
    /// What an unscripted texture resolves to.
    pub fn implicit(name: &str) -> Self {
        ShaderInfo {
            shader: name.to_string(),
            surface_flags: 0,
            content_flags: CONTENTS_SOLID,
            remap: None,
            damage_shader: None,
        }
    }

    pub fn remap_name(&self) -> Option<&str> {
        self.remap.as_deref().filter(|s| !s.is_empty())
    }

    pub fn damage_shader_name(&self) -> Option<&str> {
        self.damage_shader.as_deref().filter(|s| !s.is_empty())
    }
}

/// Case-insensitive shader name lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<ShaderInfo>")]
pub struct ShaderCatalog {
    infos: HashMap<String, ShaderInfo>,
}

impl From<Vec<ShaderInfo>> for ShaderCatalog {
    fn from(list: Vec<ShaderInfo>) -> Self {
        let mut catalog = ShaderCatalog::default();
        for info in list {
            catalog.insert(info);
        }
        catalog
    }
}

impl ShaderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, info: ShaderInfo) {
        self.infos.insert(info.shader.to_ascii_lowercase(), info);
    }

    /// Returns the scripted info for `name`, or the implicit default when the
    /// name has no script.
    pub fn info_for(&self, name: &str) -> ShaderInfo {
        self.infos
            .get(&name.to_ascii_lowercase())
            .cloned()
            .unwrap_or_else(|| ShaderInfo::implicit(name))
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}
