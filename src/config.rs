// src/config.rs

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bsp::{MAX_MAP_LEAFS, MAX_SWITCHED_LIGHTS};
use crate::error::Result;

/// Knobs for one compile pass. Every field has a default so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Keep lights without a targetname instead of stripping them.
    pub keep_lights: bool,
    /// Follow shader remaps before comparing names (post-BSP stages).
    pub apply_shader_remaps: bool,
    pub max_leafs: usize,
    pub max_switched_lights: usize,
}

impl Default for EmitConfig {
    fn default() -> Self {
        EmitConfig {
            keep_lights: false,
            apply_shader_remaps: false,
            max_leafs: MAX_MAP_LEAFS,
            max_switched_lights: MAX_SWITCHED_LIGHTS,
        }
    }
}

impl EmitConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
