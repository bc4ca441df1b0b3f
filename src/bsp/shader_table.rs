// src/bsp/shader_table.rs

use log::debug;

use crate::bsp::{BspShader, GrowableStore, ARRAY_CHUNK, DEFAULT_SHADER};
use crate::map::ShaderCatalog;

/// Output shader list, deduplicated on (name, surface flags, content flags).
#[derive(Debug, Clone)]
pub struct ShaderTable {
    entries: GrowableStore<BspShader>,
    apply_remaps: bool,
}

impl ShaderTable {
    pub fn new(apply_remaps: bool) -> Self {
        ShaderTable {
            entries: GrowableStore::new(ARRAY_CHUNK),
            apply_remaps,
        }
    }

    /// Returns the index of the entry for `shader`, adding one if needed.
    ///
    /// A flag override only matches entries carrying exactly that value; an
    /// axis without an override matches any entry. Names compare without
    /// regard to case. `None` stands for [`DEFAULT_SHADER`].
    pub fn emit(
        &mut self,
        catalog: &ShaderCatalog,
        shader: Option<&str>,
        content_flags: Option<i32>,
        surface_flags: Option<i32>,
    ) -> usize {
        let mut name = shader.unwrap_or(DEFAULT_SHADER).to_string();
        if self.apply_remaps {
            if let Some(remap) = catalog.info_for(&name).remap_name() {
                name = remap.to_string();
            }
        }

        let existing = self.entries.iter().position(|entry| {
            surface_flags.map_or(true, |flags| entry.surface_flags == flags)
                && content_flags.map_or(true, |flags| entry.content_flags == flags)
                && entry.shader.eq_ignore_ascii_case(&name)
        });
        if let Some(index) = existing {
            return index;
        }

        let info = catalog.info_for(&name);
        let index = self.entries.push(BspShader {
            shader: info.shader.clone(),
            surface_flags: surface_flags.unwrap_or(info.surface_flags),
            content_flags: content_flags.unwrap_or(info.content_flags),
        });

        if let Some(damage) = info.damage_shader_name() {
            debug!("Shader {} has damage shader {}", info.shader, damage);
            self.emit(catalog, Some(damage), None, None);
        }

        index
    }

    pub fn get(&self, index: usize) -> Option<&BspShader> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[BspShader] {
        self.entries.as_slice()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
