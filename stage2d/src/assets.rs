use std::{collections::HashMap, path::Path};

use anyhow::Result;
use image::RgbaImage;

use crate::render::{Renderer, TextureFilter, TextureHandle};

/// Caches textures by key so each one is uploaded to the GPU once.
pub struct AssetManager {
    textures: HashMap<String, TextureHandle>,
}

impl AssetManager {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Upload an in-memory image under `key`.
    pub fn load_image(
        &mut self,
        renderer: &mut Renderer,
        key: &str,
        image: &RgbaImage,
        filter: TextureFilter,
    ) -> Result<TextureHandle> {
        if let Some(handle) = self.textures.get(key) {
            return Ok(*handle);
        }

        let handle =
            renderer.load_texture_from_rgba(image.as_raw(), image.width(), image.height(), filter)?;
        self.textures.insert(key.to_string(), handle);
        Ok(handle)
    }

    /// Load `path` if it exists and decodes, otherwise upload the image built
    /// by `fallback`. Either way the texture is cached under `key`.
    pub fn load_or_generate(
        &mut self,
        renderer: &mut Renderer,
        key: &str,
        path: &Path,
        filter: TextureFilter,
        fallback: impl FnOnce() -> RgbaImage,
    ) -> Result<TextureHandle> {
        if let Some(handle) = self.textures.get(key) {
            return Ok(*handle);
        }

        if path.is_file() {
            match renderer.load_texture_from_file(path, filter) {
                Ok(handle) => {
                    log::debug!("Loaded texture `{key}` from {}", path.display());
                    self.textures.insert(key.to_string(), handle);
                    return Ok(handle);
                }
                Err(err) => {
                    log::warn!("Failed to load {}: {err:#}; generating `{key}`", path.display());
                }
            }
        } else {
            log::warn!("{} not found; generating `{key}`", path.display());
        }

        self.load_image(renderer, key, &fallback(), filter)
    }
}

impl Default for AssetManager {
    fn default() -> Self {
        Self::new()
    }
}
