use crate::math::{Transform2D, Vec2};

/// Opaque handle used to reference textures owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) u32);

/// Texture sampling mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextureFilter {
    /// Crisp texels, for pixel art.
    #[default]
    Nearest,
    Linear,
}

/// A texture (or a region of one) placed in the world.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub texture: TextureHandle,
    pub transform: Transform2D,
    /// Normalized source rectangle `[x, y, w, h]`. `None` draws the whole texture.
    pub region: Option<[f32; 4]>,
    /// Multiplicative tint applied to the sampled texture color.
    pub tint: [f32; 4],
}

impl Sprite {
    pub fn new(texture: TextureHandle) -> Self {
        Self {
            texture,
            transform: Transform2D::default(),
            region: None,
            tint: [1.0, 1.0, 1.0, 1.0],
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: Option<[f32; 4]>) -> Self {
        self.region = region;
        self
    }
}
