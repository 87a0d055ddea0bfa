mod animation;
mod sprite;
mod text;
mod wgpu_backend;

pub use animation::{
    Animation, AnimationError, AnimationLibrary, AnimationPlayer, FrameSelection, Repeat,
    SpriteSheet,
};
pub use sprite::{Sprite, TextureFilter, TextureHandle};
pub use text::TextRenderer;
pub use wgpu_backend::{Frame, Renderer};
