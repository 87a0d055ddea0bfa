//! Stage2D - a small 2D host runtime.
//!
//! Owns the window and frame loop, keyboard input, camera math, camera
//! follow, rapier-backed physics, spritesheet animation and a wgpu renderer.
//! Games plug in through the [`Game`] trait.

pub mod assets;
pub mod camera;
pub mod engine;
pub mod input;
pub mod math;
pub mod physics;
pub mod render;

pub use crate::assets::AssetManager;
pub use crate::camera::CameraFollow;
pub use crate::engine::{Engine, EngineConfig, EngineContext, FixedClock, Game, FIXED_TIMESTEP};
pub use crate::input::{ActionId, InputMap, InputState};
pub use crate::math::{Camera2D, Rect, Transform2D, Vec2};
pub use crate::physics::{BodyId, ColliderShape, Material, PhysicsWorld, RigidBodyType};
pub use crate::render::{
    AnimationError, AnimationLibrary, AnimationPlayer, Frame, FrameSelection, Renderer, Repeat,
    Sprite, SpriteSheet, TextureFilter, TextureHandle,
};
pub use winit::keyboard::KeyCode;
