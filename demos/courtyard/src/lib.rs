//! Courtyard: a top-down movement demo.
//!
//! The movement and interaction rules ([`direction`], [`interaction`]) are
//! pure functions over input state. [`scene::Courtyard`] wires them to
//! physics, animation and the camera without a window, and [`app`] runs that
//! scene on the Stage2D host.

pub mod app;
pub mod config;
pub mod direction;
pub mod interaction;
pub mod level;
pub mod scene;
pub mod sprites;

pub use crate::app::CourtyardGame;
pub use crate::config::{ConfigError, SceneConfig, Variant};
pub use crate::direction::{resolve, DirectionResolver, Facing, MoveInput, Resolution, TieBreak};
pub use crate::interaction::{InteractionEvent, Prompt, ProximityState, ProximityTrigger};
pub use crate::scene::{Courtyard, FrameClock, FrameInput};
