//! Spritesheet animations addressed by string keys.
//!
//! A [`SpriteSheet`] describes the frame grid of one texture, an
//! [`AnimationLibrary`] holds named frame sequences over that grid, and an
//! [`AnimationPlayer`] tracks which animation an actor is showing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::Vec2;

#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    #[error("animation `{0}` is not registered")]
    UnknownAnimation(String),
    #[error("animation `{key}` has no frames")]
    EmptyFrames { key: String },
    #[error("animation `{key}` uses frame {frame}, but the sheet only has {count} frames")]
    FrameOutOfRange { key: String, frame: usize, count: usize },
    #[error("animation `{key}` has invalid frame rate {rate}")]
    InvalidFrameRate { key: String, rate: f32 },
    #[error("texture of {texture_width}x{texture_height} cannot hold {frame_width}x{frame_height} frames")]
    SheetTooSmall {
        texture_width: u32,
        texture_height: u32,
        frame_width: u32,
        frame_height: u32,
    },
}

/// Frame grid of a spritesheet texture. Frames are numbered row by row from
/// the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpriteSheet {
    pub frame_width: u32,
    pub frame_height: u32,
    pub columns: u32,
    pub rows: u32,
}

impl SpriteSheet {
    pub fn new(frame_width: u32, frame_height: u32, columns: u32, rows: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            columns,
            rows,
        }
    }

    /// Derive the grid from a texture size, ignoring leftover pixels.
    pub fn from_texture_size(
        texture_width: u32,
        texture_height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Result<Self, AnimationError> {
        let too_small = AnimationError::SheetTooSmall {
            texture_width,
            texture_height,
            frame_width,
            frame_height,
        };
        if frame_width == 0 || frame_height == 0 {
            return Err(too_small);
        }
        let columns = texture_width / frame_width;
        let rows = texture_height / frame_height;
        if columns == 0 || rows == 0 {
            return Err(too_small);
        }
        Ok(Self::new(frame_width, frame_height, columns, rows))
    }

    pub fn frame_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(self.frame_width as f32, self.frame_height as f32)
    }

    /// Normalized UV rectangle `[x, y, w, h]` of a frame.
    pub fn frame_uv(&self, index: usize) -> Option<[f32; 4]> {
        if index >= self.frame_count() {
            return None;
        }
        let col = index as u32 % self.columns;
        let row = index as u32 / self.columns;
        let uv_width = 1.0 / self.columns as f32;
        let uv_height = 1.0 / self.rows as f32;
        Some([
            col as f32 * uv_width,
            row as f32 * uv_height,
            uv_width,
            uv_height,
        ])
    }
}

/// Which sheet frames an animation uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameSelection {
    /// Inclusive range, `start..=end`.
    Range { start: usize, end: usize },
    /// Explicit frame list.
    List { frames: Vec<usize> },
}

impl FrameSelection {
    pub fn range(start: usize, end: usize) -> Self {
        FrameSelection::Range { start, end }
    }

    pub fn list(frames: impl Into<Vec<usize>>) -> Self {
        FrameSelection::List {
            frames: frames.into(),
        }
    }

    pub fn indices(&self) -> Vec<usize> {
        match self {
            FrameSelection::Range { start, end } if start <= end => (*start..=*end).collect(),
            FrameSelection::Range { start, end } => (*end..=*start).rev().collect(),
            FrameSelection::List { frames } => frames.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    /// Play through once and hold the last frame.
    #[default]
    Once,
    Loop,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub frames: Vec<usize>,
    pub frame_rate: f32,
    pub repeat: Repeat,
}

impl Animation {
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate
    }
}

/// Named animations over one spritesheet.
#[derive(Clone, Debug)]
pub struct AnimationLibrary {
    sheet: SpriteSheet,
    animations: HashMap<String, Animation>,
}

impl AnimationLibrary {
    pub fn new(sheet: SpriteSheet) -> Self {
        Self {
            sheet,
            animations: HashMap::new(),
        }
    }

    /// Register (or replace) an animation under `key`.
    pub fn create(
        &mut self,
        key: &str,
        selection: &FrameSelection,
        frame_rate: f32,
        repeat: Repeat,
    ) -> Result<(), AnimationError> {
        let frames = selection.indices();
        if frames.is_empty() {
            return Err(AnimationError::EmptyFrames { key: key.into() });
        }
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(AnimationError::InvalidFrameRate {
                key: key.into(),
                rate: frame_rate,
            });
        }
        let count = self.sheet.frame_count();
        if let Some(&frame) = frames.iter().find(|&&f| f >= count) {
            return Err(AnimationError::FrameOutOfRange {
                key: key.into(),
                frame,
                count,
            });
        }

        self.animations.insert(
            key.to_string(),
            Animation {
                frames,
                frame_rate,
                repeat,
            },
        );
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Animation> {
        self.animations.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.animations.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

/// Playback state of one actor's animation.
#[derive(Clone, Debug, Default)]
pub struct AnimationPlayer {
    current: Option<String>,
    cursor: usize,
    timer: f32,
    playing: bool,
}

impl AnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `key` from its first frame.
    ///
    /// With `ignore_if_playing`, calling this again while the same animation
    /// is still running is a no-op, so it can be called every frame. Returns
    /// whether playback (re)started.
    pub fn play(
        &mut self,
        library: &AnimationLibrary,
        key: &str,
        ignore_if_playing: bool,
    ) -> Result<bool, AnimationError> {
        if !library.contains(key) {
            return Err(AnimationError::UnknownAnimation(key.into()));
        }
        if ignore_if_playing && self.playing && self.current.as_deref() == Some(key) {
            return Ok(false);
        }

        self.current = Some(key.to_string());
        self.cursor = 0;
        self.timer = 0.0;
        self.playing = true;
        Ok(true)
    }

    /// Advance playback by `dt` seconds.
    pub fn update(&mut self, library: &AnimationLibrary, dt: f32) {
        if !self.playing {
            return;
        }
        let Some(animation) = self.current.as_deref().and_then(|k| library.get(k)) else {
            self.playing = false;
            return;
        };

        self.timer += dt;
        let duration = animation.frame_duration();
        while self.playing && self.timer >= duration {
            self.timer -= duration;
            self.cursor += 1;

            if self.cursor >= animation.frames.len() {
                match animation.repeat {
                    Repeat::Loop => self.cursor = 0,
                    Repeat::Once => {
                        self.cursor = animation.frames.len() - 1;
                        self.playing = false;
                    }
                }
            }
        }
    }

    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Sheet frame currently shown, if an animation has been started.
    pub fn current_frame(&self, library: &AnimationLibrary) -> Option<usize> {
        let animation = library.get(self.current.as_deref()?)?;
        animation.frames.get(self.cursor).copied()
    }
}
