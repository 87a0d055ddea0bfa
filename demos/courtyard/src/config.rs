//! Scene configuration: one JSON document per variant.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use stage2d::{KeyCode, Vec2};
use thiserror::Error;

use crate::{
    direction::TieBreak,
    level::{WORLD_HEIGHT, WORLD_WIDTH},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize scene config")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// The demo's progressive feature sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Movement only.
    Basic,
    /// Adds walls and world bounds.
    Walled,
    /// Adds the following camera.
    Follow,
    /// Adds walk and idle animations.
    Animated,
    /// Adds the collectable trophy.
    #[default]
    Trophy,
}

/// Keys that can be bound to "interact".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractKey {
    #[default]
    E,
    F,
    Space,
    Enter,
}

impl InteractKey {
    pub fn key_code(self) -> KeyCode {
        match self {
            InteractKey::E => KeyCode::KeyE,
            InteractKey::F => KeyCode::KeyF,
            InteractKey::Space => KeyCode::Space,
            InteractKey::Enter => KeyCode::Enter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractKey::E => "E",
            InteractKey::F => "F",
            InteractKey::Space => "Space",
            InteractKey::Enter => "Enter",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Track the hero. When off the camera stays on the spawn point.
    pub follow: bool,
    pub zoom: f32,
    pub dead_zone: Vec2,
    /// Fraction of the remaining distance covered per frame, in `(0, 1]`.
    pub lerp: Vec2,
    pub round_pixels: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow: true,
            zoom: 1.75,
            dead_zone: Vec2::new(25.0, 25.0),
            lerp: Vec2::new(0.1, 0.1),
            round_pixels: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrophySettings {
    pub enabled: bool,
    pub radius: f32,
    pub interact_key: InteractKey,
    /// `{key}` is replaced by the interact key's label.
    pub prompt_text: String,
    pub prompt_offset: Vec2,
}

impl Default for TrophySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 150.0,
            interact_key: InteractKey::E,
            prompt_text: "Press {key} to collect".into(),
            prompt_offset: Vec2::new(0.0, -48.0),
        }
    }
}

impl TrophySettings {
    /// Prompt text with the bound key filled in.
    pub fn prompt(&self) -> String {
        self.prompt_text.replace("{key}", self.interact_key.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub variant: Variant,
    /// Hero speed in pixels per second.
    pub speed: f32,
    pub tie_break: TieBreak,
    pub walls: bool,
    pub animations: bool,
    pub world_size: Vec2,
    pub camera: CameraSettings,
    pub trophy: TrophySettings,
    pub clear_color: [f32; 4],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::preset(Variant::default())
    }
}

impl SceneConfig {
    pub fn preset(variant: Variant) -> Self {
        let at_least = |v: Variant| variant as u8 >= v as u8;
        let camera = CameraSettings {
            follow: at_least(Variant::Follow),
            ..CameraSettings::default()
        };
        let trophy = TrophySettings {
            enabled: at_least(Variant::Trophy),
            ..TrophySettings::default()
        };

        Self {
            variant,
            // 10 px per 60 Hz step.
            speed: 600.0,
            tie_break: if variant == Variant::Trophy {
                TieBreak::FirstPressed
            } else {
                TieBreak::HorizontalFirst
            },
            walls: at_least(Variant::Walled),
            animations: at_least(Variant::Animated),
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            camera,
            trophy,
            // #bbffcc
            clear_color: [0.733, 1.0, 0.8, 1.0],
        }
    }

    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SceneConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        log::info!("Loaded {:?} scene config from {}", config.variant, path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("speed", self.speed)?;
        positive("camera.zoom", self.camera.zoom)?;
        positive("trophy.radius", self.trophy.radius)?;
        positive("world_size.x", self.world_size.x)?;
        positive("world_size.y", self.world_size.y)?;

        for (field, value) in [("camera.lerp.x", self.camera.lerp.x), ("camera.lerp.y", self.camera.lerp.y)] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is outside (0, 1]"),
                });
            }
        }
        for (field, value) in [
            ("camera.dead_zone.x", self.camera.dead_zone.x),
            ("camera.dead_zone.y", self.camera.dead_zone.y),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} must be zero or more"),
                });
            }
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be positive"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_add_features_in_order() {
        let basic = SceneConfig::preset(Variant::Basic);
        assert!(!basic.walls && !basic.camera.follow && !basic.animations && !basic.trophy.enabled);

        let follow = SceneConfig::preset(Variant::Follow);
        assert!(follow.walls && follow.camera.follow && !follow.animations);

        let trophy = SceneConfig::preset(Variant::Trophy);
        assert!(trophy.walls && trophy.camera.follow && trophy.animations && trophy.trophy.enabled);
        assert_eq!(trophy.tie_break, TieBreak::FirstPressed);
        assert_eq!(SceneConfig::preset(Variant::Animated).tie_break, TieBreak::HorizontalFirst);
    }

    #[test]
    fn every_preset_is_valid() {
        for variant in Variant::value_variants() {
            SceneConfig::preset(*variant).validate().unwrap();
        }
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = SceneConfig::default();
        config.speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "speed", .. })
        ));

        let mut config = SceneConfig::default();
        config.camera.lerp = Vec2::new(0.1, 1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "camera.lerp.y", .. })
        ));

        let mut config = SceneConfig::default();
        config.world_size = Vec2::new(0.0, 2048.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "speed": 300.0, "tie_break": "horizontal-first" }"#).unwrap();
        assert_eq!(config.speed, 300.0);
        assert_eq!(config.tie_break, TieBreak::HorizontalFirst);
        assert_eq!(config.trophy.radius, 150.0);
        assert_eq!(config.variant, Variant::Trophy);
    }

    #[test]
    fn prompt_follows_interact_key() {
        let mut trophy = TrophySettings::default();
        assert_eq!(trophy.prompt(), "Press E to collect");

        trophy.interact_key = InteractKey::Space;
        assert_eq!(trophy.prompt(), "Press Space to collect");

        trophy.prompt_text = "Grab it".into();
        assert_eq!(trophy.prompt(), "Grab it");
    }
}
