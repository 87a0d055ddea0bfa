//! Static courtyard layout.

use stage2d::{Rect, Vec2};

pub const WORLD_WIDTH: f32 = 3072.0;
pub const WORLD_HEIGHT: f32 = 2048.0;
pub const BOUNDARY_THICKNESS: f32 = 64.0;

/// Size of the wall texture before scaling.
pub const WALL_TEXTURE_SIZE: Vec2 = Vec2::new(400.0, 32.0);
pub const HERO_FRAME_SIZE: Vec2 = Vec2::new(48.0, 48.0);
pub const HERO_CHAMFER: f32 = 12.0;
pub const TROPHY_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// A wall placed like an image: centre, angle in degrees, uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSpec {
    pub position: Vec2,
    pub angle_degrees: f32,
    pub scale: f32,
}

impl WallSpec {
    pub const fn new(x: f32, y: f32, angle_degrees: f32, scale: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            angle_degrees,
            scale,
        }
    }

    /// Unrotated half extents of the scaled texture.
    pub fn half_extents(&self, texture_size: Vec2) -> Vec2 {
        texture_size * self.scale * 0.5
    }

    pub fn rotation_radians(&self) -> f32 {
        self.angle_degrees.to_radians()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub bounds: Rect,
    pub boundary_thickness: f32,
    pub walls: Vec<WallSpec>,
    pub hero_spawn: Vec2,
    pub trophy_position: Vec2,
}

impl Level {
    pub fn standard() -> Self {
        let mut walls = Vec::with_capacity(12);
        for x in [400.0, 2600.0] {
            for y in [50.0, 1150.0, 2250.0] {
                walls.push(WallSpec::new(x, y, 90.0, 2.0));
            }
        }
        for y in [25.0, 2023.0] {
            for x in [800.0, 1600.0, 2200.0] {
                walls.push(WallSpec::new(x, y, 0.0, 2.0));
            }
        }

        Self {
            bounds: Rect::from_size(WORLD_WIDTH, WORLD_HEIGHT),
            boundary_thickness: BOUNDARY_THICKNESS,
            walls,
            hero_spawn: Vec2::new(1600.0, 200.0),
            trophy_position: Vec2::new(1600.0, 1000.0),
        }
    }

    /// Same layout over a different world rectangle.
    #[must_use]
    pub fn with_world_size(mut self, size: Vec2) -> Self {
        self.bounds = Rect::from_size(size.x, size.y);
        self
    }
}
