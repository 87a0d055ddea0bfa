use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// 2D vector type used throughout Stage2D.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or `ZERO` for the zero vector.
    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            Self::new(self.x / len, self.y / len)
        }
    }

    /// Returns the squared length of the vector (faster than `length()`).
    pub fn length_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Euclidean distance between two points.
    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::Div<f32> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle in world space, stored as min/max corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from the origin to `(width, height)`.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Transform describing 2D position, scale, and rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub scale: Vec2,
    /// Rotation in radians around the Z axis.
    pub rotation: f32,
}

impl Transform2D {
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }

    /// Model matrix for a unit quad that should cover `base_size` pixels.
    pub fn to_matrix(&self, base_size: Vec2) -> Mat4 {
        let translation = Mat4::from_translation(Vec3::new(self.position.x, self.position.y, 0.0));
        let rotation = Mat4::from_rotation_z(self.rotation);
        let scale = Mat4::from_scale(Vec3::new(
            self.scale.x * base_size.x,
            self.scale.y * base_size.y,
            1.0,
        ));

        translation * rotation * scale
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// 2D camera. `position` is the world point shown at the centre of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
    pub zoom: f32,
    /// World region the view may not leave.
    pub bounds: Option<Rect>,
    /// Snap the view to whole screen pixels when rendering.
    pub round_pixels: bool,
}

impl Camera2D {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            zoom: 1.0,
            bounds: None,
            round_pixels: false,
        }
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn with_round_pixels(mut self, round_pixels: bool) -> Self {
        self.round_pixels = round_pixels;
        self
    }

    /// Size of the world area covered by a `width` x `height` viewport.
    pub fn visible_size(&self, width: u32, height: u32) -> Vec2 {
        Vec2::new(width as f32 / self.zoom, height as f32 / self.zoom)
    }

    /// World-space corners (min, max) of the area currently on screen.
    pub fn viewport_bounds(&self, width: u32, height: u32) -> (Vec2, Vec2) {
        let half = self.visible_size(width, height) * 0.5;
        let center = self.render_position();
        (center - half, center + half)
    }

    /// Keep the visible area inside `bounds`. An axis whose visible span is
    /// larger than the bounds is centred on them instead.
    pub fn clamp_to_bounds(&mut self, width: u32, height: u32) {
        let Some(bounds) = self.bounds else {
            return;
        };
        let half = self.visible_size(width, height) * 0.5;
        let size = bounds.size();
        let center = bounds.center();

        self.position.x = if size.x <= half.x * 2.0 {
            center.x
        } else {
            self.position.x.clamp(bounds.min.x + half.x, bounds.max.x - half.x)
        };
        self.position.y = if size.y <= half.y * 2.0 {
            center.y
        } else {
            self.position.y.clamp(bounds.min.y + half.y, bounds.max.y - half.y)
        };
    }

    /// Position used for rendering, snapped to the screen pixel grid when
    /// `round_pixels` is set.
    pub fn render_position(&self) -> Vec2 {
        if self.round_pixels && self.zoom > 0.0 {
            (self.position * self.zoom).round() / self.zoom
        } else {
            self.position
        }
    }

    pub fn view_projection(&self, width: u32, height: u32) -> Mat4 {
        let projection = Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, -1.0, 1.0);
        let center = self.render_position();

        let to_screen_center =
            Mat4::from_translation(Vec3::new(width as f32 * 0.5, height as f32 * 0.5, 0.0));
        let zoom = Mat4::from_scale(Vec3::new(self.zoom, self.zoom, 1.0));
        let translation = Mat4::from_translation(Vec3::new(-center.x, -center.y, 0.0));

        projection * to_screen_center * zoom * translation
    }

    pub fn screen_to_world(&self, screen_pos: Vec2, screen_width: u32, screen_height: u32) -> Vec2 {
        let half_screen = Vec2::new(screen_width as f32 * 0.5, screen_height as f32 * 0.5);
        (screen_pos - half_screen) / self.zoom + self.render_position()
    }

    pub fn world_to_screen(&self, world_pos: Vec2, screen_width: u32, screen_height: u32) -> Vec2 {
        let half_screen = Vec2::new(screen_width as f32 * 0.5, screen_height as f32 * 0.5);
        (world_pos - self.render_position()) * self.zoom + half_screen
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
