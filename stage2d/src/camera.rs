//! Camera follow system for tracking a target with dead-zone support.

use crate::math::{Camera2D, Vec2};

/// Camera follow behavior configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFollow {
    /// Dead zone size - camera won't move while the target stays inside it.
    pub dead_zone: Vec2,
    /// Fraction of the remaining distance covered each frame, per axis
    /// (1.0 = snap to target).
    pub lerp: Vec2,
}

impl CameraFollow {
    /// Create a follow configuration that snaps straight to the target.
    pub fn new() -> Self {
        Self {
            dead_zone: Vec2::ZERO,
            lerp: Vec2::ONE,
        }
    }

    /// Set the dead zone size (camera won't move if target is within this area).
    #[must_use]
    pub fn with_dead_zone(mut self, width: f32, height: f32) -> Self {
        self.dead_zone = Vec2::new(width.max(0.0), height.max(0.0));
        self
    }

    /// Set the per-frame lerp factors, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_lerp(mut self, x: f32, y: f32) -> Self {
        self.lerp = Vec2::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0));
        self
    }

    /// Camera centre the follower wants, given the current centre and target.
    ///
    /// Each axis only moves once the target leaves the dead zone, and then
    /// only far enough to put the target back on the dead zone's edge.
    pub fn desired_position(&self, current: Vec2, target: Vec2) -> Vec2 {
        let half = self.dead_zone * 0.5;
        let offset = target - current;
        let mut desired = current;

        if offset.x.abs() > half.x {
            desired.x = target.x - offset.x.signum() * half.x;
        }
        if offset.y.abs() > half.y {
            desired.y = target.y - offset.y.signum() * half.y;
        }

        desired
    }

    /// Move `camera` one frame towards `target`, then clamp to its bounds.
    pub fn update(&self, camera: &mut Camera2D, target: Vec2, viewport: (u32, u32)) {
        let desired = self.desired_position(camera.position, target);
        let diff = desired - camera.position;

        camera.position.x += diff.x * self.lerp.x;
        camera.position.y += diff.y * self.lerp.y;

        camera.clamp_to_bounds(viewport.0, viewport.1);
    }

    /// Jump straight to the target, ignoring dead zone and lerp.
    pub fn snap(&self, camera: &mut Camera2D, target: Vec2, viewport: (u32, u32)) {
        camera.position = target;
        camera.clamp_to_bounds(viewport.0, viewport.1);
    }
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rect;

    #[test]
    fn target_inside_dead_zone_does_not_move_camera() {
        let follow = CameraFollow::new().with_dead_zone(25.0, 25.0);
        let mut camera = Camera2D::new(Vec2::new(100.0, 100.0));

        follow.update(&mut camera, Vec2::new(110.0, 95.0), (800, 600));

        assert_eq!(camera.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn target_outside_dead_zone_is_kept_on_its_edge() {
        let follow = CameraFollow::new().with_dead_zone(20.0, 20.0);
        let mut camera = Camera2D::new(Vec2::new(0.0, 0.0));

        follow.update(&mut camera, Vec2::new(50.0, -3.0), (800, 600));

        assert_eq!(camera.position, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn lerp_moves_a_fraction_per_frame() {
        let follow = CameraFollow::new().with_lerp(0.1, 0.1);
        let mut camera = Camera2D::new(Vec2::ZERO);

        follow.update(&mut camera, Vec2::new(100.0, 0.0), (800, 600));
        assert!((camera.position.x - 10.0).abs() < 1e-4);

        follow.update(&mut camera, Vec2::new(100.0, 0.0), (800, 600));
        assert!((camera.position.x - 19.0).abs() < 1e-4);
    }

    #[test]
    fn follow_respects_camera_bounds() {
        let follow = CameraFollow::new();
        let mut camera = Camera2D::new(Vec2::new(400.0, 300.0)).with_bounds(Rect::from_size(1000.0, 1000.0));

        follow.update(&mut camera, Vec2::new(-500.0, 2000.0), (800, 600));

        assert_eq!(camera.position, Vec2::new(400.0, 700.0));
    }
}
