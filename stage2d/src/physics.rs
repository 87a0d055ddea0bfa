// stage2d/src/physics.rs
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::math::{Rect, Vec2};

// Rapier is private implementation detail: do NOT re-export it.
use rapier2d::prelude::*;

/// Engine-facing handle for a physics body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u32);

/// Engine-facing rigid body type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RigidBodyType {
    /// Moved by velocities and pushed out of other bodies.
    Dynamic,
    /// Never moves. Walls, platforms, world bounds.
    Fixed,
}

/// Engine-facing collider shape. Dimensions are half extents.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    Box { hx: f32, hy: f32 },
    /// Box with rounded (chamfered) corners. The total half extents are
    /// `hx + radius` and `hy + radius`.
    RoundBox { hx: f32, hy: f32, radius: f32 },
}

impl ColliderShape {
    /// Rounded box covering `width` x `height` with corners of `radius`.
    pub fn chamfered(width: f32, height: f32, radius: f32) -> Self {
        let radius = radius.min(width * 0.5).min(height * 0.5).max(0.0);
        ColliderShape::RoundBox {
            hx: width * 0.5 - radius,
            hy: height * 0.5 - radius,
            radius,
        }
    }
}

/// Surface properties for a solid collider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.1,
            restitution: 0.0,
        }
    }
}

/// Thin wrapper around a rapier2d world, addressed through [`BodyId`]s.
pub struct PhysicsWorld {
    // --- rapier internals ---
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    rigid_bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,

    // --- mappings (engine <-> rapier) ---
    id_to_body: HashMap<BodyId, RigidBodyHandle>,
    next_id: u32,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create a world without gravity, as a top-down game wants.
    pub fn new() -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            integration_parameters: IntegrationParameters::default(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),

            id_to_body: HashMap::new(),
            next_id: 1,

        }
    }

    /// Number of live bodies.
    pub fn body_count(&self) -> usize {
        self.id_to_body.len()
    }

    /// Create a body without colliders.
    pub fn create_body(&mut self, body_type: RigidBodyType, position: Vec2, rotation: f32) -> BodyId {
        let rb_type = match body_type {
            RigidBodyType::Dynamic => rapier2d::prelude::RigidBodyType::Dynamic,
            RigidBodyType::Fixed => rapier2d::prelude::RigidBodyType::Fixed,
        };

        let mut builder = RigidBodyBuilder::new(rb_type)
            .translation(vector![position.x, position.y])
            .rotation(rotation);

        // CCD keeps fast dynamic bodies from tunnelling through thin walls.
        if matches!(body_type, RigidBodyType::Dynamic) {
            builder = builder.ccd_enabled(true);
        }

        let handle = self.rigid_bodies.insert(builder.build());
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.id_to_body.insert(id, handle);
        id
    }

    /// Remove a body and its colliders. Returns whether one existed.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        if let Some(handle) = self.id_to_body.remove(&id) {
            self.rigid_bodies.remove(
                handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
            true
        } else {
            false
        }
    }

    /// Attach a solid collider to a body.
    pub fn add_collider(&mut self, id: BodyId, shape: ColliderShape, material: Material) -> Result<()> {
        let body = self.body_handle(id)?;

        let collider = ColliderBuilder::new(to_rapier_shape(shape))
            .density(material.density)
            .friction(material.friction)
            .restitution(material.restitution)
            .build();

        self.colliders
            .insert_with_parent(collider, body, &mut self.rigid_bodies);

        Ok(())
    }

    /// Create an immovable box, e.g. a wall or platform.
    pub fn add_static_box(&mut self, center: Vec2, rotation: f32, half_extents: Vec2) -> Result<BodyId> {
        let id = self.create_body(RigidBodyType::Fixed, center, rotation);
        self.add_collider(
            id,
            ColliderShape::Box {
                hx: half_extents.x,
                hy: half_extents.y,
            },
            Material::default(),
        )?;
        Ok(id)
    }

    /// Enclose `bounds` with four static walls of `thickness`, placed just
    /// outside the rectangle. Returns them as left, right, top, bottom.
    pub fn set_bounds(&mut self, bounds: Rect, thickness: f32) -> Result<[BodyId; 4]> {
        let size = bounds.size();
        let center = bounds.center();
        let half_t = thickness * 0.5;
        // Side walls run past the corners so nothing escapes diagonally.
        let half_w = size.x * 0.5 + thickness;
        let half_h = size.y * 0.5 + thickness;

        let left = self.add_static_box(
            Vec2::new(bounds.min.x - half_t, center.y),
            0.0,
            Vec2::new(half_t, half_h),
        )?;
        let right = self.add_static_box(
            Vec2::new(bounds.max.x + half_t, center.y),
            0.0,
            Vec2::new(half_t, half_h),
        )?;
        let top = self.add_static_box(
            Vec2::new(center.x, bounds.min.y - half_t),
            0.0,
            Vec2::new(half_w, half_t),
        )?;
        let bottom = self.add_static_box(
            Vec2::new(center.x, bounds.max.y + half_t),
            0.0,
            Vec2::new(half_w, half_t),
        )?;

        Ok([left, right, top, bottom])
    }

    /// Step simulation by fixed dt (seconds).
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        // Top-down: nothing falls.
        let gravity = vector![0.0, 0.0];

        self.pipeline.step(
            &gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    // ------------------------------
    // Per-body queries/actions
    // ------------------------------

    pub fn body_position(&self, id: BodyId) -> Option<Vec2> {
        let b = self.rigid_bodies.get(*self.id_to_body.get(&id)?)?;
        let t = b.translation();
        Some(Vec2::new(t.x, t.y))
    }

    pub fn body_rotation(&self, id: BodyId) -> Option<f32> {
        let b = self.rigid_bodies.get(*self.id_to_body.get(&id)?)?;
        Some(b.rotation().angle())
    }

    pub fn linear_velocity(&self, id: BodyId) -> Option<Vec2> {
        let b = self.rigid_bodies.get(*self.id_to_body.get(&id)?)?;
        let v = b.linvel();
        Some(Vec2::new(v.x, v.y))
    }

    pub fn body_type(&self, id: BodyId) -> Option<RigidBodyType> {
        let b = self.rigid_bodies.get(*self.id_to_body.get(&id)?)?;
        match b.body_type() {
            rapier2d::prelude::RigidBodyType::Fixed => Some(RigidBodyType::Fixed),
            _ => Some(RigidBodyType::Dynamic),
        }
    }

    pub fn set_linear_velocity(&mut self, id: BodyId, vel: Vec2) {
        if let Some(b) = self.body_mut(id) {
            b.set_linvel(vector![vel.x, vel.y], true);
        }
    }

    /// Lock rotations for a body (characters should not spin on contact).
    pub fn lock_rotations(&mut self, id: BodyId, locked: bool) {
        if let Some(b) = self.body_mut(id) {
            b.lock_rotations(locked, true);
        }
    }

    // ------------------------------
    // Private helpers
    // ------------------------------

    fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        let h = self.id_to_body.get(&id).copied()?;
        self.rigid_bodies.get_mut(h)
    }

    fn body_handle(&self, id: BodyId) -> Result<RigidBodyHandle> {
        self.id_to_body
            .get(&id)
            .copied()
            .ok_or_else(|| anyhow!("Body {:?} does not exist", id))
    }
}

fn to_rapier_shape(s: ColliderShape) -> SharedShape {
    match s {
        ColliderShape::Box { hx, hy } => SharedShape::cuboid(hx, hy),
        ColliderShape::RoundBox { hx, hy, radius } => SharedShape::round_cuboid(hx, hy, radius),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chamfered_shape_keeps_outer_size() {
        let shape = ColliderShape::chamfered(48.0, 48.0, 12.0);
        assert_eq!(
            shape,
            ColliderShape::RoundBox {
                hx: 12.0,
                hy: 12.0,
                radius: 12.0
            }
        );
    }

    #[test]
    fn collider_on_missing_body_is_an_error() {
        let mut world = PhysicsWorld::new();
        let id = world.create_body(RigidBodyType::Dynamic, Vec2::ZERO, 0.0);
        assert!(world.remove_body(id));
        assert!(!world.remove_body(id));
        assert!(world
            .add_collider(id, ColliderShape::Box { hx: 1.0, hy: 1.0 }, Material::default())
            .is_err());
    }

    #[test]
    fn bounds_create_four_fixed_bodies() {
        let mut world = PhysicsWorld::new();
        let walls = world.set_bounds(Rect::from_size(100.0, 50.0), 10.0).unwrap();
        assert_eq!(world.body_count(), 4);
        for id in walls {
            assert_eq!(world.body_type(id), Some(RigidBodyType::Fixed));
        }
        assert_eq!(world.body_position(walls[0]), Some(Vec2::new(-5.0, 25.0)));
        assert_eq!(world.body_position(walls[3]), Some(Vec2::new(50.0, 55.0)));
    }
    #[test]
    fn resting_body_does_not_fall() {
        let mut world = PhysicsWorld::new();
        let id = world.create_body(RigidBodyType::Dynamic, Vec2::new(10.0, 20.0), 0.0);
        world
            .add_collider(id, ColliderShape::Box { hx: 4.0, hy: 4.0 }, Material::default())
            .unwrap();
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        assert_eq!(world.body_position(id), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(world.linear_velocity(id), Some(Vec2::ZERO));
    }
}
