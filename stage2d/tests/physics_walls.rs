use stage2d::{ColliderShape, Material, PhysicsWorld, Rect, RigidBodyType, Vec2};

const DT: f32 = 1.0 / 60.0;

fn hero(world: &mut PhysicsWorld, at: Vec2) -> stage2d::BodyId {
    let id = world.create_body(RigidBodyType::Dynamic, at, 0.0);
    world
        .add_collider(id, ColliderShape::chamfered(48.0, 48.0, 12.0), Material::default())
        .unwrap();
    world.lock_rotations(id, true);
    id
}

#[test]
fn static_wall_blocks_a_moving_body() {
    let mut world = PhysicsWorld::new();
    // Wall face at x = 200.
    world
        .add_static_box(Vec2::new(216.0, 0.0), 0.0, Vec2::new(16.0, 400.0))
        .unwrap();
    let body = hero(&mut world, Vec2::new(0.0, 0.0));

    for _ in 0..180 {
        world.set_linear_velocity(body, Vec2::new(600.0, 0.0));
        world.step(DT);
    }

    let pos = world.body_position(body).unwrap();
    assert!(pos.x < 200.0, "body passed through the wall: {pos:?}");
    assert!(pos.x > 150.0, "body stopped short of the wall: {pos:?}");
    assert!(pos.y.abs() < 1.0);
}

#[test]
fn world_bounds_keep_a_body_inside() {
    let mut world = PhysicsWorld::new();
    let bounds = Rect::from_size(400.0, 300.0);
    world.set_bounds(bounds, 64.0).unwrap();
    let body = hero(&mut world, Vec2::new(200.0, 150.0));

    for _ in 0..240 {
        world.set_linear_velocity(body, Vec2::new(-424.0, -424.0));
        world.step(DT);
    }

    let pos = world.body_position(body).unwrap();
    assert!(bounds.contains(pos), "body escaped the bounds: {pos:?}");
    assert!(pos.x < 40.0 && pos.y < 40.0);
}

#[test]
fn locked_rotation_survives_glancing_contact() {
    let mut world = PhysicsWorld::new();
    world
        .add_static_box(Vec2::new(100.0, 0.0), 0.3, Vec2::new(16.0, 200.0))
        .unwrap();
    let body = hero(&mut world, Vec2::new(0.0, 0.0));

    for _ in 0..120 {
        world.set_linear_velocity(body, Vec2::new(300.0, 100.0));
        world.step(DT);
    }

    let rotation = world.body_rotation(body).unwrap();
    assert!(rotation.abs() < 1e-4, "body rotated: {rotation}");
}
