use courtyard::{
    Courtyard, Facing, FrameClock, FrameInput, InteractionEvent, MoveInput, SceneConfig, Variant,
};
use stage2d::Vec2;

fn hold(movement: MoveInput) -> FrameInput {
    FrameInput {
        movement,
        interact_pressed: false,
    }
}

fn down() -> MoveInput {
    MoveInput::new(false, false, false, true)
}

fn interact() -> FrameInput {
    FrameInput {
        movement: MoveInput::default(),
        interact_pressed: true,
    }
}

#[test]
fn walk_to_trophy_and_collect_it_once() {
    let mut scene = Courtyard::new(SceneConfig::preset(Variant::Trophy)).unwrap();
    assert!(scene.trophy().is_some());
    assert!(!scene.prompt().visible);

    // Pressing far away does nothing.
    assert_eq!(scene.update(&interact(), FrameClock::steps(1)).unwrap(), None);
    assert!(scene.trophy().is_some());

    let mut entered = false;
    for _ in 0..200 {
        if scene.update(&hold(down()), FrameClock::steps(1)).unwrap()
            == Some(InteractionEvent::Entered)
        {
            entered = true;
            break;
        }
    }
    assert!(entered, "never reached the trophy, hero at {:?}", scene.hero_position());
    assert!(scene.prompt().visible);
    assert_eq!(scene.prompt().position, Vec2::new(1600.0, 952.0));
    assert_eq!(scene.facing(), Facing::Down);
    assert_eq!(scene.hero_animation(), Some("down"));

    assert_eq!(
        scene.update(&interact(), FrameClock::steps(1)).unwrap(),
        Some(InteractionEvent::Collected)
    );
    assert!(scene.trophy().is_none());
    assert!(!scene.prompt().visible);
    assert_eq!(scene.trophies_collected(), 1);
    assert_eq!(scene.hero_animation(), Some("turn_d"));

    // Later presses are harmless.
    for _ in 0..3 {
        assert_eq!(scene.update(&interact(), FrameClock::steps(1)).unwrap(), None);
    }
    assert_eq!(scene.trophies_collected(), 1);
}

#[test]
fn wall_stops_the_hero() {
    let mut scene = Courtyard::new(SceneConfig::preset(Variant::Walled)).unwrap();
    let left = MoveInput::new(true, false, false, false);
    for _ in 0..240 {
        scene.update(&hold(left), FrameClock::steps(1)).unwrap();
    }
    // The vertical wall at x = 400 is 64 px thick and the hero 48 px wide.
    let hero = scene.hero_position();
    assert!(hero.x > 440.0, "hero went through the wall: {hero:?}");
    assert!(hero.x < 470.0, "hero stopped early: {hero:?}");
}

#[test]
fn follow_camera_respects_dead_zone_and_bounds() {
    let mut scene = Courtyard::new(SceneConfig::preset(Variant::Follow)).unwrap();
    scene.set_viewport(1280, 720);
    let start = scene.camera().position;

    // One 10 px step stays inside the 25 px dead zone.
    let right = MoveInput::new(false, true, false, false);
    scene.update(&hold(right), FrameClock::steps(1)).unwrap();
    assert_eq!(scene.camera().position.x, start.x);

    let up_left = MoveInput::new(true, false, true, false);
    for _ in 0..400 {
        scene.update(&hold(up_left), FrameClock::steps(1)).unwrap();
        let (min, max) = scene.camera().viewport_bounds(1280, 720);
        let bounds = scene.level().bounds;
        assert!(min.x >= bounds.min.x - 0.5 && min.y >= bounds.min.y - 0.5, "{min:?}");
        assert!(max.x <= bounds.max.x + 0.5 && max.y <= bounds.max.y + 0.5, "{max:?}");
    }
}

#[test]
fn camera_eases_towards_hero() {
    let mut scene = Courtyard::new(SceneConfig::preset(Variant::Follow)).unwrap();
    scene.set_viewport(1280, 720);
    let down = MoveInput::new(false, false, false, true);
    for _ in 0..60 {
        scene.update(&hold(down), FrameClock::steps(1)).unwrap();
    }
    let hero = scene.hero_position();
    let camera = scene.camera().position;
    // Lagging behind, but not by more than a few frames of travel.
    assert!(camera.y < hero.y);
    assert!(hero.y - camera.y < 120.0, "camera {camera:?}, hero {hero:?}");
}

#[test]
fn frames_without_fixed_steps_do_not_move_the_hero() {
    let mut scene = Courtyard::new(SceneConfig::preset(Variant::Basic)).unwrap();
    let start = scene.hero_position();
    let clock = FrameClock {
        dt: 0.004,
        fixed_steps: 0,
        fixed_dt: 1.0 / 60.0,
    };
    scene.update(&hold(down()), clock).unwrap();
    assert_eq!(scene.hero_position(), start);
}
