//! The courtyard simulation, independent of any window or GPU.
//!
//! [`Courtyard`] owns physics, the hero, the walls, the trophy and the
//! camera. The windowed game feeds it a [`FrameInput`] and a [`FrameClock`]
//! each frame and draws whatever it exposes.

use anyhow::{Context, Result};
use stage2d::{
    ActionId, AnimationLibrary, AnimationPlayer, BodyId, Camera2D, CameraFollow, ColliderShape,
    InputMap, InputState, KeyCode, Material, PhysicsWorld, RigidBodyType, Vec2, FIXED_TIMESTEP,
};

use crate::{
    config::SceneConfig,
    direction::{DirectionResolver, Facing, MoveInput},
    interaction::{InteractionEvent, Prompt, ProximityTrigger},
    level::{Level, WallSpec, HERO_CHAMFER, HERO_FRAME_SIZE, TROPHY_SIZE, WALL_TEXTURE_SIZE},
    sprites,
};

/// Controls sampled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub movement: MoveInput,
    /// True only on the frame the interact key went down.
    pub interact_pressed: bool,
}

/// Time the host granted for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    /// Wall-clock frame time in seconds, drives animations.
    pub dt: f32,
    /// Physics steps due this frame.
    pub fixed_steps: u32,
    pub fixed_dt: f32,
}

impl FrameClock {
    /// A frame that covers exactly `steps` fixed steps.
    pub fn steps(steps: u32) -> Self {
        let fixed_dt = FIXED_TIMESTEP.as_secs_f32();
        Self {
            dt: fixed_dt * steps as f32,
            fixed_steps: steps,
            fixed_dt,
        }
    }
}

/// Key bindings for the demo's actions.
#[derive(Clone, Debug)]
pub struct Controls {
    map: InputMap,
    left: ActionId,
    right: ActionId,
    up: ActionId,
    down: ActionId,
    interact: ActionId,
}

impl Controls {
    pub fn new(interact_key: KeyCode) -> Self {
        let map = InputMap::new()
            .with_binding("left", &[KeyCode::ArrowLeft, KeyCode::KeyA])
            .with_binding("right", &[KeyCode::ArrowRight, KeyCode::KeyD])
            .with_binding("up", &[KeyCode::ArrowUp, KeyCode::KeyW])
            .with_binding("down", &[KeyCode::ArrowDown, KeyCode::KeyS])
            .with_binding("interact", &[interact_key]);

        Self {
            map,
            left: ActionId::new("left"),
            right: ActionId::new("right"),
            up: ActionId::new("up"),
            down: ActionId::new("down"),
            interact: ActionId::new("interact"),
        }
    }

    pub fn sample(&self, input: &InputState) -> FrameInput {
        FrameInput {
            movement: MoveInput::new(
                self.map.action_down(input, &self.left),
                self.map.action_down(input, &self.right),
                self.map.action_down(input, &self.up),
                self.map.action_down(input, &self.down),
            ),
            interact_pressed: self.map.action_pressed(input, &self.interact),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trophy {
    pub position: Vec2,
    pub size: Vec2,
}

pub struct Courtyard {
    config: SceneConfig,
    level: Level,
    physics: PhysicsWorld,
    hero: BodyId,
    walls: Vec<WallSpec>,
    resolver: DirectionResolver,
    animations: Option<AnimationLibrary>,
    player: AnimationPlayer,
    trophy: Option<Trophy>,
    trigger: ProximityTrigger,
    prompt: Prompt,
    camera: Camera2D,
    follow: Option<CameraFollow>,
    viewport: (u32, u32),
    collected: u32,
}

impl Courtyard {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate().context("invalid scene config")?;
        let level = Level::standard().with_world_size(config.world_size);

        let mut physics = PhysicsWorld::new();
        let mut walls = Vec::new();
        if config.walls {
            physics
                .set_bounds(level.bounds, level.boundary_thickness)
                .context("creating world bounds")?;
            for wall in &level.walls {
                physics
                    .add_static_box(
                        wall.position,
                        wall.rotation_radians(),
                        wall.half_extents(WALL_TEXTURE_SIZE),
                    )
                    .context("creating wall")?;
            }
            walls = level.walls.clone();
        }

        let hero = physics.create_body(RigidBodyType::Dynamic, level.hero_spawn, 0.0);
        physics.add_collider(
            hero,
            ColliderShape::chamfered(HERO_FRAME_SIZE.x, HERO_FRAME_SIZE.y, HERO_CHAMFER),
            Material {
                friction: 0.0,
                ..Material::default()
            },
        )?;
        physics.lock_rotations(hero, true);

        let mut player = AnimationPlayer::new();
        let animations = if config.animations {
            let library = sprites::hero_animations(sprites::hero_sheet())?;
            player.play(&library, Facing::default().idle_key(), true)?;
            Some(library)
        } else {
            None
        };

        let trophy = config.trophy.enabled.then_some(Trophy {
            position: level.trophy_position,
            size: TROPHY_SIZE,
        });

        let camera = Camera2D::new(level.hero_spawn)
            .with_zoom(if config.camera.follow { config.camera.zoom } else { 1.0 })
            .with_bounds(level.bounds)
            .with_round_pixels(config.camera.round_pixels);
        let follow = config.camera.follow.then(|| {
            CameraFollow::new()
                .with_dead_zone(config.camera.dead_zone.x, config.camera.dead_zone.y)
                .with_lerp(config.camera.lerp.x, config.camera.lerp.y)
        });

        log::info!(
            "Courtyard {:?}: {} walls, trophy {}, {:?} tie-break",
            config.variant,
            walls.len(),
            if trophy.is_some() { "on" } else { "off" },
            config.tie_break
        );

        let mut scene = Self {
            resolver: DirectionResolver::new(config.speed, config.tie_break),
            trigger: ProximityTrigger::new(config.trophy.radius),
            prompt: Prompt::new(config.trophy.prompt(), config.trophy.prompt_offset),
            config,
            level,
            physics,
            hero,
            walls,
            animations,
            player,
            trophy,
            camera,
            follow,
            viewport: (1280, 720),
            collected: 0,
        };
        scene.reset_camera();
        Ok(scene)
    }

    /// Advance one frame. Returns the interaction event of this frame, if any.
    pub fn update(&mut self, input: &FrameInput, clock: FrameClock) -> Result<Option<InteractionEvent>> {
        let resolution = self.resolver.update(input.movement);
        if let Some(library) = &self.animations {
            self.player.play(library, resolution.animation_key(), true)?;
        }

        for _ in 0..clock.fixed_steps {
            self.physics.set_linear_velocity(self.hero, resolution.velocity);
            self.physics.step(clock.fixed_dt);
        }
        if clock.fixed_steps == 0 {
            self.physics.set_linear_velocity(self.hero, resolution.velocity);
        }

        if let Some(library) = &self.animations {
            self.player.update(library, clock.dt);
        }

        let hero = self.hero_position();
        if let Some(follow) = &self.follow {
            follow.update(&mut self.camera, hero, self.viewport);
        }

        let anchor = self.trophy.map(|t| t.position);
        let event = self.trigger.update(hero, anchor, input.interact_pressed);
        if event == Some(InteractionEvent::Collected) {
            if let Some(trophy) = self.trophy.take() {
                self.collected += 1;
                log::info!("Trophy collected at ({}, {})", trophy.position.x, trophy.position.y);
            }
        }
        self.prompt.follow(&self.trigger, self.trophy.map(|t| t.position));

        Ok(event)
    }

    /// Resize the viewport the camera frames. Zero sizes count as one pixel.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let size = (width.max(1), height.max(1));
        let resized = self.viewport != size;
        self.viewport = size;
        if resized {
            match self.follow {
                Some(_) => self.camera.clamp_to_bounds(self.viewport.0, self.viewport.1),
                None => self.reset_camera(),
            }
        }
    }

    fn reset_camera(&mut self) {
        let (w, h) = self.viewport;
        match &self.follow {
            Some(follow) => {
                let hero = self.hero_position();
                follow.snap(&mut self.camera, hero, (w, h));
            }
            // Fixed view on the spawn point, kept inside the world.
            None => {
                self.camera.position = self.level.hero_spawn;
                self.camera.clamp_to_bounds(w, h);
            }
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn hero_position(&self) -> Vec2 {
        self.physics
            .body_position(self.hero)
            .unwrap_or(self.level.hero_spawn)
    }

    pub fn hero_velocity(&self) -> Vec2 {
        self.physics.linear_velocity(self.hero).unwrap_or(Vec2::ZERO)
    }

    pub fn facing(&self) -> Facing {
        self.resolver.facing()
    }

    /// Key of the hero's current animation, when animations are enabled.
    pub fn hero_animation(&self) -> Option<&str> {
        self.animations.as_ref().and(self.player.current_key())
    }

    /// Sheet frame to draw for the hero.
    pub fn hero_frame(&self) -> usize {
        self.animations
            .as_ref()
            .and_then(|library| self.player.current_frame(library))
            .unwrap_or(0)
    }

    pub fn trophy(&self) -> Option<&Trophy> {
        self.trophy.as_ref()
    }

    pub fn trophies_collected(&self) -> u32 {
        self.collected
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn walls(&self) -> &[WallSpec] {
        &self.walls
    }
}
