//! Windowed front end: feeds host input into [`Courtyard`] and draws it.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use stage2d::{
    EngineContext, Game, Renderer, Sprite, SpriteSheet, TextureFilter, TextureHandle, Vec2,
};

use crate::{
    config::SceneConfig,
    interaction::InteractionEvent,
    level::{HERO_FRAME_SIZE, WALL_TEXTURE_SIZE},
    scene::{Controls, Courtyard, FrameClock},
    sprites,
};

const PROMPT_SIZE: f32 = 20.0;
const HUD_SIZE: f32 = 18.0;
const TEXT_COLOR: [f32; 4] = [0.12, 0.12, 0.18, 1.0];

struct Textures {
    hero: TextureHandle,
    hero_sheet: SpriteSheet,
    wall: TextureHandle,
    wall_size: Vec2,
    trophy: TextureHandle,
    trophy_size: Vec2,
}

pub struct CourtyardGame {
    scene: Courtyard,
    controls: Controls,
    assets_dir: PathBuf,
    textures: Option<Textures>,
}

impl CourtyardGame {
    pub fn new(config: SceneConfig, assets_dir: impl Into<PathBuf>) -> Result<Self> {
        let controls = Controls::new(config.trophy.interact_key.key_code());
        Ok(Self {
            scene: Courtyard::new(config)?,
            controls,
            assets_dir: assets_dir.into(),
            textures: None,
        })
    }

    pub fn scene(&self) -> &Courtyard {
        &self.scene
    }

    fn load_textures(&self, ctx: &mut EngineContext<'_>) -> Result<Textures> {
        let (renderer, assets) = ctx.renderer_and_assets();
        let dir = &self.assets_dir;

        let hero = assets.load_or_generate(
            renderer,
            "hero",
            &dir.join(sprites::HERO_SHEET_FILE),
            TextureFilter::Nearest,
            sprites::generate_hero_sheet,
        )?;
        let wall = assets.load_or_generate(
            renderer,
            "wall",
            &dir.join(sprites::WALL_FILE),
            TextureFilter::Nearest,
            sprites::generate_wall,
        )?;
        let trophy = assets.load_or_generate(
            renderer,
            "trophy",
            &dir.join(sprites::TROPHY_FILE),
            TextureFilter::Nearest,
            sprites::generate_trophy,
        )?;

        let (hero_w, hero_h) = texture_size(renderer, hero)?;
        let hero_sheet =
            SpriteSheet::from_texture_size(hero_w, hero_h, sprites::HERO_FRAME, sprites::HERO_FRAME)?;
        if hero_sheet.frame_count() < sprites::hero_sheet().frame_count() {
            log::warn!(
                "Hero sheet has {} frames, animations expect {}",
                hero_sheet.frame_count(),
                sprites::hero_sheet().frame_count()
            );
        }

        Ok(Textures {
            hero,
            hero_sheet,
            wall,
            wall_size: size_vec(texture_size(renderer, wall)?),
            trophy,
            trophy_size: size_vec(texture_size(renderer, trophy)?),
        })
    }
}

fn texture_size(renderer: &Renderer<'_>, handle: TextureHandle) -> Result<(u32, u32)> {
    renderer
        .texture_size(handle)
        .ok_or_else(|| anyhow!("texture {handle:?} is not loaded"))
}

fn size_vec((w, h): (u32, u32)) -> Vec2 {
    Vec2::new(w as f32, h as f32)
}

/// Scale that stretches a texture of `texture` pixels over `target` pixels.
fn fit(target: Vec2, texture: Vec2) -> Vec2 {
    Vec2::new(target.x / texture.x, target.y / texture.y)
}

impl Game for CourtyardGame {
    fn init(&mut self, ctx: &mut EngineContext<'_>) -> Result<()> {
        self.textures = Some(self.load_textures(ctx)?);
        let (w, h) = ctx.viewport();
        self.scene.set_viewport(w, h);
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext<'_>) -> Result<()> {
        let (w, h) = ctx.viewport();
        self.scene.set_viewport(w, h);

        let input = self.controls.sample(ctx.input());
        let clock = FrameClock {
            dt: ctx.delta_time().as_secs_f32(),
            fixed_steps: ctx.fixed_steps(),
            fixed_dt: ctx.fixed_delta_time().as_secs_f32(),
        };

        if self.scene.update(&input, clock)? == Some(InteractionEvent::Collected) {
            ctx.window().set_title("Courtyard - trophy collected");
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut EngineContext<'_>) -> Result<()> {
        let Some(textures) = &self.textures else {
            return Ok(());
        };
        let scene = &self.scene;
        let camera = *scene.camera();
        let renderer = ctx.renderer();
        let (screen_w, screen_h) = renderer.surface_size();

        let mut frame = renderer.begin_frame()?;
        renderer.clear(&mut frame, scene.config().clear_color)?;

        for wall in scene.walls() {
            let mut sprite = Sprite::new(textures.wall).at(wall.position);
            sprite.transform.rotation = wall.rotation_radians();
            sprite.transform.scale = fit(
                wall.half_extents(WALL_TEXTURE_SIZE) * 2.0,
                textures.wall_size,
            );
            renderer.draw_sprite(&mut frame, &sprite, &camera)?;
        }

        if let Some(trophy) = scene.trophy() {
            let mut sprite = Sprite::new(textures.trophy).at(trophy.position);
            sprite.transform.scale = fit(trophy.size, textures.trophy_size);
            renderer.draw_sprite(&mut frame, &sprite, &camera)?;
        }

        let mut hero = Sprite::new(textures.hero)
            .at(scene.hero_position())
            .with_region(textures.hero_sheet.frame_uv(scene.hero_frame()));
        hero.transform.scale = fit(HERO_FRAME_SIZE, textures.hero_sheet.frame_size());
        renderer.draw_sprite(&mut frame, &hero, &camera)?;

        let prompt = scene.prompt();
        if prompt.visible {
            let width = renderer.measure_text_width(&prompt.text, PROMPT_SIZE);
            let anchor = camera.world_to_screen(prompt.position, screen_w, screen_h);
            let top_left = anchor - Vec2::new(width * 0.5, PROMPT_SIZE * 0.5);
            renderer.draw_screen_text(&mut frame, &prompt.text, PROMPT_SIZE, top_left, TEXT_COLOR);
        }

        let mut hud = format!("{:?} - arrows / WASD to move", scene.config().variant);
        if scene.config().trophy.enabled {
            hud.push_str(&format!(
                ", {} to collect - trophies: {}",
                scene.config().trophy.interact_key.label(),
                scene.trophies_collected()
            ));
        }
        renderer.draw_screen_text(&mut frame, &hud, HUD_SIZE, Vec2::new(12.0, 10.0), TEXT_COLOR);

        renderer.end_frame(frame)
    }
}
