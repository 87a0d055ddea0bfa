use std::time::{Duration, Instant};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use crate::{assets::AssetManager, input::InputState, render::Renderer};

/// Physics and other fixed-rate work runs at 60 Hz.
pub const FIXED_TIMESTEP: Duration = Duration::from_nanos(16_666_667);

/// Fixed steps are capped per frame so a long stall does not snowball.
const MAX_FIXED_STEPS: u32 = 8;

/// Window and runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Stage2D".into(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Main entrypoint for running a game on the host.
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Engine with the default 1280 x 720 vsynced window.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Enable or disable vsync. Without it the surface prefers mailbox or
    /// immediate presentation when the adapter offers them.
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.config.vsync = vsync;
        self
    }

    /// Open the window and run `game` until the window is closed or Escape
    /// is pressed. Errors from `init` are returned; errors from `update` or
    /// `draw` are logged and end the loop.
    #[allow(deprecated)]
    pub fn run<G: Game + 'static>(self, mut game: G) -> Result<()> {
        let config = self.config;

        let event_loop = EventLoop::new()?;
        let mut window_attributes = Window::default_attributes();
        window_attributes.title = config.title.clone();
        window_attributes.inner_size = Some(LogicalSize::new(config.width, config.height).into());
        let window = event_loop.create_window(window_attributes)?;

        // The surface borrows the window for as long as the loop runs.
        let window: &'static Window = Box::leak(Box::new(window));

        let mut ctx = EngineContext::new(window, &config)?;
        game.init(&mut ctx)?;
        log::info!("Running `{}` at {}x{}", config.title, config.width, config.height);

        let mut last_frame = Instant::now();
        event_loop.run(move |event, elwt| match event {
            Event::NewEvents(_) => {
                ctx.begin_frame();
            }
            Event::WindowEvent { event, .. } => {
                ctx.handle_window_event(&event);

                match event {
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if is_escape_pressed(&event) {
                            elwt.exit();
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        ctx.resize_renderer(new_size);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = game.draw(&mut ctx) {
                            log::error!("Error during draw: {err:?}");
                            elwt.exit();
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                ctx.update_time(now - last_frame);
                last_frame = now;

                if let Err(err) = game.update(&mut ctx) {
                    log::error!("Error during update: {err:?}");
                    elwt.exit();
                    return;
                }

                ctx.window.request_redraw();
            }
            _ => {}
        })?;

        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn is_escape_pressed(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && matches!(event.physical_key, PhysicalKey::Code(KeyCode::Escape))
}

/// Accumulates frame time and hands it out in fixed steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock {
    step: Duration,
    accumulator: Duration,
}

impl FixedClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    /// Length of one fixed step.
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add frame time and return how many fixed steps are now due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta;
        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_FIXED_STEPS {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == MAX_FIXED_STEPS && self.accumulator >= self.step {
            log::debug!("Dropping {:?} of simulation time", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Time carried over to the next frame.
    pub fn pending(&self) -> Duration {
        self.accumulator
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(FIXED_TIMESTEP)
    }
}

/// Shared context provided to game code each frame.
pub struct EngineContext<'window> {
    window: &'window Window,
    delta_time: Duration,
    fixed_clock: FixedClock,
    fixed_steps: u32,
    input: InputState,
    renderer: Renderer<'window>,
    assets: AssetManager,
}

impl<'window> EngineContext<'window> {
    fn new(window: &'window Window, config: &EngineConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync)?;

        Ok(Self {
            window,
            delta_time: Duration::ZERO,
            fixed_clock: FixedClock::default(),
            fixed_steps: 0,
            input: InputState::new(),
            renderer,
            assets: AssetManager::new(),
        })
    }

    fn begin_frame(&mut self) {
        self.input.begin_frame();
    }

    fn update_time(&mut self, delta: Duration) {
        self.delta_time = delta;
        self.fixed_steps = self.fixed_clock.advance(delta);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            self.input.handle_key(event);
        }
    }

    fn resize_renderer(&mut self, new_size: PhysicalSize<u32>) {
        self.renderer.resize(new_size);
    }

    /// Duration between the current and previous frames.
    pub fn delta_time(&self) -> Duration {
        self.delta_time
    }

    pub fn fixed_delta_time(&self) -> Duration {
        self.fixed_clock.step()
    }

    /// Number of fixed steps due this frame.
    pub fn fixed_steps(&self) -> u32 {
        self.fixed_steps
    }

    pub fn window(&self) -> &Window {
        self.window
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn renderer(&mut self) -> &mut Renderer<'window> {
        &mut self.renderer
    }

    /// Renderer and asset cache borrowed together, for texture loading.
    pub fn renderer_and_assets(&mut self) -> (&mut Renderer<'window>, &mut AssetManager) {
        (&mut self.renderer, &mut self.assets)
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.renderer.surface_size()
    }
}

/// Trait implemented by user code to hook into the engine lifecycle.
pub trait Game {
    /// Called once after the window is created but before the first frame.
    fn init(&mut self, _ctx: &mut EngineContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Update game state. Called once per frame before drawing.
    fn update(&mut self, ctx: &mut EngineContext<'_>) -> Result<()>;

    /// Draw the current frame.
    fn draw(&mut self, ctx: &mut EngineContext<'_>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_hands_out_whole_steps() {
        let mut clock = FixedClock::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert_eq!(clock.pending(), Duration::from_millis(5));
        assert_eq!(clock.advance(Duration::from_millis(5)), 1);
        assert_eq!(clock.advance(Duration::from_millis(3)), 0);
    }

    #[test]
    fn fixed_clock_drops_backlog_after_stall() {
        let mut clock = FixedClock::new(Duration::from_millis(10));
        assert_eq!(clock.advance(Duration::from_secs(5)), MAX_FIXED_STEPS);
        assert_eq!(clock.advance(Duration::ZERO), 0);
        assert_eq!(clock.pending(), Duration::ZERO);
    }

    #[test]
    fn engine_config_fills_missing_fields() {
        let config: EngineConfig = serde_json::from_str(r#"{ "title": "demo" }"#).unwrap();
        assert_eq!(config.title, "demo");
        assert_eq!(config.width, 1280);
        assert!(config.vsync);
    }
}
