use anyhow::Result;
use glyphon::{
    Attrs, Buffer as GlyphonBuffer, Cache, Color, Family, FontSystem, Metrics, Resolution,
    Shaping, SwashCache, TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer,
    Viewport,
};
use wgpu::{
    CommandEncoder, LoadOp, Operations, RenderPassColorAttachment, RenderPassDescriptor,
    TextureFormat, TextureView,
};

use crate::math::Vec2;

/// One line of text queued for the current frame, in screen pixels.
#[derive(Clone, Debug)]
pub(crate) struct TextDraw {
    pub text: String,
    pub size: f32,
    /// Top-left corner of the text box.
    pub position: Vec2,
    pub color: [f32; 4],
}

/// GPU-side glyphon state, created on first use.
struct GpuText {
    atlas: TextAtlas,
    renderer: GlyphonTextRenderer,
    viewport: Viewport,
    // Keeps the pipeline cache alive for the atlas and viewport.
    _cache: Cache,
}

/// Text rendering on top of glyphon, using the system sans-serif font.
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    gpu: Option<GpuText>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            gpu: None,
        }
    }

    fn ensure_gpu(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, format: TextureFormat) {
        if self.gpu.is_some() {
            return;
        }
        let cache = Cache::new(device);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        let renderer =
            GlyphonTextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);
        let viewport = Viewport::new(device, &cache);
        self.gpu = Some(GpuText {
            atlas,
            renderer,
            viewport,
            _cache: cache,
        });
    }

    /// Width in pixels of `text` laid out on a single line.
    pub fn measure(&mut self, text: &str, size: f32) -> f32 {
        let buffer = self.shape(text, size);
        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0, f32::max)
    }

    fn shape(&mut self, text: &str, size: f32) -> GlyphonBuffer {
        let mut buffer = GlyphonBuffer::new(&mut self.font_system, Metrics::new(size, size * 1.2));
        buffer.set_size(&mut self.font_system, None, None);
        let attrs = Attrs::new().family(Family::SansSerif);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Prepare and draw every queued text line onto `view` in one pass.
    pub(crate) fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: TextureFormat,
        encoder: &mut CommandEncoder,
        view: &TextureView,
        surface_size: (u32, u32),
        draws: &[TextDraw],
    ) -> Result<()> {
        if draws.is_empty() {
            return Ok(());
        }
        self.ensure_gpu(device, queue, format);

        let buffers: Vec<GlyphonBuffer> = draws
            .iter()
            .map(|draw| self.shape(&draw.text, draw.size))
            .collect();

        let (width, height) = surface_size;
        let areas = draws.iter().zip(&buffers).map(|(draw, buffer)| TextArea {
            buffer,
            left: draw.position.x,
            top: draw.position.y,
            scale: 1.0,
            bounds: TextBounds {
                left: 0,
                top: 0,
                right: width as i32,
                bottom: height as i32,
            },
            default_color: to_glyphon_color(draw.color),
            custom_glyphs: &[],
        });

        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };
        gpu.viewport.update(queue, Resolution { width, height });
        gpu.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut gpu.atlas,
            &gpu.viewport,
            areas,
            &mut self.swash_cache,
        )?;

        {
            let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("text-pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                multiview_mask: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            gpu.renderer.render(&gpu.atlas, &gpu.viewport, &mut pass)?;
        }

        gpu.atlas.trim();
        Ok(())
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_glyphon_color(color: [f32; 4]) -> Color {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::rgba(
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        channel(color[3]),
    )
}
