use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use wgpu::{
    vertex_attr_array, AddressMode, BindGroup, BindGroupDescriptor, BindGroupEntry,
    BindGroupLayout, BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindingResource,
    BindingType, Buffer, BufferBindingType, BufferUsages, ColorTargetState, ColorWrites,
    CommandEncoder, CommandEncoderDescriptor, DeviceDescriptor, Extent3d, FilterMode,
    FragmentState, Instance, LoadOp, MultisampleState, Operations, Origin3d,
    PipelineLayoutDescriptor, PresentMode, PrimitiveState, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, RequestAdapterOptions, Sampler,
    SamplerBindingType, SamplerDescriptor, ShaderModuleDescriptor, ShaderSource,
    SurfaceConfiguration, TexelCopyBufferLayout, TexelCopyTextureInfo, Texture, TextureAspect,
    TextureDescriptor, TextureDimension, TextureFormat, TextureSampleType, TextureUsages,
    TextureView, TextureViewDescriptor, TextureViewDimension, VertexState,
};
use winit::{dpi::PhysicalSize, window::Window};

use crate::{
    math::{Camera2D, Vec2},
    render::sprite::{Sprite, TextureFilter, TextureHandle},
    render::text::{TextDraw, TextRenderer},
};

/// Queued sprite draw, resolved to a bind group when the frame is flushed.
struct SpriteDrawCommand {
    uniform_offset: u64,
    texture_handle: TextureHandle,
}

/// Wrapper around wgpu surface/device setup and simple frame management.
pub struct Renderer<'window> {
    backend: WgpuBackend<'window>,
}

impl<'window> Renderer<'window> {
    pub fn new(window: &'window Window, vsync: bool) -> Result<Self> {
        let backend = WgpuBackend::new(window, vsync)?;
        Ok(Self { backend })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.backend.resize(new_size);
    }

    pub fn begin_frame(&mut self) -> Result<Frame> {
        self.backend.begin_frame()
    }

    pub fn clear(&mut self, frame: &mut Frame, color: [f32; 4]) -> Result<()> {
        self.backend.clear(frame, color)
    }

    /// Queue a sprite (or its source region) in world space.
    pub fn draw_sprite(&mut self, frame: &mut Frame, sprite: &Sprite, camera: &Camera2D) -> Result<()> {
        self.backend.draw_sprite(frame, sprite, camera)
    }

    /// Queue text at a screen position in pixels (0,0 = top-left).
    pub fn draw_screen_text(
        &mut self,
        frame: &mut Frame,
        text: &str,
        size: f32,
        position: Vec2,
        color: [f32; 4],
    ) {
        frame.text_draws.push(TextDraw {
            text: text.to_string(),
            size,
            position,
            color,
        });
    }

    /// Width in pixels of a single line of text.
    pub fn measure_text_width(&mut self, text: &str, size: f32) -> f32 {
        self.backend.text_renderer.measure(text, size)
    }

    pub fn end_frame(&mut self, frame: Frame) -> Result<()> {
        self.backend.end_frame(frame)
    }

    pub fn load_texture_from_file(&mut self, path: &Path, filter: TextureFilter) -> Result<TextureHandle> {
        self.backend.load_texture_from_file(path, filter)
    }

    /// Load a texture from raw RGBA8 data (no PNG decoding).
    ///
    /// `data` must be `width * height * 4` bytes.
    pub fn load_texture_from_rgba(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        filter: TextureFilter,
    ) -> Result<TextureHandle> {
        self.backend.load_texture_from_rgba(data, width, height, filter)
    }

    pub fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.backend.texture_size(handle)
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.backend.surface_size()
    }
}

pub struct Frame {
    surface_texture: Option<wgpu::SurfaceTexture>,
    view: TextureView,
    encoder: Option<CommandEncoder>,
    sprite_draws: Vec<SpriteDrawCommand>,
    text_draws: Vec<TextDraw>,
}

impl Drop for Frame {
    fn drop(&mut self) {
        // A frame dropped without end_frame still has to hand its texture back.
        if let Some(surface_texture) = self.surface_texture.take() {
            surface_texture.present();
        }
    }
}

struct TextureEntry {
    /// Must be kept alive for the view/sampler to be valid.
    _texture: Texture,
    view: TextureView,
    sampler: Sampler,
    size: (u32, u32),
}

struct SpritePipeline {
    pipeline: RenderPipeline,
    vertex_buffer: Buffer,
    uniform_buffer: Buffer,
    bind_group_layout: BindGroupLayout,
    uniform_alignment: u64,
}

const MAX_SPRITES_PER_FRAME: u64 = 2048;

struct WgpuBackend<'window> {
    surface: wgpu::Surface<'window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: SurfaceConfiguration,
    present_mode: PresentMode,
    sprite_pipeline: SpritePipeline,
    textures: HashMap<TextureHandle, TextureEntry>,
    next_texture_id: u32,
    uniform_write_offset: u64,
    // The uniform buffer never changes, so one bind group per texture lives
    // for the whole run; the dynamic offset selects the sprite's uniforms.
    bind_groups: HashMap<TextureHandle, BindGroup>,
    text_renderer: TextRenderer,
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct SpriteVertex {
    position: [f32; 2],
    uv: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct SpriteUniforms {
    mvp: [[f32; 4]; 4],
    color: [f32; 4],
    uv_offset: [f32; 2],
    uv_scale: [f32; 2],
}

const fn quad_vertex(x: f32, y: f32) -> SpriteVertex {
    SpriteVertex {
        position: [x, y],
        uv: [x + 0.5, y + 0.5],
    }
}

/// Unit quad centred on the origin, two triangles. UV (0,0) is the top-left.
const SPRITE_VERTICES: [SpriteVertex; 6] = [
    quad_vertex(-0.5, -0.5),
    quad_vertex(0.5, -0.5),
    quad_vertex(0.5, 0.5),
    quad_vertex(-0.5, -0.5),
    quad_vertex(0.5, 0.5),
    quad_vertex(-0.5, 0.5),
];

impl<'window> WgpuBackend<'window> {
    fn new(window: &'window Window, vsync: bool) -> Result<Self> {
        let instance = Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("stage2d-device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: Default::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        }))?;

        let size = window.inner_size();
        let capabilities = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&capabilities.formats)
            .ok_or_else(|| anyhow!("Surface reports no supported formats"))?;

        let present_mode = choose_present_mode(&capabilities.present_modes, vsync);
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!(
            "Renderer ready: {}x{} {:?} {:?}",
            surface_config.width,
            surface_config.height,
            format,
            present_mode
        );

        let sprite_pipeline = create_sprite_pipeline(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            present_mode,
            sprite_pipeline,
            textures: HashMap::new(),
            next_texture_id: 1,
            uniform_write_offset: 0,
            bind_groups: HashMap::new(),
            text_renderer: TextRenderer::new(),
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.surface_config.width = new_size.width;
        self.surface_config.height = new_size.height;
        self.surface_config.present_mode = self.present_mode;
        self.surface.configure(&self.device, &self.surface_config);
    }

    fn begin_frame(&mut self) -> Result<Frame> {
        self.uniform_write_offset = 0;

        let surface_texture = loop {
            match self.surface.get_current_texture() {
                Ok(texture) => break texture,
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::debug!("Surface lost or outdated; reconfiguring");
                    self.surface.configure(&self.device, &self.surface_config);
                }
                Err(wgpu::SurfaceError::Timeout) => {}
                Err(err) => return Err(anyhow!("Cannot acquire the next frame: {err}")),
            }
        };

        let view = surface_texture
            .texture
            .create_view(&TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("stage2d-frame"),
            });

        Ok(Frame {
            surface_texture: Some(surface_texture),
            view,
            encoder: Some(encoder),
            sprite_draws: Vec::new(),
            text_draws: Vec::new(),
        })
    }

    fn clear(&mut self, frame: &mut Frame, color: [f32; 4]) -> Result<()> {
        let encoder = frame
            .encoder
            .as_mut()
            .ok_or_else(|| anyhow!("Frame already ended"))?;

        let pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("stage2d-clear"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(to_wgpu_color(color)),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            multiview_mask: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        drop(pass);

        Ok(())
    }

    fn draw_sprite(&mut self, frame: &mut Frame, sprite: &Sprite, camera: &Camera2D) -> Result<()> {
        let texture = self
            .textures
            .get(&sprite.texture)
            .ok_or_else(|| anyhow!("Unknown texture handle {:?}", sprite.texture))?;

        let stride = self.sprite_pipeline.uniform_alignment;
        if self.uniform_write_offset >= MAX_SPRITES_PER_FRAME * stride {
            return Err(anyhow!("More than {MAX_SPRITES_PER_FRAME} sprites in one frame"));
        }

        let (uv_offset, uv_scale) = uv_region(sprite.region);

        // The unit quad covers the source region at one texel per world unit.
        let base_size = Vec2::new(
            texture.size.0 as f32 * uv_scale[0],
            texture.size.1 as f32 * uv_scale[1],
        );
        let model = sprite.transform.to_matrix(base_size);
        let vp = camera.view_projection(self.surface_config.width, self.surface_config.height);

        let uniforms = SpriteUniforms {
            mvp: (vp * model).to_cols_array_2d(),
            color: sprite.tint,
            uv_offset,
            uv_scale,
        };

        let offset = self.uniform_write_offset;
        self.queue.write_buffer(
            &self.sprite_pipeline.uniform_buffer,
            offset,
            bytemuck::bytes_of(&uniforms),
        );

        if !self.bind_groups.contains_key(&sprite.texture) {
            let uniform_size = std::mem::size_of::<SpriteUniforms>() as u64;
            let bind_group = self.device.create_bind_group(&BindGroupDescriptor {
                label: Some("stage2d-sprite-bindings"),
                layout: &self.sprite_pipeline.bind_group_layout,
                entries: &[
                    BindGroupEntry {
                        binding: 0,
                        resource: BindingResource::Buffer(wgpu::BufferBinding {
                            buffer: &self.sprite_pipeline.uniform_buffer,
                            offset: 0,
                            size: std::num::NonZeroU64::new(uniform_size),
                        }),
                    },
                    BindGroupEntry {
                        binding: 1,
                        resource: BindingResource::TextureView(&texture.view),
                    },
                    BindGroupEntry {
                        binding: 2,
                        resource: BindingResource::Sampler(&texture.sampler),
                    },
                ],
            });
            self.bind_groups.insert(sprite.texture, bind_group);
        }

        frame.sprite_draws.push(SpriteDrawCommand {
            uniform_offset: offset,
            texture_handle: sprite.texture,
        });

        self.uniform_write_offset = offset + stride;

        Ok(())
    }

    fn flush_sprites(&mut self, frame: &mut Frame) -> Result<()> {
        if frame.sprite_draws.is_empty() {
            return Ok(());
        }

        let encoder = frame
            .encoder
            .as_mut()
            .ok_or_else(|| anyhow!("Frame already ended"))?;

        let mut pass = encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("stage2d-sprites"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view: &frame.view,
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

        pass.set_pipeline(&self.sprite_pipeline.pipeline);
        pass.set_vertex_buffer(0, self.sprite_pipeline.vertex_buffer.slice(..));

        for draw in &frame.sprite_draws {
            let bind_group = self
                .bind_groups
                .get(&draw.texture_handle)
                .ok_or_else(|| anyhow!("No bindings for {:?}", draw.texture_handle))?;
            pass.set_bind_group(0, bind_group, &[draw.uniform_offset as u32]);
            pass.draw(0..SPRITE_VERTICES.len() as u32, 0..1);
        }

        Ok(())
    }

    fn end_frame(&mut self, mut frame: Frame) -> Result<()> {
        self.flush_sprites(&mut frame)?;

        let text_draws = std::mem::take(&mut frame.text_draws);
        {
            let encoder = frame
                .encoder
                .as_mut()
                .ok_or_else(|| anyhow!("Frame already ended"))?;
            self.text_renderer.render(
                &self.device,
                &self.queue,
                self.surface_config.format,
                encoder,
                &frame.view,
                (self.surface_config.width, self.surface_config.height),
                &text_draws,
            )?;
        }

        let encoder = frame
            .encoder
            .take()
            .ok_or_else(|| anyhow!("Frame already ended"))?;
        self.queue.submit(Some(encoder.finish()));

        let surface_texture = frame
            .surface_texture
            .take()
            .ok_or_else(|| anyhow!("Frame already ended"))?;
        surface_texture.present();
        Ok(())
    }

    fn load_texture_from_file(&mut self, path: &Path, filter: TextureFilter) -> Result<TextureHandle> {
        let data = fs::read(path).with_context(|| format!("reading texture {}", path.display()))?;
        let image = image::load_from_memory(&data)
            .with_context(|| format!("decoding texture {}", path.display()))?
            .to_rgba8();
        let (width, height) = image.dimensions();
        self.load_texture_from_rgba(&image, width, height, filter)
    }

    fn load_texture_from_rgba(
        &mut self,
        data: &[u8],
        width: u32,
        height: u32,
        filter: TextureFilter,
    ) -> Result<TextureHandle> {
        check_rgba_len(data.len(), width, height)?;

        let size = Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some("stage2d-texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: TextureFormat::Rgba8UnormSrgb,
            usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            data,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&TextureViewDescriptor::default());

        let filter_mode = match filter {
            TextureFilter::Nearest => FilterMode::Nearest,
            TextureFilter::Linear => FilterMode::Linear,
        };
        let sampler = self.device.create_sampler(&SamplerDescriptor {
            label: Some("stage2d-sampler"),
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            address_mode_w: AddressMode::ClampToEdge,
            mag_filter: filter_mode,
            min_filter: filter_mode,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let handle = TextureHandle(self.next_texture_id);
        self.next_texture_id += 1;
        self.textures.insert(
            handle,
            TextureEntry {
                _texture: texture,
                view,
                sampler,
                size: (width, height),
            },
        );

        Ok(handle)
    }

    fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(&handle).map(|t| t.size)
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}

fn create_sprite_pipeline(device: &wgpu::Device, surface_format: TextureFormat) -> SpritePipeline {
    let shader = device.create_shader_module(ShaderModuleDescriptor {
        label: Some("stage2d-sprite-shader"),
        source: ShaderSource::Wgsl(include_str!("sprite.wgsl").into()),
    });

    let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some("stage2d-sprite-layout"),
        entries: &[
            BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: std::num::NonZeroU64::new(
                        std::mem::size_of::<SpriteUniforms>() as u64,
                    ),
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: BindingType::Texture {
                    sample_type: TextureSampleType::Float { filterable: true },
                    view_dimension: TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: BindingType::Sampler(SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
        label: Some("stage2d-sprite-pipeline-layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("stage2d-quad"),
        contents: bytemuck::cast_slice(&SPRITE_VERTICES),
        usage: BufferUsages::VERTEX,
    });

    let uniform_alignment = uniform_stride(
        std::mem::size_of::<SpriteUniforms>() as u64,
        device.limits().min_uniform_buffer_offset_alignment as u64,
    );

    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("stage2d-sprite-uniforms"),
        size: MAX_SPRITES_PER_FRAME * uniform_alignment,
        usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let pipeline = device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some("stage2d-sprite-pipeline"),
        layout: Some(&pipeline_layout),
        vertex: VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &vertex_attr_array![0 => Float32x2, 1 => Float32x2],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: PrimitiveState::default(),
        depth_stencil: None,
        multisample: MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    SpritePipeline {
        pipeline,
        vertex_buffer,
        uniform_buffer,
        bind_group_layout,
        uniform_alignment,
    }
}

fn choose_present_mode(modes: &[PresentMode], vsync: bool) -> PresentMode {
    if vsync {
        PresentMode::Fifo
    } else if modes.contains(&PresentMode::Mailbox) {
        PresentMode::Mailbox
    } else if modes.contains(&PresentMode::Immediate) {
        PresentMode::Immediate
    } else {
        PresentMode::Fifo
    }
}

/// First sRGB format, else whatever the surface lists first.
fn pick_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// Distance between consecutive sprites' uniforms in the dynamic buffer.
fn uniform_stride(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment.max(1)) * alignment.max(1)
}

/// UV offset and scale for a sprite region, the whole texture when unset.
fn uv_region(region: Option<[f32; 4]>) -> ([f32; 2], [f32; 2]) {
    match region {
        Some([u, v, w, h]) => ([u, v], [w, h]),
        None => ([0.0, 0.0], [1.0, 1.0]),
    }
}

fn check_rgba_len(len: usize, width: u32, height: u32) -> Result<()> {
    let expected = width as usize * height as usize * 4;
    if len == expected {
        Ok(())
    } else {
        Err(anyhow!("{width}x{height} RGBA needs {expected} bytes, got {len}"))
    }
}

fn to_wgpu_color([r, g, b, a]: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: r.into(),
        g: g.into(),
        b: b.into(),
        a: a.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_uniforms_fit_one_stride() {
        let size = std::mem::size_of::<SpriteUniforms>() as u64;
        assert_eq!(size, 96);
        assert_eq!(uniform_stride(size, 256), 256);
        assert_eq!(uniform_stride(size, 64), 128);
        assert_eq!(uniform_stride(256, 256), 256);
    }

    #[test]
    fn quad_uvs_follow_positions() {
        assert_eq!(SPRITE_VERTICES[0].uv, [0.0, 0.0]);
        assert_eq!(SPRITE_VERTICES[2].uv, [1.0, 1.0]);
        assert_eq!(SPRITE_VERTICES[5].uv, [0.0, 1.0]);
    }

    #[test]
    fn region_defaults_to_whole_texture() {
        assert_eq!(uv_region(None), ([0.0, 0.0], [1.0, 1.0]));
        assert_eq!(
            uv_region(Some([0.25, 0.5, 0.25, 0.25])),
            ([0.25, 0.5], [0.25, 0.25])
        );
    }

    #[test]
    fn prefers_srgb_surface_format() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(pick_surface_format(&formats), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(
            pick_surface_format(&[TextureFormat::Rgba16Float]),
            Some(TextureFormat::Rgba16Float)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn present_mode_without_vsync_avoids_fifo_when_possible() {
        let all = [PresentMode::Fifo, PresentMode::Immediate, PresentMode::Mailbox];
        assert_eq!(choose_present_mode(&all, true), PresentMode::Fifo);
        assert_eq!(choose_present_mode(&all, false), PresentMode::Mailbox);
        assert_eq!(
            choose_present_mode(&[PresentMode::Fifo, PresentMode::Immediate], false),
            PresentMode::Immediate
        );
        assert_eq!(choose_present_mode(&[PresentMode::Fifo], false), PresentMode::Fifo);
    }

    #[test]
    fn rgba_length_must_match_size() {
        assert!(check_rgba_len(16, 2, 2).is_ok());
        assert!(check_rgba_len(15, 2, 2).is_err());
    }
}
