use crate::constants::CLEAR_RGB;
use glam::Mat4;
use studio_core::scene::LineVertex;
use studio_core::TONE_MAPPING_EXPOSURE;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod lines;

use lines::{create_lines_resources, LinesResources, LinesUniforms};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    lines: LinesResources,
    depth_view: wgpu::TextureView,

    room_vb: wgpu::Buffer,
    room_vertex_count: u32,
    rain_vb: wgpu::Buffer,
    rain_capacity: u32,
    rain_vertex_count: u32,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    view_proj: Mat4,
    time_accum: f32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        room: &[LineVertex],
        rain_capacity: u32,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits; some web implementations reject unknown fields
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let lines = create_lines_resources(&device, format, DEPTH_FORMAT);
        let (_, depth_view) = helpers::create_depth_texture(&device, width, height, DEPTH_FORMAT);

        let room_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("room_lines"),
            contents: bytemuck::cast_slice(room),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let rain_vb = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rain_lines"),
            size: (rain_capacity.max(1) as u64) * std::mem::size_of::<LineVertex>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        log::info!(
            "[gpu] ready {}x{} format={:?} room_vertices={}",
            width,
            height,
            format,
            room.len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            lines,
            depth_view,
            room_vb,
            room_vertex_count: room.len() as u32,
            rain_vb,
            rain_capacity,
            rain_vertex_count: 0,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_RGB[0],
                g: CLEAR_RGB[1],
                b: CLEAR_RGB[2],
                a: 1.0,
            },
            view_proj: Mat4::IDENTITY,
            time_accum: 0.0,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn set_view_proj(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
    }

    /// Uploads this frame's rain segments; anything past capacity is dropped.
    pub fn set_rain(&mut self, vertices: &[LineVertex]) {
        let n = vertices.len().min(self.rain_capacity as usize);
        self.queue
            .write_buffer(&self.rain_vb, 0, bytemuck::cast_slice(&vertices[..n]));
        self.rain_vertex_count = n as u32;
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (_, depth_view) =
                helpers::create_depth_texture(&self.device, width, height, DEPTH_FORMAT);
            self.depth_view = depth_view;
        }
    }

    pub fn render(&mut self, dt_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let u = LinesUniforms {
            view_proj: self.view_proj.to_cols_array_2d(),
            params: [TONE_MAPPING_EXPOSURE, self.time_accum, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.lines.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.lines.pipeline);
            rpass.set_bind_group(0, &self.lines.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.room_vb.slice(..));
            rpass.draw(0..self.room_vertex_count, 0..1);
            if self.rain_vertex_count > 0 {
                rpass.set_vertex_buffer(0, self.rain_vb.slice(..));
                rpass.draw(0..self.rain_vertex_count, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
