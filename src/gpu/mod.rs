//! wgpu rendering of a tessellated frame.
//!
//! The field is simulated on the CPU; the GPU only draws. Two instanced
//! pipelines share one uniform buffer: link lines expanded into thin quads,
//! and point markers expanded into circular sprites. Instance buffers grow on
//! demand and are rewritten every frame.

pub mod geometry;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::visuals::FieldVisuals;
use geometry::{FrameGeometry, LineInstance, PointInstance};

/// Initial instance-buffer capacities; doubled whenever a frame overflows.
const INITIAL_LINE_CAPACITY: u64 = 4096;
const INITIAL_POINT_CAPACITY: u64 = 1024;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    resolution: [f32; 2],
    line_width: f32,
    marker_radius: f32,
    line_color: [f32; 3],
    _pad0: f32,
    marker_color: [f32; 3],
    _pad1: f32,
}

/// GPU surface, pipelines, and per-frame buffers for one window.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    line_pipeline: wgpu::RenderPipeline,
    point_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    line_buffer: wgpu::Buffer,
    line_capacity: u64,
    point_buffer: wgpu::Buffer,
    point_capacity: u64,
    uniforms: Uniforms,
    background: wgpu::Color,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, visuals: &FieldVisuals) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                ..Default::default()
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniforms = Uniforms {
            resolution: [config.width as f32, config.height as f32],
            line_width: visuals.line_width,
            marker_radius: visuals.marker_radius,
            line_color: visuals.line_color.to_array(),
            _pad0: 0.0,
            marker_color: visuals.marker_color.to_array(),
            _pad1: 0.0,
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Field Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER.into()),
        });

        let line_pipeline = create_instanced_pipeline(
            &device,
            &pipeline_layout,
            &line_shader,
            "Line Pipeline",
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LineInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 8,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 16,
                        shader_location: 2,
                        format: wgpu::VertexFormat::Float32,
                    },
                ],
            },
            surface_format,
        );

        let point_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Shader"),
            source: wgpu::ShaderSource::Wgsl(POINT_SHADER.into()),
        });

        let point_pipeline = create_instanced_pipeline(
            &device,
            &pipeline_layout,
            &point_shader,
            "Point Pipeline",
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    },
                    wgpu::VertexAttribute {
                        offset: 8,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32,
                    },
                ],
            },
            surface_format,
        );

        let line_capacity = INITIAL_LINE_CAPACITY;
        let line_buffer = create_instance_buffer(
            &device,
            "Line Instance Buffer",
            line_capacity * std::mem::size_of::<LineInstance>() as u64,
        );
        let point_capacity = INITIAL_POINT_CAPACITY;
        let point_buffer = create_instance_buffer(
            &device,
            "Point Instance Buffer",
            point_capacity * std::mem::size_of::<PointInstance>() as u64,
        );

        let bg = visuals.background;
        let background = wgpu::Color {
            r: bg.x as f64,
            g: bg.y as f64,
            b: bg.z as f64,
            a: 1.0,
        };

        log::info!(
            "gpu surface ready: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            line_pipeline,
            point_pipeline,
            uniform_buffer,
            uniform_bind_group,
            line_buffer,
            line_capacity,
            point_buffer,
            point_capacity,
            uniforms,
            background,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.uniforms.resolution = [new_size.width as f32, new_size.height as f32];
            self.queue
                .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
        }
    }

    /// Upload one frame's instances and draw it.
    pub fn render(&mut self, frame: &FrameGeometry) -> Result<(), wgpu::SurfaceError> {
        self.upload(frame);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if !frame.lines.is_empty() {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                render_pass.draw(0..6, 0..frame.lines.len() as u32);
            }
            if !frame.points.is_empty() {
                render_pass.set_pipeline(&self.point_pipeline);
                render_pass.set_vertex_buffer(0, self.point_buffer.slice(..));
                render_pass.draw(0..6, 0..frame.points.len() as u32);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn upload(&mut self, frame: &FrameGeometry) {
        if frame.lines.len() as u64 > self.line_capacity {
            self.line_capacity = (frame.lines.len() as u64).next_power_of_two();
            self.line_buffer = create_instance_buffer(
                &self.device,
                "Line Instance Buffer",
                self.line_capacity * std::mem::size_of::<LineInstance>() as u64,
            );
            log::debug!("line buffer grown to {} instances", self.line_capacity);
        }
        if frame.points.len() as u64 > self.point_capacity {
            self.point_capacity = (frame.points.len() as u64).next_power_of_two();
            self.point_buffer = create_instance_buffer(
                &self.device,
                "Point Instance Buffer",
                self.point_capacity * std::mem::size_of::<PointInstance>() as u64,
            );
            log::debug!("point buffer grown to {} instances", self.point_capacity);
        }

        if !frame.lines.is_empty() {
            self.queue
                .write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&frame.lines));
        }
        if !frame.points.is_empty() {
            self.queue
                .write_buffer(&self.point_buffer, 0, bytemuck::cast_slice(&frame.points));
        }
    }
}

fn create_instance_buffer(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_instanced_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    label: &str,
    vertex_layout: wgpu::VertexBufferLayout,
    surface_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

const LINE_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    line_width: f32,
    marker_radius: f32,
    line_color: vec3<f32>,
    marker_color: vec3<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) alpha: f32,
};

fn to_ndc(px: vec2<f32>) -> vec2<f32> {
    return vec2<f32>(
        px.x / uniforms.resolution.x * 2.0 - 1.0,
        1.0 - px.y / uniforms.resolution.y * 2.0,
    );
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) a: vec2<f32>,
    @location(1) b: vec2<f32>,
    @location(2) alpha: f32,
) -> VertexOutput {
    var dir = b - a;
    let len = length(dir);
    if len < 1e-4 {
        dir = vec2<f32>(1.0, 0.0);
    } else {
        dir = dir / len;
    }
    let perp = vec2<f32>(-dir.y, dir.x) * (uniforms.line_width * 0.5);

    var pos: vec2<f32>;
    switch vertex_index {
        case 0u: { pos = a - perp; }
        case 1u: { pos = a + perp; }
        case 2u: { pos = b - perp; }
        case 3u: { pos = a + perp; }
        case 4u: { pos = b - perp; }
        default: { pos = b + perp; }
    }

    var out: VertexOutput;
    out.clip_position = vec4<f32>(to_ndc(pos), 0.0, 1.0);
    out.alpha = alpha;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(uniforms.line_color, in.alpha);
}
"#;

const POINT_SHADER: &str = r#"
struct Uniforms {
    resolution: vec2<f32>,
    line_width: f32,
    marker_radius: f32,
    line_color: vec3<f32>,
    marker_color: vec3<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) alpha: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) alpha: f32,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[vertex_index];
    let px = center + corner * uniforms.marker_radius;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(
        px.x / uniforms.resolution.x * 2.0 - 1.0,
        1.0 - px.y / uniforms.resolution.y * 2.0,
        0.0,
        1.0,
    );
    out.uv = corner;
    out.alpha = alpha;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let edge = 1.0 - smoothstep(0.8, 1.0, dist);
    return vec4<f32>(uniforms.marker_color, in.alpha * edge);
}
"#;
