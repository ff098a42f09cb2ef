use crate::shaders;
use bytemuck::{Pod, Zeroable};
use tidewater_scene::{FillMode, PlaneGrid, WaterScene, WaterSurface};
use tidewater_shading::WaterUniforms;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

/// `Water` in the WGSL program, std140-compatible.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct WaterUniformsGpu {
    big_waves_frequency: [f32; 2],
    time: f32,
    big_waves_elevation: f32,
    depth_color: [f32; 3],
    big_waves_speed: f32,
    surface_color: [f32; 3],
    big_waves_noise: f32,
    color_offset: f32,
    color_multiplier: f32,
    _pad: [f32; 2],
}

impl From<&WaterUniforms> for WaterUniformsGpu {
    fn from(u: &WaterUniforms) -> Self {
        Self {
            big_waves_frequency: u.big_waves_frequency.to_array(),
            time: u.time,
            big_waves_elevation: u.big_waves_elevation,
            depth_color: u.depth_color.to_linear().to_array(),
            big_waves_speed: u.big_waves_speed,
            surface_color: u.surface_color.to_linear().to_array(),
            big_waves_noise: u.big_waves_noise,
            color_offset: u.color_offset,
            color_multiplier: u.color_multiplier,
            _pad: [0.0; 2],
        }
    }
}

/// Line-list index buffer for wireframe mode.
struct EdgeBuffer {
    buffer: wgpu::Buffer,
    count: u32,
}

/// wgpu-based water renderer.
pub struct WaterRenderer {
    fill_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    water_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    triangle_index_buffer: wgpu::Buffer,
    triangle_index_count: u32,
    edges: Option<EdgeBuffer>,
    grid: PlaneGrid,
    depth_texture: wgpu::TextureView,
}

impl WaterRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        surface: &WaterSurface,
        width: u32,
        height: u32,
    ) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_uniform_buffer"),
            contents: bytemuck::bytes_of(&CameraUniforms {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
                model: surface.model_matrix().to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let water_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_uniform_buffer"),
            contents: bytemuck::bytes_of(&WaterUniformsGpu::from(&WaterUniforms::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("water_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("water_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: water_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("water_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("water_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::WATER_SHADER.into()),
        });

        let fill_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            wgpu::PrimitiveTopology::TriangleList,
            "water_fill_pipeline",
        );
        let wireframe_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            wgpu::PrimitiveTopology::LineList,
            "water_wireframe_pipeline",
        );

        // Plane mesh
        let grid = *surface.grid();
        let positions = grid.positions();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_vertex_buffer"),
            contents: bytemuck::cast_slice(&positions),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangle_indices = grid.triangle_indices();
        let triangle_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_triangle_index_buffer"),
            contents: bytemuck::cast_slice(&triangle_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let triangle_index_count = triangle_indices.len() as u32;

        tracing::debug!(
            vertices = positions.len(),
            triangles = triangle_index_count / 3,
            "water mesh uploaded"
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        let mut renderer = Self {
            fill_pipeline,
            wireframe_pipeline,
            camera_buffer,
            water_buffer,
            uniform_bind_group,
            vertex_buffer,
            triangle_index_buffer,
            triangle_index_count,
            edges: None,
            grid,
            depth_texture,
        };
        if surface.fill_mode() == FillMode::Wireframe {
            renderer.ensure_edges(device);
        }
        renderer
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Size in bytes of the largest buffer the grid needs: vertices,
    /// triangle indices, or wireframe edge indices.
    pub fn largest_buffer_size(grid: &PlaneGrid) -> u64 {
        let vertices = grid.vertex_count() as u64 * std::mem::size_of::<[f32; 3]>() as u64;
        let triangles = grid.triangle_index_count() as u64 * std::mem::size_of::<u32>() as u64;
        let edges = grid.edge_index_count() as u64 * std::mem::size_of::<u32>() as u64;
        vertices.max(triangles).max(edges)
    }

    /// Whether every buffer for `grid` fits under `limits.max_buffer_size`.
    pub fn fits_limits(grid: &PlaneGrid, limits: &wgpu::Limits) -> bool {
        Self::largest_buffer_size(grid) <= limits.max_buffer_size
    }

    /// Render one frame of the water surface into `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &WaterScene,
    ) {
        let fill_mode = scene.surface.fill_mode();
        if fill_mode == FillMode::Wireframe {
            self.ensure_edges(device);
        }

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms {
                view_proj: scene.camera.view_projection().to_cols_array_2d(),
                model: scene.surface.model_matrix().to_cols_array_2d(),
            }),
        );
        queue.write_buffer(
            &self.water_buffer,
            0,
            bytemuck::bytes_of(&WaterUniformsGpu::from(&scene.uniforms)),
        );

        let clear = scene.clear_color.to_linear();

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("water_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("water_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            match (fill_mode, &self.edges) {
                (FillMode::Wireframe, Some(edges)) => {
                    pass.set_pipeline(&self.wireframe_pipeline);
                    pass.set_index_buffer(edges.buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..edges.count, 0, 0..1);
                }
                _ => {
                    pass.set_pipeline(&self.fill_pipeline);
                    pass.set_index_buffer(
                        self.triangle_index_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    pass.draw_indexed(0..self.triangle_index_count, 0, 0..1);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn ensure_edges(&mut self, device: &wgpu::Device) {
        if self.edges.is_some() {
            return;
        }
        let indices = self.grid.edge_indices();
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("water_edge_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        tracing::debug!(edges = indices.len() / 2, "wireframe index buffer created");
        self.edges = Some(EdgeBuffer {
            buffer,
            count: indices.len() as u32,
        });
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        topology: wgpu::PrimitiveTopology,
        label: &str,
    ) -> wgpu::RenderPipeline {
        let cull_mode = match topology {
            wgpu::PrimitiveTopology::TriangleList => Some(wgpu::Face::Back),
            _ => None,
        };
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
