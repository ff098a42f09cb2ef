use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::Arc;
use tidewater_panel::ParameterPanel;
use tidewater_render_wgpu::WaterRenderer;
use tidewater_scene::{FrameDriver, SceneConfig, SceneEvent, Viewport, WaterScene};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "tidewater-desktop", about = "Animated procedural water surface")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Width and depth of the water plane in world units
    #[arg(long, default_value_t = 30.0)]
    size: f32,

    /// Grid segments per side of the water plane
    #[arg(long, default_value_t = 1064, value_parser = clap::value_parser!(u32).range(1..=4096))]
    subdivisions: u32,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
}

/// Application state: everything that is not a GPU handle.
struct AppState {
    scene: WaterScene,
    driver: FrameDriver,
    panel: ParameterPanel,
}

impl AppState {
    fn new(config: &SceneConfig, width: u32, height: u32) -> Self {
        Self {
            scene: WaterScene::new(config, Viewport::new(width, height, 1.0)),
            driver: FrameDriver::new(),
            panel: ParameterPanel::new(),
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if key == KeyCode::KeyH {
            self.panel.toggle_visible();
        }
    }

    /// Tell the scene about the window's current size and pixel density.
    fn sync_viewport(&mut self, window: &Window) {
        let size = window.inner_size();
        self.scene.apply(SceneEvent::Resized {
            width: size.width,
            height: size.height,
            scale_factor: window.scale_factor(),
        });
    }
}

/// Window, device and the two renderers drawing into it.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WaterRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        egui_ctx: &EguiContext,
        state: &mut AppState,
        initial_size: LogicalSize<u32>,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Tidewater")
            .with_inner_size(initial_size);
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tidewater_device"),
                required_features: wgpu::Features::empty(),
                // Dense grids need index buffers past the 256 MiB default.
                required_limits: wgpu::Limits {
                    max_buffer_size: adapter.limits().max_buffer_size,
                    ..wgpu::Limits::default()
                },
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        state.sync_viewport(&window);
        let (width, height) = state.scene.viewport.surface_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let grid = state.scene.surface.grid();
        let limits = device.limits();
        if !WaterRenderer::fits_limits(grid, &limits) {
            anyhow::bail!(
                "{} subdivisions need a {}-byte buffer but the device allows {} bytes; \
                 lower --subdivisions",
                grid.segments(),
                WaterRenderer::largest_buffer_size(grid),
                limits.max_buffer_size
            );
        }

        let renderer =
            WaterRenderer::new(&device, surface_format, &state.scene.surface, width, height);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width,
            height,
            pixel_ratio = state.scene.viewport.pixel_ratio(),
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    /// Resize the surface and depth buffer to the viewport's render size.
    fn reconfigure(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.surface_size();
        if (width, height) == (self.config.width, self.config.height) {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, width, height);
        tracing::debug!(width, height, "surface reconfigured");
    }

    /// One frame: water pass, then the panel overlay. Returns the panel edits.
    fn frame(&mut self, egui_ctx: &EguiContext, state: &AppState) -> Vec<SceneEvent> {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return Vec::new();
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.device, &self.queue, &view, &state.scene);
        let events = self.draw_panel(egui_ctx, &view, state);

        output.present();
        events
    }

    fn draw_panel(
        &mut self,
        egui_ctx: &EguiContext,
        view: &wgpu::TextureView,
        state: &AppState,
    ) -> Vec<SceneEvent> {
        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let mut events = Vec::new();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            events.extend(state.panel.show(ctx, &state.scene));
        });

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        // The surface may be rendered below the window's native density.
        let viewport = &state.scene.viewport;
        let surface_scale = (viewport.pixel_ratio() / viewport.scale_factor()) as f32;
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point * surface_scale,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        events
    }
}

struct WaterApp {
    state: AppState,
    initial_size: LogicalSize<u32>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    /// Set when the window or GPU could not be created; returned from `main`.
    init_error: Option<anyhow::Error>,
}

impl WaterApp {
    fn new(cli: &Cli) -> Self {
        let config = SceneConfig {
            size: cli.size,
            subdivisions: cli.subdivisions,
        };
        Self {
            state: AppState::new(&config, cli.width, cli.height),
            initial_size: LogicalSize::new(cli.width, cli.height),
            gpu: None,
            egui_ctx: EguiContext::default(),
            init_error: None,
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        self.state.driver.tick(&mut self.state.scene);
        let events = gpu.frame(&self.egui_ctx, &self.state);
        for event in events {
            self.state.scene.apply(event);
        }

        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for WaterApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx, &mut self.state, self.initial_size) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.state.sync_viewport(&gpu.window);
                gpu.reconfigure(&self.state.scene.viewport);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state.handle_key(key);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug,wgpu_core=warn,wgpu_hal=warn,naga=warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!(
        size = cli.size,
        subdivisions = cli.subdivisions,
        "tidewater-desktop starting"
    );

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = WaterApp::new(&cli);
    event_loop.run_app(&mut app)?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
