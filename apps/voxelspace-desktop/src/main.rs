use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use voxelspace_camera::Camera;
use voxelspace_common::{GridDims, RenderSettings};
use voxelspace_input::{apply_action, walk_deltas, Action};
use voxelspace_render::{PixelBuffer, Raycaster, Renderer};
use voxelspace_render_wgpu::PixelBlitRenderer;
use voxelspace_world::VoxelGrid;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Radians of camera rotation per second of held key.
const ROTATE_SPEED: f64 = 1.5;
/// World units of camera movement per second of held key.
const MOVE_SPEED: f64 = 4.0;

#[derive(Parser)]
#[command(name = "voxelspace-desktop", about = "Interactive voxelspace viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output width in pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value = "600")]
    height: u32,
}

/// Application state: the world, the camera, and the CPU renderer.
struct AppState {
    grid: VoxelGrid,
    camera: Camera,
    raycaster: Raycaster,
    buffer: PixelBuffer,
    show_overlay: bool,
    keys_held: std::collections::HashSet<KeyCode>,
    last_frame: Instant,
    last_render_time: Duration,
}

impl AppState {
    fn new(settings: RenderSettings) -> Self {
        let dims = GridDims::default();
        let grid = VoxelGrid::sealed_box(dims);
        let camera = Camera::centered_in(dims);
        let raycaster = Raycaster::new(settings);
        let buffer = raycaster.make_buffer();

        Self {
            grid,
            camera,
            raycaster,
            buffer,
            show_overlay: true,
            keys_held: std::collections::HashSet::new(),
            last_frame: Instant::now(),
            last_render_time: Duration::ZERO,
        }
    }

    /// Drain held keys into camera actions. W/S tilt, A/D turn, arrow keys
    /// walk in the horizontal plane, PageUp/PageDown fly.
    fn update(&mut self, dt: f64) {
        let d_angle = ROTATE_SPEED * dt;
        if self.keys_held.contains(&KeyCode::KeyW) {
            apply_action(
                &mut self.camera,
                &self.grid,
                Action::Rotate {
                    d_azimuth: 0.0,
                    d_altitude: d_angle,
                },
            );
        }
        if self.keys_held.contains(&KeyCode::KeyS) {
            apply_action(
                &mut self.camera,
                &self.grid,
                Action::Rotate {
                    d_azimuth: 0.0,
                    d_altitude: -d_angle,
                },
            );
        }
        if self.keys_held.contains(&KeyCode::KeyA) {
            apply_action(
                &mut self.camera,
                &self.grid,
                Action::Rotate {
                    d_azimuth: -d_angle,
                    d_altitude: 0.0,
                },
            );
        }
        if self.keys_held.contains(&KeyCode::KeyD) {
            apply_action(
                &mut self.camera,
                &self.grid,
                Action::Rotate {
                    d_azimuth: d_angle,
                    d_altitude: 0.0,
                },
            );
        }

        let stride = MOVE_SPEED * dt;
        let mut forward = 0.0;
        let mut strafe = 0.0;
        let mut dy = 0.0;
        if self.keys_held.contains(&KeyCode::ArrowUp) {
            forward += stride;
        }
        if self.keys_held.contains(&KeyCode::ArrowDown) {
            forward -= stride;
        }
        if self.keys_held.contains(&KeyCode::ArrowRight) {
            strafe += stride;
        }
        if self.keys_held.contains(&KeyCode::ArrowLeft) {
            strafe -= stride;
        }
        if self.keys_held.contains(&KeyCode::PageUp) {
            dy += stride;
        }
        if self.keys_held.contains(&KeyCode::PageDown) {
            dy -= stride;
        }
        if forward != 0.0 || strafe != 0.0 || dy != 0.0 {
            let (dx, dz) = walk_deltas(self.camera.azimuth, forward, strafe);
            let moved = apply_action(
                &mut self.camera,
                &self.grid,
                Action::Move { dx, dy, dz },
            );
            if !moved {
                tracing::debug!(cell = ?self.camera.cell(), "bumped into a wall");
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }

        if pressed && key == KeyCode::F1 {
            self.show_overlay = !self.show_overlay;
        }
    }

    /// Render one frame on the CPU.
    fn render_frame(&mut self) -> Result<()> {
        let start = Instant::now();
        self.raycaster
            .render(&self.grid, &self.camera, &mut self.buffer)?;
        self.last_render_time = start.elapsed();
        Ok(())
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }

        let pos = self.camera.position();
        egui::SidePanel::left("overlay")
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Voxelspace");
                ui.separator();
                ui.label(format!(
                    "Camera: ({:.2}, {:.2}, {:.2})",
                    pos.x, pos.y, pos.z
                ));
                ui.label(format!("Cell: {:?}", self.camera.cell()));
                ui.label(format!(
                    "Azimuth: {:.3}  Altitude: {:.3}",
                    self.camera.azimuth, self.camera.altitude
                ));
                ui.label(format!("CPU frame: {:?}", self.last_render_time));
                ui.separator();
                ui.heading("Controls");
                ui.label("W/S - tilt view");
                ui.label("A/D - turn view");
                ui.label("Arrows - walk");
                ui.label("PgUp/PgDn - fly");
                ui.label("F1 - toggle overlay");
            });
    }
}

struct DesktopApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    blit: Option<PixelBlitRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl DesktopApp {
    fn new(settings: RenderSettings) -> Self {
        Self {
            state: AppState::new(settings),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            blit: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let settings = *self.state.raycaster.settings();
        let attrs = Window::default_attributes()
            .with_title("Voxelspace")
            .with_inner_size(PhysicalSize::new(settings.width, settings.height));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("voxelspace_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
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

        let blit = PixelBlitRenderer::new(&device, surface_format, settings.width, settings.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.blit = Some(blit);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = &mut self.egui_winit {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                // The pixel buffer keeps its fixed size; only the surface
                // follows the window, stretching the blit.
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f64().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                if let Err(e) = self.state.render_frame() {
                    tracing::error!("render failed: {e}");
                    event_loop.exit();
                    return;
                }

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(blit) = &self.blit {
                    if let Err(e) = blit.upload(queue, &self.state.buffer) {
                        tracing::error!("frame upload failed: {e}");
                        return;
                    }
                    blit.render(device, queue, &view);
                }

                let raw_input = self
                    .egui_winit
                    .as_mut()
                    .unwrap()
                    .take_egui_input(self.window.as_ref().unwrap());
                let full_output = self.egui_ctx.run(raw_input, |ctx| {
                    self.state.draw_ui(ctx);
                });

                self.egui_winit.as_mut().unwrap().handle_platform_output(
                    self.window.as_ref().unwrap(),
                    full_output.platform_output,
                );

                let paint_jobs = self
                    .egui_ctx
                    .tessellate(full_output.shapes, full_output.pixels_per_point);

                let screen_descriptor = egui_wgpu::ScreenDescriptor {
                    size_in_pixels: [
                        self.config.as_ref().unwrap().width,
                        self.config.as_ref().unwrap().height,
                    ],
                    pixels_per_point: full_output.pixels_per_point,
                };

                {
                    let egui_renderer = self.egui_renderer.as_mut().unwrap();
                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, image_delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui_encoder"),
                        });
                    egui_renderer.update_buffers(
                        device,
                        queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_descriptor,
                    );
                    {
                        let mut pass = encoder
                            .begin_render_pass(&wgpu::RenderPassDescriptor {
                                label: Some("egui_pass"),
                                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                    view: &view,
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
                        egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("voxelspace-desktop starting");

    let settings = RenderSettings {
        width: cli.width,
        height: cli.height,
        ..RenderSettings::default()
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(settings);
    event_loop.run_app(&mut app)?;

    Ok(())
}
