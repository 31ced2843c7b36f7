//! Application shell: window, GPU device, event routing, frame loop.

use std::path::Path;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::game::{GameConfig, GameEvent, GameSession};
use crate::rendering::{PickingPass, SphereRenderer};
use crate::ui::{CameraController, Hud};

/// Optional RON override for [`GameConfig`] next to the executable.
const CONFIG_PATH: &str = "outbreak.ron";

pub struct App {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    renderer: SphereRenderer,
    picking: PickingPass,
    camera: CameraController,
    hud: Hud,
    session: GameSession,

    cursor_pos: winit::dpi::PhysicalPosition<f64>,
    last_render_time: std::time::Instant,
    frame_count: u32,
    fps_timer: std::time::Instant,
}

impl App {
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Route a window event. Returns `false` when the app should exit.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        let response = self.hud.handle_event(&self.window, event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                return false;
            }
            WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
                self.config.width = size.width;
                self.config.height = size.height;
                self.surface.configure(&self.device, &self.config);
                self.renderer.resize(&self.device, size.width, size.height);
                self.picking.resize(&self.device, size.width, size.height);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                // Picking fires on press, and the same press may begin a
                // drag; both routes see the event.
                if *button == MouseButton::Left
                    && *state == ElementState::Pressed
                    && !response.consumed
                    && !self.hud.wants_pointer_input()
                {
                    self.pick_at_cursor();
                }
                self.camera.handle_mouse_button(*button, *state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_pos = *position;
                self.camera.handle_mouse_move(*position);
            }
            WindowEvent::RedrawRequested => {
                self.render();
            }
            _ => {}
        }
        true
    }

    /// Picking click: redraw the scene in pick colors and resolve the pixel
    /// under the cursor. Uses the rotation of the most recently drawn frame
    /// (pending drag deltas are not applied until the next tick).
    fn pick_at_cursor(&mut self) {
        let x = self.cursor_pos.x.max(0.0) as u32;
        let y = self.cursor_pos.y.max(0.0) as u32;
        let aspect = self.config.width as f32 / self.config.height as f32;
        let view_proj = self.camera.view_proj(aspect);

        let meshes = self.session.pick_meshes();
        let pixel = self
            .picking
            .read_pixel(&self.device, &self.queue, x, y, view_proj, &meshes);
        self.session.handle_pick(pixel);
    }

    fn render(&mut self) {
        let now = std::time::Instant::now();
        let dt = now.duration_since(self.last_render_time).as_secs_f32();
        self.last_render_time = now;

        self.camera.update();
        self.session.tick(dt);

        for event in self.session.drain_events() {
            match event {
                GameEvent::Hit { index, points } => {
                    log::info!("Hit bacterium {index} for {points} points (score {})", self.session.score);
                }
                GameEvent::LifeLost { remaining } => {
                    log::warn!("A bacterium broke through; {remaining} lives left");
                    self.hud.flash(format!(
                        "A patch broke through! {remaining} lives left, growth slowed"
                    ));
                }
                GameEvent::GameOver => {
                    log::warn!("Game over, final score {}", self.session.score);
                }
            }
        }

        let meshes = self.session.display_meshes();

        let output = self.surface.get_current_texture().unwrap();
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        let aspect = self.config.width as f32 / self.config.height as f32;
        self.renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            self.camera.view_proj(aspect),
            &meshes,
        );

        let full_output = self.hud.frame(&self.window, &self.session, dt);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.hud.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            screen_descriptor,
            full_output,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        // FPS counter
        self.frame_count += 1;
        if self.fps_timer.elapsed().as_secs_f32() >= 1.0 {
            log::debug!("FPS: {}", self.frame_count);
            self.frame_count = 0;
            self.fps_timer = std::time::Instant::now();
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

struct AppState {
    app: Option<App>,
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Outbreak")
            .with_inner_size(winit::dpi::PhysicalSize::new(900, 900));

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        // Initialize wgpu. Setup failures are fatal and not retried.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance.create_surface(window.clone()).unwrap();

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("no compatible GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Outbreak Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        }))
        .expect("failed to create GPU device");

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
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let game_config = GameConfig::load_or_default(Path::new(CONFIG_PATH));
        let camera = CameraController::new(game_config.drag_sensitivity);
        let session = GameSession::new(game_config);

        let renderer = SphereRenderer::new(&device, &config);
        let picking = PickingPass::new(&device, config.width, config.height);
        let hud = Hud::new(&device, config.format, &window);

        self.app = Some(App {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            picking,
            camera,
            hud,
            session,
            cursor_pos: winit::dpi::PhysicalPosition::new(0.0, 0.0),
            last_render_time: std::time::Instant::now(),
            frame_count: 0,
            fps_timer: std::time::Instant::now(),
        });
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(app) = &mut self.app else { return };

        if window_id != app.window().id() {
            return;
        }

        if !app.handle_event(&event) {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(app) = &self.app {
            app.request_redraw();
        }
    }
}

pub fn run() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap();
    let mut state = AppState { app: None };

    event_loop.run_app(&mut state).unwrap();
}
