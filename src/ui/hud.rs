//! HUD overlay using egui-wgpu and egui-winit.
//!
//! A one-way display sink: every frame it reads the session's score, lives,
//! and phase, plus any transient warning pushed by the app, and draws them
//! on top of the 3D scene. Nothing in the game ever reads UI state back.

use egui_wgpu::ScreenDescriptor;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::game::{GameSession, Phase};

/// Transient on-screen warning.
struct Flash {
    text: String,
    remaining: f32,
}

const FLASH_SECONDS: f32 = 3.0;

pub struct Hud {
    /// egui context for immediate mode UI
    ctx: egui::Context,
    /// egui-winit state for input handling
    winit_state: egui_winit::State,
    /// egui-wgpu renderer
    renderer: egui_wgpu::Renderer,
    flash: Option<Flash>,
}

impl Hud {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat, window: &Window) -> Self {
        let ctx = egui::Context::default();

        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);

        Self {
            ctx,
            winit_state,
            renderer,
            flash: None,
        }
    }

    /// Feed a winit event to egui. Returns whether egui consumed it.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> egui_winit::EventResponse {
        self.winit_state.on_window_event(window, event)
    }

    /// True when the pointer is over (or captured by) the overlay, in which
    /// case clicks should not fall through to picking.
    pub fn wants_pointer_input(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    /// Show a transient warning banner.
    pub fn flash(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            remaining: FLASH_SECONDS,
        });
    }

    /// Run the egui pass for this frame and collect its output.
    pub fn frame(&mut self, window: &Window, session: &GameSession, dt: f32) -> egui::FullOutput {
        if let Some(flash) = &mut self.flash {
            flash.remaining -= dt;
        }
        if self.flash.as_ref().is_some_and(|f| f.remaining <= 0.0) {
            self.flash = None;
        }

        let raw_input = self.winit_state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);

        egui::Area::new(egui::Id::new("hud-counters"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 16.0))
            .show(&self.ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Score: {}", session.score))
                        .size(24.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                let lives_color = if session.lives <= 1 {
                    egui::Color32::from_rgb(240, 80, 80)
                } else {
                    egui::Color32::WHITE
                };
                ui.label(
                    egui::RichText::new(format!("Lives: {}", session.lives))
                        .size(24.0)
                        .color(lives_color),
                );
            });

        if let Some(flash) = &self.flash {
            egui::Area::new(egui::Id::new("hud-warning"))
                .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 48.0))
                .show(&self.ctx, |ui| {
                    ui.label(
                        egui::RichText::new(&flash.text)
                            .size(20.0)
                            .color(egui::Color32::from_rgb(255, 200, 60)),
                    );
                });
        }

        let terminal = match session.phase {
            Phase::Playing => None,
            Phase::Lost => Some("GAME OVER: the bacteria have overrun the field"),
            Phase::Won => Some("You cleared the field!"),
        };
        if let Some(message) = terminal {
            egui::Area::new(egui::Id::new("hud-terminal"))
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(&self.ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new(message)
                                .size(32.0)
                                .strong()
                                .color(egui::Color32::from_rgb(240, 80, 80)),
                        );
                        ui.label(
                            egui::RichText::new(format!("Final score: {}", session.score))
                                .size(24.0)
                                .color(egui::Color32::WHITE),
                        );
                    });
                });
        }

        self.ctx.end_pass()
    }

    /// Render egui output on top of the scene.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen_descriptor: ScreenDescriptor,
        output: egui::FullOutput,
    ) {
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        let _command_buffers = self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("HUD Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Render on top of the 3D scene.
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
