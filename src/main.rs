use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowId},
};

use shellmorph::config::{self, Config};
use shellmorph::shell::{MeshVariant, MorphospaceConstants, RenderPass, ShellMesh, compose};

mod renderer;
mod ui;

use renderer::{Camera, GpuState};
use ui::{FrameStats, UiActions, UiState, apply_theme, draw_help_overlay, draw_side_panel};

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    config: Config,
    constants: MorphospaceConstants,
    pending_mesh: Option<ShellMesh>,
    variant: MeshVariant,

    camera: Camera,
    ui_state: UiState,
    dragging: bool,
    mouse_delta: Vec2,

    passes: Vec<RenderPass>,
    last_vsync_state: bool,
    frame_count: u32,
    fps_timer: Instant,
    fps: f32,

    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(config: Config, constants: MorphospaceConstants, mesh: ShellMesh) -> Self {
        let ui_state = UiState::from_view(&config.view);
        let last_vsync_state = ui_state.vsync_enabled;
        let variant = config.mesh.variant;

        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            config,
            constants,
            pending_mesh: Some(mesh),
            variant,

            camera: Camera::default(),
            ui_state,
            dragging: false,
            mouse_delta: Vec2::ZERO,

            passes: Vec::new(),
            last_vsync_state,
            frame_count: 0,
            fps_timer: Instant::now(),
            fps: 0.0,

            fatal: None,
        }
    }

    fn init_gpu(&mut self, window: Arc<Window>) -> anyhow::Result<()> {
        let mesh = self
            .pending_mesh
            .take()
            .context("shell mesh was already uploaded")?;

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            mesh,
            &self.constants,
            self.ui_state.vsync_enabled,
        ))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn update(&mut self) {
        if self.mouse_delta != Vec2::ZERO {
            self.camera.process_mouse_movement(self.mouse_delta);
            self.mouse_delta = Vec2::ZERO;
        }

        self.frame_count += 1;
        let elapsed = self.fps_timer.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            self.fps = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        let Some(gpu) = &self.gpu else { return };
        match compose(
            &gpu.shell_buffers.layout,
            &self.constants,
            &self.ui_state.scene,
            0,
        ) {
            Ok(passes) => self.passes = passes,
            Err(e) => {
                tracing::warn!("scene composition failed: {}", e);
                self.passes.clear();
            }
        }
    }

    fn render(&mut self) {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let layout = match &self.gpu {
            Some(gpu) => gpu.shell_buffers.layout,
            None => return,
        };
        let stats = FrameStats {
            fps: self.fps,
            passes: self.passes.len(),
            vertices: layout.vertex_count(),
            indices: layout.index_count(),
            variant: self.variant,
        };
        let distance = self.camera.distance;

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats);
            if self.ui_state.show_help {
                draw_help_overlay(ctx, distance);
            }
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.resize(gpu.size);
                return;
            }
            Err(e) => {
                tracing::warn!("failed to acquire frame: {}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_shell(
            &view,
            &mut encoder,
            &self.passes,
            self.ui_state.scene.rotation(),
            self.ui_state.scene.archimedean,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.toggle_fullscreen {
            self.toggle_fullscreen();
        }

        if actions.reset_camera {
            let aspect = self.camera.aspect;
            self.camera = Camera::default();
            self.camera.aspect = aspect;
        }

        if actions.save_view {
            self.config.view = self.ui_state.to_view();
            match config::save(&self.config) {
                Ok(()) => tracing::info!("view saved"),
                Err(e) => tracing::warn!("failed to save config: {}", e),
            }
        }
    }

    fn toggle_fullscreen(&self) {
        let Some(window) = &self.window else { return };
        if window.fullscreen().is_some() {
            window.set_fullscreen(None);
        } else {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::F11 => self.toggle_fullscreen(),
            KeyCode::KeyH => self.ui_state.show_help = !self.ui_state.show_help,
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Shell Morphospace")
            .with_transparent(true)
            .with_inner_size(PhysicalSize::new(1280, 900));

        let result = event_loop
            .create_window(window_attrs)
            .context("failed to create window")
            .and_then(|window| self.init_gpu(Arc::new(window)));

        if let Err(e) = result {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            let response = egui_state.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state == ElementState::Pressed && !event.repeat {
                        self.handle_key(key);
                    }
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
            }

            _ => {}
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: winit::event::DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.dragging {
                self.mouse_delta.x += delta.0 as f32;
                self.mouse_delta.y += delta.1 as f32;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = config::load();
    let constants = MorphospaceConstants::derive(&config.morphospace)?;
    tracing::info!(
        raup_w = constants.raup_w,
        suture_phi = constants.suture_phi,
        "derived morphospace constants"
    );

    let mesh = config.mesh.variant.generate(config.mesh.theta_domain)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, constants, mesh);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
