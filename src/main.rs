//! Ragingsea - shader-displaced water under an orbit camera
//!
//! Two scenes share one render loop: still water, and a voyage where a ship
//! circles the origin while the camera stays level with the horizon.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use ragingsea::assets::{AssetEvent, AssetLoader};
use ragingsea::camera::{CameraSystem, Viewport};
use ragingsea::cli::Args;
use ragingsea::panel::{DebugPanel, PanelModel};
use ragingsea::params::{RecordingConfig, RenderConfig, Rgb, ScenePreset};
use ragingsea::rendering::{FrameInput, OverlayFrame, RenderSystem, ShipUniforms};
use ragingsea::ship::Ship;
use ragingsea::water::WaterSurface;

/// Ship lighting: xyz towards the light, w ambient
const SHIP_LIGHT: [f32; 4] = [0.5, 1.0, 0.3, 0.35];

/// Trackpad pixels per wheel notch
const PIXELS_PER_WHEEL_STEP: f32 = 50.0;

/// Scene time source: wall clock, or a fixed step per frame while recording
struct FrameClock {
    started: Instant,
    fixed_step: Option<f32>,
    frames: usize,
}

impl FrameClock {
    fn new(fixed_step: Option<f32>) -> Self {
        Self {
            started: Instant::now(),
            fixed_step,
            frames: 0,
        }
    }

    /// Scene time for the next frame (seconds)
    fn tick(&mut self) -> f32 {
        let time_s = match self.fixed_step {
            Some(step) => self.frames as f32 * step,
            None => self.started.elapsed().as_secs_f32(),
        };
        self.frames += 1;
        time_s
    }

    /// Frames handed out so far
    fn frames(&self) -> usize {
        self.frames
    }
}

/// Which mouse drag is in progress
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Rotate,
    Pan,
}

/// Window, GPU and overlay state, created on the first `resumed`
struct Runtime {
    window: Arc<Window>,
    render_system: RenderSystem,
    egui_state: egui_winit::State,
    clock: FrameClock,
}

/// Render loop state
enum LoopState {
    Idle,
    Running(Box<Runtime>),
}

/// Main application state
struct App {
    state: LoopState,

    // Scene
    preset: ScenePreset,
    water: WaterSurface,
    ship: Option<Ship>,
    camera: CameraSystem,
    assets: AssetLoader,

    // Overlay
    egui_ctx: egui::Context,
    panel: DebugPanel,

    // Input
    cursor: Option<PhysicalPosition<f64>>,
    drag: Option<Drag>,
    touch: Option<(u64, PhysicalPosition<f64>)>,

    // Configuration
    render_config: RenderConfig,
    background: Rgb,
    recording: Option<RecordingConfig>,

    /// Set when startup fails inside the event loop
    exit_error: Option<anyhow::Error>,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let preset = args.parse_scene_preset()?;
        let water_params = args.water_params()?;
        let water_mesh = args.water_mesh();
        let render_config = args.render_config();
        let recording = args.create_recording_config()?;

        let water = WaterSurface::new(&water_mesh, water_params);
        let ship = preset.ship().cloned().map(Ship::new);

        // Placeholder viewport until the window reports its real size
        let viewport = Viewport::new(
            render_config.window_width,
            render_config.window_height,
            1.0,
            render_config.max_pixel_ratio,
        );
        let camera = CameraSystem::new(preset.camera().clone(), viewport);

        // Start decoding assets while the window comes up
        let mut assets = AssetLoader::new();
        assets.request_environment_map(preset.env_map().clone());
        if let Some(ship) = &ship {
            assets.request_model(ship.params().model_path.clone());
        }

        log::info!(
            "Scene: {} ({}x{} water plane, {} segments)",
            preset.name(),
            water.grid.size(),
            water.grid.size(),
            water.grid.segments()
        );

        Ok(Self {
            state: LoopState::Idle,
            preset,
            water,
            ship,
            camera,
            assets,
            egui_ctx: egui::Context::default(),
            panel: DebugPanel::new(!args.hide_panel && recording.is_none()),
            cursor: None,
            drag: None,
            touch: None,
            background: render_config.background,
            render_config,
            recording,
            exit_error: None,
        })
    }

    /// Create the window, GPU and overlay state
    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Runtime> {
        // Create window
        let window_attributes = Window::default_attributes()
            .with_title(format!("Ragingsea - {}", self.preset.name()))
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        self.camera.resize(size.width, size.height, window.scale_factor());

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.water.grid,
            self.camera.viewport.render_size(),
            self.recording.clone(),
        ))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(render_system.device.limits().max_texture_dimension_2d as usize),
        );

        let clock = FrameClock::new(self.recording.as_ref().map(|r| r.frame_interval()));

        Ok(Runtime {
            window,
            render_system,
            egui_state,
            clock,
        })
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let LoopState::Running(runtime) = &self.state {
            runtime.window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if matches!(self.state, LoopState::Running(_)) {
            return; // Already initialized
        }

        match self.start(event_loop) {
            Ok(runtime) => {
                log::info!("Ragingsea is running");
                log::info!("Drag to orbit, right-drag to pan, scroll to zoom");
                log::info!("Press H to toggle the panel, ESC to quit");
                if let Some(config) = &self.recording {
                    log::info!(
                        "Recording {} frames to {}",
                        config.total_frames(),
                        config.frames_dir()
                    );
                }
                self.state = LoopState::Running(Box::new(runtime));
            }
            Err(e) => {
                self.exit_error = Some(e);
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
        let LoopState::Running(runtime) = &mut self.state else {
            return;
        };
        let runtime = &mut **runtime;

        let consumed = runtime
            .egui_state
            .on_window_event(&runtime.window, &event)
            .consumed;

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyH => self.panel.toggle(),
                _ => {}
            },
            WindowEvent::Resized(size) => {
                let scale_factor = runtime.window.scale_factor();
                if self.camera.resize(size.width, size.height, scale_factor) {
                    let (width, height) = self.camera.viewport.render_size();
                    runtime.render_system.resize(width, height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let size = runtime.window.inner_size();
                if self.camera.resize(size.width, size.height, scale_factor) {
                    let (width, height) = self.camera.viewport.render_size();
                    runtime.render_system.resize(width, height);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed if !consumed => {
                    self.drag = match button {
                        MouseButton::Left => Some(Drag::Rotate),
                        MouseButton::Right => Some(Drag::Pan),
                        _ => self.drag,
                    };
                }
                ElementState::Released => self.drag = None,
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                if let (Some(drag), Some(last)) = (self.drag, self.cursor) {
                    let dx = (position.x - last.x) as f32;
                    let dy = (position.y - last.y) as f32;
                    match drag {
                        Drag::Rotate => self.camera.drag_rotate(dx, dy),
                        Drag::Pan => self.camera.drag_pan(dx, dy),
                    }
                }
                self.cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.drag = None;
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_WHEEL_STEP,
                };
                self.camera.controls.dolly(steps);
            }
            WindowEvent::Touch(touch) => self.handle_touch(touch, consumed),
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

impl App {
    /// Single-finger drag rotates, like the left mouse button
    fn handle_touch(&mut self, touch: Touch, consumed: bool) {
        match touch.phase {
            TouchPhase::Started if !consumed && self.touch.is_none() => {
                self.touch = Some((touch.id, touch.location));
            }
            TouchPhase::Moved => {
                if let Some((id, last)) = self.touch {
                    if id == touch.id {
                        let dx = (touch.location.x - last.x) as f32;
                        let dy = (touch.location.y - last.y) as f32;
                        self.camera.drag_rotate(dx, dy);
                        self.touch = Some((id, touch.location));
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if matches!(self.touch, Some((id, _)) if id == touch.id) {
                    self.touch = None;
                }
            }
            _ => {}
        }
    }

    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let LoopState::Running(runtime) = &mut self.state else {
            return;
        };
        let runtime = &mut **runtime;
        let time_s = runtime.clock.tick();

        // Hand finished loads to the GPU
        for event in self.assets.poll() {
            match event {
                AssetEvent::EnvironmentMap(env) => {
                    log::info!("Environment map ready ({}x{})", env.width, env.height);
                    if let Err(e) = runtime.render_system.set_environment_map(env) {
                        log::warn!("environment map unusable, keeping background: {:#}", e);
                    }
                }
                AssetEvent::Model(mesh) if self.ship.is_some() => {
                    log::info!(
                        "Ship model ready ({} triangles, bounds {:?})",
                        mesh.indices.len() / 3,
                        mesh.bounds()
                    );
                    runtime.render_system.set_model(&mesh);
                }
                AssetEvent::Model(_) => {}
            }
        }

        // Orbit controls (horizon lock is applied on change)
        self.camera.controls.update();

        // Debug panel edits the live parameters before they are uploaded
        let raw_input = runtime.egui_state.take_egui_input(&runtime.window);
        let env_map_loaded = runtime.render_system.has_environment_map();
        let pending_assets = self.assets.pending();
        let mut changed = false;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            changed |= self.panel.show(
                ctx,
                PanelModel {
                    water: &mut self.water.params,
                    background: &mut self.background,
                    env_map_loaded,
                    pending_assets,
                },
            );
        });
        if changed {
            log::debug!("Parameters changed: {:?}", self.water.params);
        }
        runtime
            .egui_state
            .handle_platform_output(&runtime.window, full_output.platform_output);

        let viewport = &self.camera.viewport;
        let surface_scale = (viewport.pixel_ratio() / viewport.scale_factor) as f32;
        let (width, height) = runtime.render_system.size();
        let overlay = OverlayFrame {
            paint_jobs: self
                .egui_ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point),
            textures_delta: full_output.textures_delta,
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [width, height],
                pixels_per_point: full_output.pixels_per_point * surface_scale,
            },
        };

        // Upload uniforms
        let (view_proj, _camera_pos) = self.camera.create_view_proj_matrix();
        let render_system = &mut runtime.render_system;
        render_system.update_water_uniforms(&self.water.uniforms(view_proj, time_s));
        render_system.update_background_uniforms(self.camera.background_inv_view_proj());

        if let Some(ship) = &self.ship {
            let grid = &self.water.grid;
            let pose = ship.pose(time_s, &self.water.field(), |x, z| grid.covers(x, z));
            render_system.update_ship_uniforms(&ShipUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                model: pose.model_matrix().to_cols_array_2d(),
                light: SHIP_LIGHT,
            });
        }

        // Render
        let capture = self.recording.as_ref().map(|_| runtime.clock.frames() - 1);
        let frame = FrameInput {
            clear_color: self.background,
            overlay: Some(overlay),
            capture,
        };

        match render_system.render(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                render_system.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        // Stop once every frame has been written
        if let Some(config) = &self.recording {
            let done = runtime.clock.frames();
            if done % config.fps as usize == 0 {
                log::info!("Recorded {}/{} frames", done, config.total_frames());
            }
            if done >= config.total_frames() {
                log::info!("Recording complete: {}", config.frames_dir());
                event_loop.exit();
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut app = App::new(&args)?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.exit_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_clock() {
        let mut clock = FrameClock::new(Some(0.5));
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.tick(), 0.5);
        assert_eq!(clock.tick(), 1.0);
        assert_eq!(clock.frames(), 3);
    }

    #[test]
    fn test_wall_clock_is_monotonic() {
        let mut clock = FrameClock::new(None);
        let a = clock.tick();
        let b = clock.tick();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
