//! CLARION beams - animated light-beam background
//!
//! Vertical strips of a dark glossy surface, displaced by scrolling Perlin
//! noise so highlights sweep across them like moving beams of light.

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use clarion_beams::beams::BeamsSystem;
use clarion_beams::camera::{group_transform, SceneCamera};
use clarion_beams::cli::Args;
use clarion_beams::params::{RecordingConfig, RenderConfig};
use clarion_beams::rendering::{RenderSystem, SurfaceUniforms};
use clarion_beams::shader::{beams_program, BeamParams};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    beams: BeamsSystem,
    camera: SceneCamera,

    // Configuration
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,

    // Time tracking
    last_frame: Instant,
    frame_count: usize,
}

impl App {
    fn new(
        beams: BeamsSystem,
        render_config: RenderConfig,
        recording_config: Option<RecordingConfig>,
    ) -> Self {
        let camera = SceneCamera::new(render_config.camera.clone());

        Self {
            window: None,
            render_system: None,
            beams,
            camera,
            render_config,
            recording_config,
            last_frame: Instant::now(),
            frame_count: 0,
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("CLARION Beams")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.beams.mesh,
            &beams_program(),
            &self.render_config.scene,
            self.recording_config.clone(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        info!("Beams running, press ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                    self.render_config.window_width = size.width.max(1);
                    self.render_config.window_height = size.height.max(1);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ref render_system) = self.render_system else {
            return;
        };

        // Recording uses a fixed timestep so captured motion is frame-rate independent
        let now = Instant::now();
        let delta_s = match &self.recording_config {
            Some(config) => config.frame_delta_s(),
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;

        let time = self.beams.update(delta_s);
        let config = &self.beams.config;

        let uniforms = SurfaceUniforms::new(
            self.camera.view_proj(self.render_config.aspect_ratio()),
            group_transform(config.rotation_degrees),
            self.camera.eye(),
            config,
            &self.render_config.scene,
        );
        render_system.update_surface_uniforms(&uniforms);
        render_system.update_beam_params(&BeamParams {
            time,
            speed: config.speed,
            noise_intensity: config.noise_intensity,
            scale: config.scale,
        });

        match render_system.render(self.frame_count) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => {
                warn!("Render error: {:?}", e);
                return;
            }
        }

        self.frame_count += 1;

        if let Some(ref config) = self.recording_config {
            if self.frame_count % config.fps as usize == 0 {
                info!("Recorded {}/{} frames", self.frame_count, config.total_frames());
            }
            if self.frame_count >= config.total_frames() {
                info!("Recording complete: {}", config.frames_dir());
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let beams = BeamsSystem::new(args.beams_config()?)?;
    let render_config = args.render_config();
    let recording_config = args.recording_config()?;

    let mut app = App::new(beams, render_config, recording_config);
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
