//! Animation builder and window runner.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::animator::Animator;
use crate::error::RunError;
use crate::field::{FieldConfig, PointField};
use crate::gpu::{geometry::build_frame, GpuState};
use crate::input::Pointer;
use crate::rules::{Boundary, ResizePolicy};
use crate::visuals::FieldVisuals;

/// How often (in frames) the FPS estimate is logged at debug level.
const FPS_LOG_INTERVAL: u64 = 300;

/// A point-field animation builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// FieldAnimation::new()
///     .with_config(FieldConfig::sparse())
///     .with_title("constellation")
///     .run()
/// ```
pub struct FieldAnimation {
    config: FieldConfig,
    visuals: FieldVisuals,
    title: String,
    size: (u32, u32),
    rng_seed: Option<u64>,
}

impl FieldAnimation {
    /// Create an animation with the default (mesh) field preset.
    pub fn new() -> Self {
        Self {
            config: FieldConfig::default(),
            visuals: FieldVisuals::default(),
            title: "pointfield".to_string(),
            size: (1280, 720),
            rng_seed: None,
        }
    }

    /// Replace the whole field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of points seeded at startup.
    pub fn with_seed_count(mut self, count: usize) -> Self {
        self.config.seed_count = count;
        self
    }

    /// Set the boundary policy.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.config.boundary = boundary;
        self
    }

    /// Set the resize policy.
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.config.resize = policy;
        self
    }

    /// Set the proximity threshold for link lines, in pixels.
    pub fn with_link_distance(mut self, distance: f32) -> Self {
        self.config.link_distance = distance;
        self
    }

    /// Set how many points a click inserts and how far they scatter.
    pub fn with_click_batch(mut self, batch: usize, scatter: f32) -> Self {
        self.config.click_batch = batch;
        self.config.click_scatter = scatter;
        self
    }

    /// Set the maximum velocity component, in pixels per frame.
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.config.max_speed = max_speed;
        self
    }

    /// Configure rendering through a closure.
    pub fn with_visuals<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut FieldVisuals),
    {
        f(&mut self.visuals);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Seed the field's RNG for reproducible runs.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Open the window and run until it is closed or Escape is pressed.
    ///
    /// Space toggles pause. Clicks insert points.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for FieldAnimation {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    settings: FieldAnimation,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    animator: Option<Animator>,
    pointer: Pointer,
    error: Option<RunError>,
}

impl App {
    fn new(settings: FieldAnimation) -> Self {
        Self {
            settings,
            window: None,
            gpu: None,
            animator: None,
            pointer: Pointer::new(),
            error: None,
        }
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(animator) = &mut self.animator {
            animator.stop();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.settings.size.0,
                self.settings.size.1,
            ));

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.error = Some(RunError::Window(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        let gpu = match pollster::block_on(GpuState::new(window, &self.settings.visuals)) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.error = Some(RunError::Gpu(e));
                event_loop.exit();
                return;
            }
        };

        // Seed the field against the real surface size, not the requested one.
        let mut config = self.settings.config.clone();
        config.width = gpu.config.width as f32;
        config.height = gpu.config.height as f32;
        let field = PointField::new(config, self.settings.rng_seed);

        let mut animator = Animator::new(field);
        animator.start();

        self.gpu = Some(gpu);
        self.animator = Some(animator);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                self.shut_down(event_loop);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => self.shut_down(event_loop),
                        PhysicalKey::Code(KeyCode::Space) => {
                            if let Some(animator) = &mut self.animator {
                                animator.toggle_pause();
                            }
                        }
                        _ => {}
                    }
                }
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                if let Some(animator) = &mut self.animator {
                    animator.resize(physical_size.width as f32, physical_size.height as f32);
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(gpu), Some(animator)) = (&mut self.gpu, &mut self.animator) {
                    for click in self.pointer.take_clicks() {
                        animator.click(click);
                    }
                    animator.tick();

                    let frame = build_frame(animator.field(), &self.settings.visuals);
                    match gpu.render(&frame) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                            gpu.resize(winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            })
                        }
                        Err(e @ wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("render: out of GPU memory");
                            animator.stop();
                            self.error = Some(RunError::Gpu(e.into()));
                            event_loop.exit();
                        }
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }

                    let frame_no = animator.clock().frame();
                    if frame_no > 0 && frame_no % FPS_LOG_INTERVAL == 0 {
                        log::debug!(
                            "frame {}: {:.1} fps, {} points, {} links",
                            frame_no,
                            animator.clock().fps(),
                            animator.field().len(),
                            frame.lines.len(),
                        );
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
