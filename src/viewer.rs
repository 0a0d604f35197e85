//! Interactive window around a [`Visualizer`].
//!
//! ```ignore
//! use magview::{Viewer, ViewerConfig};
//!
//! Viewer::new()
//!     .with_config(ViewerConfig::new().with_title("relaxation"))
//!     .with_frames(frames)
//!     .run()?;
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::frames::FrameSequence;
use crate::gpu::GpuState;
use crate::input::{Interaction, ViewCommand};
use crate::scene::GlyphBatch;
use crate::visualizer::Visualizer;
use crate::volume::VectorGrid;

#[cfg(feature = "egui")]
use crate::gpu::EguiIntegration;
#[cfg(feature = "egui")]
use crate::ui::{control_panel, FrameControl};

/// Builder and entry point for the viewer window.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    config: ViewerConfig,
    frames: FrameSequence,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ViewerConfig) -> Self {
        self.config = config;
        self
    }

    /// Append frames to the animation sequence. The first frame is shown on
    /// startup.
    pub fn with_frames(mut self, frames: impl IntoIterator<Item = VectorGrid>) -> Self {
        for frame in frames {
            self.frames.push(frame);
        }
        self
    }

    /// Append a single frame.
    pub fn with_frame(mut self, frame: VectorGrid) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    /// Open the window and run until it is closed.
    ///
    /// Startup failures (event loop, window, GPU) are returned; an empty
    /// frame sequence is not an error and just shows the background.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self.config, self.frames);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    config: ViewerConfig,
    frames: FrameSequence,
    visualizer: Visualizer,
    interaction: Interaction,
    commands: Vec<ViewCommand>,
    batch: GlyphBatch,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    error: Option<ViewerError>,
}

impl App {
    fn new(config: ViewerConfig, frames: FrameSequence) -> Self {
        let mut visualizer = Visualizer::new();
        match frames.current() {
            Some(frame) => visualizer.bind(frame),
            None => log::info!("No frames loaded, starting empty"),
        }

        Self {
            config,
            frames,
            visualizer,
            interaction: Interaction::new(),
            commands: Vec::new(),
            batch: GlyphBatch::new(),
            window: None,
            gpu: None,
            #[cfg(feature = "egui")]
            egui: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(window.clone(), &self.config))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(gpu.device(), gpu.config.format, &window));
        }

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.visualizer.request_repaint();
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop) {
        let mut commands = std::mem::take(&mut self.commands);
        for command in commands.drain(..) {
            let frame = match command {
                ViewCommand::Rotate { axis, delta } => {
                    self.visualizer.rotate_by(axis, delta);
                    None
                }
                ViewCommand::Zoom(delta) => {
                    self.visualizer.set_zoom(delta);
                    None
                }
                ViewCommand::StepFrame(delta) => self.frames.step(delta),
                ViewCommand::FirstFrame => self.frames.first(),
                ViewCommand::LastFrame => self.frames.last(),
                ViewCommand::Quit => {
                    event_loop.exit();
                    None
                }
            };
            if let Some(frame) = frame {
                self.visualizer.bind(frame);
            }
        }
        self.commands = commands;
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // The panel runs first so its edits land in this frame.
        #[cfg(feature = "egui")]
        let overlay = match (self.egui.as_mut(), self.window.as_ref()) {
            (Some(egui), Some(window)) => {
                let frames = FrameControl {
                    current: self.frames.current_index(),
                    count: self.frames.len(),
                };
                let visualizer = &mut self.visualizer;
                let mut picked = None;
                let output = egui.run(window, |ctx| {
                    picked = control_panel(ctx, visualizer, frames);
                });
                if let Some(frame) = picked.and_then(|index| self.frames.select(index)) {
                    self.visualizer.bind(frame);
                }
                if output.needs_repaint {
                    self.visualizer.request_repaint();
                }
                Some((egui, output))
            }
            _ => None,
        };

        let drawn = self.visualizer.paint(&mut self.batch);
        log::trace!("Painted {} glyphs", drawn);

        #[cfg(feature = "egui")]
        let result = {
            let mut overlay = overlay;
            gpu.render(
                &self.batch,
                overlay.as_mut().map(|(egui, output)| (&mut **egui, &*output)),
            )
        };
        #[cfg(not(feature = "egui"))]
        let result = gpu.render(&self.batch);

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                self.visualizer.request_repaint();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        {
            if let (Some(egui), Some(window)) = (self.egui.as_mut(), self.window.as_ref()) {
                let (consumed, repaint) = egui.on_window_event(window, &event);
                if repaint {
                    self.visualizer.request_repaint();
                }
                if consumed {
                    if crate::input::ends_drag(&event) {
                        self.interaction.handle_event(&event, &mut self.commands);
                    }
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                self.visualizer.request_repaint();
            }
            WindowEvent::ScaleFactorChanged { .. } | WindowEvent::Occluded(false) => {
                self.visualizer.request_repaint();
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            event => {
                self.interaction.handle_event(&event, &mut self.commands);
                if !self.commands.is_empty() {
                    self.apply_commands(event_loop);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        for change in self.visualizer.drain_notifications() {
            log::debug!("{} rotation changed to {}", change.axis.label(), change.angle);
        }
        if self.visualizer.take_repaint() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
