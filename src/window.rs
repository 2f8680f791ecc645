//! Interactive window host.
//!
//! Opens a fixed-size window matching the scene, advances the simulation once
//! per redraw (paced by a [`FrameClock`]) and draws the scene with the GPU
//! rectangle renderer. The measured frame rate is shown in the title bar.
//!
//! Keys: `X` or `Escape` quit, `Space` pauses.

use std::sync::Arc;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::driver::FrameDriver;
use crate::error::WindowError;
use crate::gpu::RectRenderer;
use crate::input::{Command, Input};
use crate::time::FrameClock;
use crate::Eruptor;

const TITLE: &str = "Volcano";

/// Redraws between title bar refreshes. Counted in clock ticks so the title
/// keeps refreshing while paused.
const TITLE_REFRESH: u64 = 30;

struct App<E: Eruptor> {
    driver: FrameDriver<E>,
    clock: FrameClock,
    input: Input,
    window: Option<Arc<Window>>,
    renderer: Option<RectRenderer>,
    /// First fatal error; reported once the event loop returns.
    error: Option<WindowError>,
}

impl<E: Eruptor> App<E> {
    fn new(driver: FrameDriver<E>, fps: u32) -> Self {
        Self {
            driver,
            clock: FrameClock::new(fps),
            input: Input::new(),
            window: None,
            renderer: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), WindowError> {
        let size = self.driver.planet().mapper().surface_size();
        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::PhysicalSize::new(size.x, size.y))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let renderer = pollster::block_on(RectRenderer::new(
            window.clone(),
            [size.x as f32, size.y as f32],
        ))?;
        info!("window opened at {}x{}", size.x, size.y);

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: WindowError) {
        error!("{}", err);
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    /// Apply keyboard commands. Returns `false` when the app should quit.
    fn handle_commands(&mut self) -> bool {
        for command in self.input.commands() {
            match command {
                Command::Quit => return false,
                Command::TogglePause => {
                    self.clock.toggle_pause();
                    info!("{}", if self.clock.is_paused() { "paused" } else { "resumed" });
                }
            }
        }
        self.input.begin_frame();
        true
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.handle_commands() {
            info!("quit requested");
            event_loop.exit();
            return;
        }

        self.clock.tick();
        if !self.clock.is_paused() {
            self.driver.advance();
        }

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        let planet = self.driver.planet();
        renderer.upload(planet.sprites());
        match renderer.render(planet.background()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => warn!("render error: {:?}", e),
        }

        if let Some(window) = &self.window {
            if self.clock.ticks() % TITLE_REFRESH == 0 {
                let title = if self.clock.is_paused() {
                    format!("{} - paused", TITLE)
                } else {
                    format!("{} - {:.0} fps", TITLE, self.clock.fps())
                };
                window.set_title(&title);
            }
            window.request_redraw();
        }
    }
}

impl<E: Eruptor> ApplicationHandler for App<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Run `driver` in a window until the user quits.
pub fn run<E: Eruptor>(driver: FrameDriver<E>, fps: u32) -> Result<(), WindowError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(driver, fps);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
