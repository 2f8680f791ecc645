//! Error types for the volcano simulation.
//!
//! Every error in the core is a precondition violation on data supplied by
//! configuration or calling code. They are raised at the call that introduced
//! the bad value; nothing in the core recovers from them.

use std::fmt;

/// Errors raised by the simulation core.
#[derive(Debug, Clone, PartialEq)]
pub enum EruptionError {
    /// A coordinate or size has the wrong number of components, a normalized
    /// size is outside `[0, 1]`, or a surface has a zero extent.
    InvalidDimension(String),
    /// A configuration value or assignment that the simulation cannot run with.
    InvalidConfiguration(String),
    /// Randomized spawn angle spread of 90 degrees or more.
    UnsupportedAngle(f64),
}

impl fmt::Display for EruptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EruptionError::InvalidDimension(msg) => write!(f, "Invalid dimension: {}", msg),
            EruptionError::InvalidConfiguration(msg) => {
                write!(f, "Invalid configuration: {}", msg)
            }
            EruptionError::UnsupportedAngle(angle) => write!(
                f,
                "Unsupported spawn angle spread {}°: must be below 90° to decompose the velocity",
                angle
            ),
        }
    }
}

impl std::error::Error for EruptionError {}

/// Errors that can occur while loading or saving a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
    /// The file parsed but describes a simulation that cannot run.
    Invalid(EruptionError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Json(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Config rejected: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl From<EruptionError> for ConfigError {
    fn from(e: EruptionError) -> Self {
        ConfigError::Invalid(e)
    }
}

/// Errors that can occur while writing rendered frames.
#[derive(Debug)]
pub enum RenderError {
    /// Failed to encode the frame image.
    Image(image::ImageError),
    /// Failed to create the output directory.
    Io(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Image(e) => write!(f, "Failed to write frame image: {}", e),
            RenderError::Io(e) => write!(f, "Failed to prepare output directory: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Image(e) => Some(e),
            RenderError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

/// Errors that can occur while running the windowed host.
#[cfg(feature = "window")]
#[derive(Debug)]
pub enum WindowError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

#[cfg(feature = "window")]
impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            WindowError::Window(e) => write!(f, "Failed to create window: {}", e),
            WindowError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            WindowError::NoAdapter => write!(f, "No compatible GPU adapter found."),
            WindowError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

#[cfg(feature = "window")]
impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::EventLoop(e) => Some(e),
            WindowError::Window(e) => Some(e),
            WindowError::SurfaceCreation(e) => Some(e),
            WindowError::DeviceCreation(e) => Some(e),
            WindowError::NoAdapter => None,
        }
    }
}

#[cfg(feature = "window")]
impl From<winit::error::EventLoopError> for WindowError {
    fn from(e: winit::error::EventLoopError) -> Self {
        WindowError::EventLoop(e)
    }
}

#[cfg(feature = "window")]
impl From<winit::error::OsError> for WindowError {
    fn from(e: winit::error::OsError) -> Self {
        WindowError::Window(e)
    }
}

#[cfg(feature = "window")]
impl From<wgpu::CreateSurfaceError> for WindowError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        WindowError::SurfaceCreation(e)
    }
}

#[cfg(feature = "window")]
impl From<wgpu::RequestDeviceError> for WindowError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        WindowError::DeviceCreation(e)
    }
}
