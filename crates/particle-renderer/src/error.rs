//! Error types for presentation.
//!
//! GPU setup errors are fatal to the application; presentation errors are
//! per-frame and are expected to be swallowed by the caller.

use std::fmt;

/// Errors that can occur while setting up the presentation surface.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for the window.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can drive the surface.
    NoAdapter(wgpu::RequestAdapterError),
    /// Failed to create the GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable texture formats.
    UnsupportedSurface,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter(e) => write!(f, "No compatible GPU adapter found: {}", e),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::UnsupportedSurface => write!(f, "Surface has no supported texture format"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::NoAdapter(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::UnsupportedSurface => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestAdapterError> for GpuError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        GpuError::NoAdapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors from presenting a single frame.
#[derive(Debug)]
pub enum PresentError {
    /// The swapchain texture could not be acquired.
    Surface(wgpu::SurfaceError),
    /// The frame does not match the size the presenter was built for.
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::Surface(e) => write!(f, "Failed to acquire surface texture: {}", e),
            PresentError::FrameSizeMismatch { expected, actual } => write!(
                f,
                "Frame is {}x{}, presenter expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for PresentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresentError::Surface(e) => Some(e),
            PresentError::FrameSizeMismatch { .. } => None,
        }
    }
}

impl From<wgpu::SurfaceError> for PresentError {
    fn from(e: wgpu::SurfaceError) -> Self {
        PresentError::Surface(e)
    }
}
