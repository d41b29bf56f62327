use std::sync::Arc;

use tracing::debug;

use crate::device::SharedDevice;
use crate::error::{ManagerError, Result};

/// Pixel layout of a video surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFormat {
    /// 32-bit RGB, padding byte
    X8R8G8B8,
    /// 32-bit RGB with alpha
    A8R8G8B8,
    /// Planar 4:2:0 luma/chroma
    Nv12,
}

/// Video acceleration service bound to a device.
///
/// Creates surfaces backed by the device it was bound to at creation
/// time; a manager reset after the fact does not redirect it.
#[derive(Clone)]
pub struct VideoAccelerationService {
    device: SharedDevice,
}

impl VideoAccelerationService {
    pub(crate) fn new(device: SharedDevice) -> Self {
        Self { device }
    }

    /// Counted reference to the device this service operates on
    pub fn device(&self) -> SharedDevice {
        Arc::clone(&self.device)
    }

    /// Create a surface backed by this service's device.
    ///
    /// Fails with [`ManagerError::InvalidArgument`] when either dimension
    /// is zero.
    pub fn create_surface(
        &self,
        width: u32,
        height: u32,
        format: SurfaceFormat,
    ) -> Result<VideoSurface> {
        if width == 0 || height == 0 {
            return Err(ManagerError::InvalidArgument {
                message: format!("surface dimensions {}x{} must be non-zero", width, height),
            });
        }

        debug!(
            device = self.device.name(),
            width,
            height,
            ?format,
            "created video surface"
        );

        Ok(VideoSurface {
            width,
            height,
            format,
            device: Arc::clone(&self.device),
        })
    }
}

/// A surface allocated on a device
pub struct VideoSurface {
    width: u32,
    height: u32,
    format: SurfaceFormat,
    device: SharedDevice,
}

impl VideoSurface {
    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Surface pixel format
    pub fn format(&self) -> SurfaceFormat {
        self.format
    }

    /// Counted reference to the device this surface was created on
    pub fn device(&self) -> SharedDevice {
        Arc::clone(&self.device)
    }
}
