//! Service objects constructed over the managed device.
//!
//! Services hold their own counted reference to the device they were
//! created on; their lifetime is independent of the handle used to
//! request them and of the manager itself. A service created before a
//! device reset keeps operating on the device it was bound to.

mod acceleration;
mod processor;

pub use acceleration::{SurfaceFormat, VideoAccelerationService, VideoSurface};
pub use processor::VideoProcessorService;

use crate::device::SharedDevice;

/// Selects which service a request constructs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Video processing (scaling, composition)
    VideoProcessor,
    /// Video acceleration (surface management, decode)
    VideoAcceleration,
}

/// A service object bound to a counted device reference
#[derive(Clone)]
pub enum VideoService {
    /// A processing service
    Processor(VideoProcessorService),
    /// An acceleration service
    Acceleration(VideoAccelerationService),
}

impl VideoService {
    /// Which kind of service this is
    pub fn kind(&self) -> ServiceKind {
        match self {
            VideoService::Processor(_) => ServiceKind::VideoProcessor,
            VideoService::Acceleration(_) => ServiceKind::VideoAcceleration,
        }
    }

    /// Counted reference to the device this service operates on
    pub fn device(&self) -> SharedDevice {
        match self {
            VideoService::Processor(service) => service.device(),
            VideoService::Acceleration(service) => service.device(),
        }
    }
}

/// Construct a service directly from a device reference, without going
/// through a manager or holding a handle.
pub fn create_video_service(device: SharedDevice, kind: ServiceKind) -> VideoService {
    match kind {
        ServiceKind::VideoProcessor => {
            VideoService::Processor(VideoProcessorService::new(device))
        }
        ServiceKind::VideoAcceleration => {
            VideoService::Acceleration(VideoAccelerationService::new(device))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SoftwareDevice;
    use std::sync::Arc;

    #[test]
    fn test_standalone_service_creation() {
        let device: SharedDevice = Arc::new(SoftwareDevice::new("test-device"));

        let service = create_video_service(device.clone(), ServiceKind::VideoProcessor);
        assert_eq!(service.kind(), ServiceKind::VideoProcessor);
        assert!(Arc::ptr_eq(&service.device(), &device));

        let service = create_video_service(device.clone(), ServiceKind::VideoAcceleration);
        assert_eq!(service.kind(), ServiceKind::VideoAcceleration);
        assert!(Arc::ptr_eq(&service.device(), &device));
    }
}
