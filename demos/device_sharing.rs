use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use video_manager::utils::{setup_logging, LogConfig};
use video_manager::{DeviceManager, ManagerError, ServiceKind, SoftwareDevice};

fn main() -> Result<()> {
    setup_logging(LogConfig::default()).map_err(anyhow::Error::msg)?;

    let (manager, token) = DeviceManager::builder().build()?;
    let device = Arc::new(SoftwareDevice::new("primary-gpu"));
    manager.reset_device(device, token)?;

    // Two clients share the device through independent handles.
    let decoder = manager.open_device_handle()?;
    let presenter = manager.open_device_handle()?;

    let locked = manager.lock_device(decoder, false)?;
    info!(device = locked.name(), "decoder locked the device");

    match manager.lock_device(presenter, false) {
        Err(ManagerError::VideoDeviceLocked) => {
            info!("presenter saw contention and will retry after the decoder is done")
        }
        other => anyhow::bail!("expected contention, got {:?}", other.map(|d| d.name().to_string())),
    }

    manager.unlock_device(decoder, false)?;
    let locked = manager.lock_device(presenter, false)?;
    info!(device = locked.name(), "presenter locked the device");
    manager.unlock_device(presenter, false)?;

    let service = manager.get_video_service(presenter, ServiceKind::VideoProcessor)?;
    info!(device = service.device().name(), "presenter obtained a processor service");

    manager.close_device_handle(decoder)?;
    manager.close_device_handle(presenter)?;

    let metrics = manager.metrics();
    info!(
        locks = metrics.lock.acquired,
        contention = metrics.lock.contention,
        "session finished"
    );
    Ok(())
}
