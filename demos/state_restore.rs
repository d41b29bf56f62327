use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use video_manager::utils::{setup_logging, LogConfig};
use video_manager::{DeviceManager, SharedDevice, SoftwareDevice};

fn main() -> Result<()> {
    setup_logging(LogConfig::default()).map_err(anyhow::Error::msg)?;

    let (manager, token) = DeviceManager::builder().build()?;
    let device = Arc::new(SoftwareDevice::new("primary-gpu"));
    manager.reset_device(Arc::clone(&device) as SharedDevice, token)?;

    let handle = manager.open_device_handle()?;

    // Configure render state under the lock, then unlock with save.
    manager.lock_device(handle, false)?;
    device.set_parameter("scissor.left", 50);
    device.set_parameter("scissor.top", 60);
    manager.unlock_device(handle, true)?;
    info!("state saved at unlock");

    // Another client scribbles over the state while unlocked.
    device.set_parameter("scissor.left", 30);
    info!(
        scissor_left = device.parameter("scissor.left"),
        "state mutated outside the lock"
    );

    // The next lock restores the saved snapshot before returning.
    manager.lock_device(handle, false)?;
    info!(
        scissor_left = device.parameter("scissor.left"),
        scissor_top = device.parameter("scissor.top"),
        "state restored on relock"
    );
    manager.unlock_device(handle, false)?;
    manager.close_device_handle(handle)?;
    Ok(())
}
