use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use video_manager::utils::{setup_logging, LogConfig};
use video_manager::{DeviceManager, ManagerError, SoftwareDevice};

const WORKERS: usize = 4;
const CLAIMS_PER_WORKER: usize = 5;

fn main() -> Result<()> {
    setup_logging(LogConfig::default()).map_err(anyhow::Error::msg)?;

    let (manager, token) = DeviceManager::builder().build()?;
    manager.reset_device(Arc::new(SoftwareDevice::new("shared-gpu")), token)?;
    let manager = Arc::new(manager);

    let workers: Vec<_> = (0..WORKERS)
        .map(|id| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                let handle = manager.open_device_handle().expect("handle");
                let mut retries = 0usize;
                for _ in 0..CLAIMS_PER_WORKER {
                    // Non-blocking claim; back off and retry on contention.
                    loop {
                        match manager.lock_device(handle, false) {
                            Ok(_device) => {
                                thread::sleep(Duration::from_millis(2));
                                manager.unlock_device(handle, false).expect("unlock");
                                break;
                            }
                            Err(ManagerError::VideoDeviceLocked) => {
                                retries += 1;
                                thread::yield_now();
                            }
                            Err(err) => panic!("worker {}: {}", id, err),
                        }
                    }
                }
                manager.close_device_handle(handle).expect("close");
                retries
            })
        })
        .collect();

    let mut total_retries = 0;
    for worker in workers {
        total_retries += worker.join().expect("worker panicked");
    }

    let metrics = manager.metrics();
    info!(
        claims = metrics.lock.acquired,
        contention = metrics.lock.contention,
        retries = total_retries,
        average_hold = ?metrics.lock.average_hold_time,
        "all workers finished"
    );
    Ok(())
}
