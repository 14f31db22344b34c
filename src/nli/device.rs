use candle_core::Device;
use tracing::{debug, info, warn};

type OpenDevice = fn() -> candle_core::Result<Device>;

/// GPU backends compiled into this build, in preference order.
const GPU_BACKENDS: &[(&str, OpenDevice)] = &[
    #[cfg(feature = "metal")]
    ("metal", open_metal),
    #[cfg(feature = "cuda")]
    ("cuda", open_cuda),
];

#[cfg(feature = "metal")]
fn open_metal() -> candle_core::Result<Device> {
    Device::new_metal(0)
}

#[cfg(feature = "cuda")]
fn open_cuda() -> candle_core::Result<Device> {
    Device::new_cuda(0)
}

/// First compiled-in GPU that initializes, otherwise the CPU.
pub fn select_device() -> Device {
    if GPU_BACKENDS.is_empty() {
        debug!("No GPU features enabled");
    }

    for (name, open) in GPU_BACKENDS {
        match open() {
            Ok(device) => {
                info!(backend = name, "Running entailment model on GPU");
                return device;
            }
            Err(e) => warn!(backend = name, error = %e, "GPU device unavailable"),
        }
    }

    info!("Running entailment model on CPU");
    Device::Cpu
}
