//! NVIDIA GPU sampling via NVML.

use nvml_wrapper::enum_wrappers::device::TemperatureSensor;
use nvml_wrapper::Nvml;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::metrics::types::GpuSample;

/// Handle to the NVML library and the devices enumerated at startup.
///
/// The library is initialized once; dropping this shuts NVML down.
pub(crate) struct GpuDevices {
    nvml: Nvml,
    count: u32,
}

impl GpuDevices {
    /// Probes for NVML and NVIDIA devices.
    ///
    /// Returns `None` when the library is unavailable or no device is
    /// present; both are tolerated absences, not errors.
    pub fn probe() -> Option<Self> {
        match Nvml::init() {
            Ok(nvml) => {
                let count = nvml.device_count().unwrap_or(0);
                if count == 0 {
                    debug!("NVML initialized but no NVIDIA device found");
                    return None;
                }
                info!(count, "NVML initialized");
                Some(Self { nvml, count })
            }
            Err(e) => {
                warn!("NVML unavailable: {e}");
                None
            }
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Samples one device. A failure on an already-initialized handle is
    /// propagated as fatal.
    pub fn sample(&self, index: u32) -> Result<GpuSample> {
        let device = self.nvml.device_by_index(index)?;
        let utilization = device.utilization_rates()?;
        let temperature = device.temperature(TemperatureSensor::Gpu)?;
        Ok(GpuSample {
            load_percent: utilization.gpu as f32,
            vram_percent: utilization.memory as f32,
            temperature_c: temperature as f32,
        })
    }
}
