//! Metrics source: best-effort host readings, sampled once per tick.
//!
//! Discovery happens once at construction: the first CPU-like temperature
//! sensor (label containing `cpu` or `coretemp`) and the NVML device count
//! are looked up at startup and reused for the process lifetime. A missing
//! sensor or missing GPUs degrade to zero readings; failures while
//! sampling an already-initialized source propagate as fatal.

mod gpu;
mod types;

pub use types::{CpuSample, GpuSample, Snapshot, UsageSample, GIB};

use std::path::Path;

use chrono::Local;
#[cfg(test)]
use mockall::automock;
use sysinfo::{Components, Disks, System};
use tracing::{info, warn};

use crate::config::{DISK_ROOT, GPU_SLOTS};
use crate::error::{Error, Result};
use gpu::GpuDevices;

/// Source of per-tick metric snapshots.
///
/// Abstracted so the scheduler and composer can be driven by a mock.
#[cfg_attr(test, automock)]
pub trait MetricsProvider: Send {
    /// Host name, read once during setup.
    fn hostname(&self) -> String;

    /// Samples every displayed metric. Not retained across calls.
    fn sample(&mut self) -> Result<Snapshot>;
}

/// Live metrics source backed by sysinfo and NVML.
pub struct MetricsSource {
    system: System,
    components: Components,
    cpu_sensor: Option<String>,
    disks: Disks,
    gpus: Option<GpuDevices>,
}

impl MetricsSource {
    /// Initializes the source and performs one-time discovery.
    pub fn new() -> Result<Self> {
        let mut system = System::new();
        // Prime the CPU counters so the first tick has a baseline.
        system.refresh_cpu_usage();
        system.refresh_memory();

        let components = Components::new_with_refreshed_list();
        let cpu_sensor = discover_cpu_sensor(&components);
        match &cpu_sensor {
            Some(label) => info!(sensor = %label, "CPU temperature sensor discovered"),
            None => warn!("no CPU-like temperature sensor; reporting 0°C"),
        }

        let disks = Disks::new_with_refreshed_list();
        let gpus = GpuDevices::probe();

        Ok(Self { system, components, cpu_sensor, disks, gpus })
    }

    /// Number of NVIDIA devices detected at startup.
    pub fn gpu_count(&self) -> u32 {
        self.gpus.as_ref().map_or(0, GpuDevices::count)
    }

    fn cpu_temperature(&mut self) -> f32 {
        let Some(label) = self.cpu_sensor.as_deref() else {
            return 0.0;
        };
        for component in self.components.list_mut() {
            if component.label() == label {
                component.refresh();
                return component.temperature();
            }
        }
        0.0
    }

    fn disk_usage(&mut self) -> Result<UsageSample> {
        let root = Path::new(DISK_ROOT);
        for disk in self.disks.list_mut() {
            if disk.mount_point() == root {
                disk.refresh();
                let total = disk.total_space();
                let free = disk.available_space();
                let used = total.saturating_sub(free);
                return Ok(UsageSample { percent: percent_of(used, total), used, free });
            }
        }
        Err(Error::metrics(format!("no disk mounted at {DISK_ROOT}")))
    }
}

impl MetricsProvider for MetricsSource {
    fn hostname(&self) -> String {
        System::host_name().unwrap_or_else(|| "unknown".to_owned())
    }

    fn sample(&mut self) -> Result<Snapshot> {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let cpu = CpuSample {
            load_percent: self.system.global_cpu_info().cpu_usage(),
            temperature_c: self.cpu_temperature(),
        };

        let memory = UsageSample {
            percent: percent_of(self.system.used_memory(), self.system.total_memory()),
            used: self.system.used_memory(),
            free: self.system.free_memory(),
        };
        let swap = UsageSample {
            percent: percent_of(self.system.used_swap(), self.system.total_swap()),
            used: self.system.used_swap(),
            free: self.system.free_swap(),
        };
        let disk = self.disk_usage()?;

        let mut gpus = [GpuSample::default(); GPU_SLOTS];
        if let Some(devices) = &self.gpus {
            let present = (devices.count() as usize).min(GPU_SLOTS);
            for (index, slot) in gpus.iter_mut().enumerate().take(present) {
                *slot = devices.sample(index as u32)?;
            }
        }

        Ok(Snapshot { timestamp: Local::now(), cpu, memory, swap, disk, gpus })
    }
}

/// Finds the first sensor whose label looks like a CPU package sensor.
fn discover_cpu_sensor(components: &Components) -> Option<String> {
    components.list().iter().find_map(|component| {
        let label = component.label().to_lowercase();
        if label.contains("cpu") || label.contains("coretemp") {
            Some(component.label().to_owned())
        } else {
            None
        }
    })
}

fn percent_of(used: u64, total: u64) -> f32 {
    if total == 0 {
        0.0
    } else {
        (used as f64 / total as f64 * 100.0) as f32
    }
}
