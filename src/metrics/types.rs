use chrono::{DateTime, Local};

use crate::config::GPU_SLOTS;

/// Bytes per GiB, used for all byte-to-GiB display conversions.
pub const GIB: f64 = (1u64 << 30) as f64;

/// CPU readings for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuSample {
    /// Load percentage (0-100).
    pub load_percent: f32,
    /// Temperature in Celsius; 0.0 when no CPU-like sensor was discovered.
    pub temperature_c: f32,
}

/// Capacity readings for a memory-like metric (RAM, swap, disk).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UsageSample {
    /// Percent used (0-100).
    pub percent: f32,
    /// Used bytes.
    pub used: u64,
    /// Free bytes.
    pub free: u64,
}

impl UsageSample {
    pub fn used_gib(&self) -> f64 {
        self.used as f64 / GIB
    }

    pub fn free_gib(&self) -> f64 {
        self.free as f64 / GIB
    }
}

/// Readings for one GPU slot. All-zero when the slot has no device.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpuSample {
    /// Core utilization percentage (0-100).
    pub load_percent: f32,
    /// VRAM utilization percentage (0-100).
    pub vram_percent: f32,
    /// Temperature in Celsius.
    pub temperature_c: f32,
}

/// Immutable snapshot of every displayed metric at one instant.
///
/// Produced fresh each tick; only the GPU VRAM percentages outlive the
/// tick, via the history buffers.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub timestamp: DateTime<Local>,
    pub cpu: CpuSample,
    pub memory: UsageSample,
    pub swap: UsageSample,
    pub disk: UsageSample,
    /// Always exactly [`GPU_SLOTS`] entries, zero-filled past the
    /// detected device count.
    pub gpus: [GpuSample; GPU_SLOTS],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gib_conversions_are_exact() {
        let sample = UsageSample { percent: 50.0, used: 1 << 30, free: 3 * (1 << 29) };
        assert_eq!(sample.used_gib(), 1.0);
        assert_eq!(sample.free_gib(), 1.5);
    }

    #[test]
    fn default_gpu_sample_is_all_zero() {
        let sample = GpuSample::default();
        assert_eq!(sample.load_percent, 0.0);
        assert_eq!(sample.vram_percent, 0.0);
        assert_eq!(sample.temperature_c, 0.0);
    }
}
