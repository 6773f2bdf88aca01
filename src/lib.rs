//! Panelmon - host telemetry on a serial-attached LCD panel
//!
//! This crate samples host telemetry once per second and renders it as a
//! composited frame on a small serial LCD (Turing Smart Screen rev. A class
//! hardware, 320x480 portrait panel driven in reverse landscape).
//!
//! # Features
//!
//! - **CPU**: load percentage and first CPU-like temperature sensor
//! - **Memory/Swap**: percent used plus used/free in GiB
//! - **Disk**: usage of the OS root path
//! - **GPU**: per-device utilization, VRAM percent and temperature via NVML,
//!   with a rolling VRAM line graph per display slot
//! - **Panel driver**: rev. A wire protocol, RGB565 bitmap regions, TTF text
//!   rasterization, compositing against a static background image
//!
//! The display layout is slot-based: four GPU slots are always rendered,
//! and slots beyond the detected device count show zeroed values.
//!
//! # Examples
//!
//! ```no_run
//! use panelmon::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let sink = SerialPanel::open(panelmon::config::COM_PORT)?;
//!     let metrics = MetricsSource::new()?;
//!     let shutdown = ShutdownToken::default();
//!     Scheduler::new(sink, metrics).run(shutdown).await
//! }
//! ```
//!
//! # Error Handling
//!
//! The crate uses a single [`Error`] type. Missing optional data sources
//! (no temperature sensor, no GPU, fewer GPUs than slots) degrade to zero
//! values and the loop continues; any failure while sampling or drawing
//! during the running phase propagates and terminates the loop. There are
//! no retries and no reconnects.
//!
//! # Concurrency
//!
//! One cooperative loop on a current-thread runtime. The only suspension
//! point is the end-of-tick sleep; a shutdown signal is observed at the
//! next iteration boundary, so the loop finishes at most one in-flight
//! frame before releasing the panel and the GPU handle.

pub mod compose;
pub mod config;
pub mod display;
pub mod error;
pub mod history;
pub mod layout;
pub mod metrics;
pub mod scheduler;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::display::{Anchor, DisplaySink, Orientation, Rgb, SerialPanel};
    pub use crate::error::{Error, Result};
    pub use crate::history::VramHistory;
    pub use crate::metrics::{MetricsProvider, MetricsSource, Snapshot};
    pub use crate::scheduler::{Scheduler, ShutdownToken};
}
