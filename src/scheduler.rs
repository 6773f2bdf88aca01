//! Scheduler loop: `Init -> Running -> Draining -> Stopped`.
//!
//! The loop owns the display sink, the metrics source and the history
//! buffers. Each tick advances a monotonic deadline by exactly one period
//! (not by wall-clock delta, so render latency never accumulates into
//! drift), samples the metrics source, pushes VRAM history, composes one
//! frame and sleeps out the remaining budget. A cancellation token is
//! polled at iteration boundaries only: a stop request during the sleep is
//! honored after at most one more full tick.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::compose;
use crate::config;
use crate::display::{DisplaySink, Orientation};
use crate::error::Result;
use crate::history::VramHistory;
use crate::layout;
use crate::metrics::MetricsProvider;

/// Cooperative cancellation token polled once per loop iteration.
///
/// Replaces a process-global stop flag: signal handlers cancel the token,
/// and the loop observes it at the next iteration boundary.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken(Arc<AtomicBool>);

impl ShutdownToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Init,
    Running,
    Draining,
    Stopped,
}

/// Drives the sample/compose/sleep cadence against one panel.
pub struct Scheduler<S, M> {
    sink: S,
    metrics: M,
    history: VramHistory,
    period: Duration,
}

impl<S: DisplaySink, M: MetricsProvider> Scheduler<S, M> {
    pub fn new(sink: S, metrics: M) -> Self {
        Self {
            sink,
            metrics,
            history: VramHistory::new(),
            period: config::REFRESH_PERIOD,
        }
    }

    /// One-time panel setup: reset, init, brightness, orientation, static
    /// background and hostname. All-or-nothing; any failure aborts before
    /// the loop starts and connections are released by drop.
    async fn init(&mut self) -> Result<()> {
        debug!(state = ?LoopState::Init, "setting up panel");
        self.sink.reset().await?;
        self.sink.initialize().await?;
        self.sink.set_brightness(config::BRIGHTNESS).await?;
        self.sink.set_backplate_color(config::BACKPLATE_LED).await?;
        self.sink.set_orientation(Orientation::ReverseLandscape).await?;
        self.sink.draw_bitmap(Path::new(config::BACKGROUND_PATH)).await?;

        let hostname = self.metrics.hostname();
        let field = layout::HOSTNAME;
        self.sink
            .draw_text(
                &hostname,
                field.x,
                field.y,
                field.width,
                field.height,
                field.size,
                field.color,
                field.anchor,
            )
            .await?;
        Ok(())
    }

    /// Runs until the token is cancelled or a fatal error occurs.
    ///
    /// On cancellation the in-flight frame completes (a half-drawn panel
    /// is never left behind) and the sink is closed exactly once. On a
    /// fatal error the sink and GPU handle are released by drop.
    pub async fn run(mut self, shutdown: ShutdownToken) -> Result<()> {
        self.init().await?;
        info!(
            state = ?LoopState::Running,
            period_ms = self.period.as_millis() as u64,
            "entering sampling loop"
        );

        let mut deadline = Instant::now();
        while !shutdown.is_cancelled() {
            // Exactly one period per tick, independent of processing time.
            deadline += self.period;

            let snapshot = self.metrics.sample()?;
            for (slot, gpu) in snapshot.gpus.iter().enumerate() {
                self.history.push(slot, gpu.vram_percent);
            }
            compose::draw_frame(&mut self.sink, &snapshot, &self.history).await?;

            // max(0, deadline - now): an overrun tick starts the next
            // iteration immediately, with no catch-up of missed ticks.
            tokio::time::sleep_until(deadline).await;
        }

        info!(state = ?LoopState::Draining, "finishing up and releasing the panel");
        self.sink.close().await?;
        info!(state = ?LoopState::Stopped, "scheduler stopped");
        Ok(())
    }
}
