//! Frame composer: one tick's snapshot into a fixed sequence of draw calls.
//!
//! The sequence is deterministic and layout-driven: header clock, then the
//! CPU/RAM/swap/disk gauges, then the four GPU slots. Every primitive
//! composites against the static background held by the sink, so the frame
//! needs no clear step and partial redraw never tears.

use crate::display::DisplaySink;
use crate::error::Result;
use crate::history::VramHistory;
use crate::layout::{self, BarField, GraphField, TextField};
use crate::metrics::{Snapshot, UsageSample};

/// Formats a percentage as an integer with a trailing `%`.
pub fn fmt_percent(value: f32) -> String {
    format!("{value:.0}%")
}

/// Formats a byte-derived GiB value with one decimal.
pub fn fmt_gib(gib: f64) -> String {
    format!("{gib:.1} GB")
}

/// Formats a temperature with one decimal, for the CPU field.
pub fn fmt_temperature(value: f32) -> String {
    format!("{value:.1}°C")
}

/// Formats a temperature as an integer, for the GPU fields.
pub fn fmt_temperature_coarse(value: f32) -> String {
    format!("{value:.0}°C")
}

async fn text<S: DisplaySink + ?Sized>(sink: &mut S, field: &TextField, value: &str) -> Result<()> {
    sink.draw_text(
        value,
        field.x,
        field.y,
        field.width,
        field.height,
        field.size,
        field.color,
        field.anchor,
    )
    .await
}

async fn bar<S: DisplaySink + ?Sized>(sink: &mut S, field: &BarField, value: f32) -> Result<()> {
    sink.draw_progress_bar(
        field.x,
        field.y,
        field.width,
        field.height,
        0.0,
        100.0,
        value,
        layout::ACCENT,
        false,
    )
    .await
}

async fn graph<S: DisplaySink + ?Sized>(
    sink: &mut S,
    field: &GraphField,
    values: &[f32],
) -> Result<()> {
    sink.draw_line_graph(
        field.x,
        field.y,
        field.width,
        field.height,
        values,
        0.0,
        100.0,
        false,
        layout::ACCENT,
        field.line_width,
        false,
    )
    .await
}

/// Percent text plus proportional bar for one gauge.
async fn gauge<S: DisplaySink + ?Sized>(
    sink: &mut S,
    text_field: &TextField,
    bar_field: &BarField,
    label: &str,
    value: f32,
) -> Result<()> {
    text(sink, text_field, label).await?;
    bar(sink, bar_field, value).await
}

/// Percent gauge plus used/free GiB lines for a memory-like metric.
async fn usage_block<S: DisplaySink + ?Sized>(
    sink: &mut S,
    percent_field: &TextField,
    bar_field: &BarField,
    used_field: &TextField,
    free_field: &TextField,
    sample: &UsageSample,
) -> Result<()> {
    gauge(sink, percent_field, bar_field, &fmt_percent(sample.percent), sample.percent).await?;
    text(sink, used_field, &fmt_gib(sample.used_gib())).await?;
    text(sink, free_field, &fmt_gib(sample.free_gib())).await
}

/// Draws one full panel frame from the tick's snapshot and VRAM history.
pub async fn draw_frame<S: DisplaySink + ?Sized>(
    sink: &mut S,
    snapshot: &Snapshot,
    history: &VramHistory,
) -> Result<()> {
    text(sink, &layout::DATE, &snapshot.timestamp.format("%d.%m.%Y").to_string()).await?;
    text(sink, &layout::TIME, &snapshot.timestamp.format("%H:%M:%S").to_string()).await?;

    gauge(
        sink,
        &layout::CPU_LOAD_TEXT,
        &layout::CPU_LOAD_BAR,
        &fmt_percent(snapshot.cpu.load_percent),
        snapshot.cpu.load_percent,
    )
    .await?;
    gauge(
        sink,
        &layout::CPU_TEMP_TEXT,
        &layout::CPU_TEMP_BAR,
        &fmt_temperature(snapshot.cpu.temperature_c),
        snapshot.cpu.temperature_c,
    )
    .await?;

    usage_block(
        sink,
        &layout::RAM_PERCENT_TEXT,
        &layout::RAM_BAR,
        &layout::RAM_USED_TEXT,
        &layout::RAM_FREE_TEXT,
        &snapshot.memory,
    )
    .await?;
    usage_block(
        sink,
        &layout::SWAP_PERCENT_TEXT,
        &layout::SWAP_BAR,
        &layout::SWAP_USED_TEXT,
        &layout::SWAP_FREE_TEXT,
        &snapshot.swap,
    )
    .await?;
    usage_block(
        sink,
        &layout::DISK_PERCENT_TEXT,
        &layout::DISK_BAR,
        &layout::DISK_USED_TEXT,
        &layout::DISK_FREE_TEXT,
        &snapshot.disk,
    )
    .await?;

    for (slot, gpu) in snapshot.gpus.iter().enumerate() {
        let column = slot as u16;
        gauge(
            sink,
            &layout::gpu_vram_text(column),
            &layout::gpu_vram_bar(column),
            &fmt_percent(gpu.vram_percent),
            gpu.vram_percent,
        )
        .await?;
        graph(sink, &layout::gpu_vram_graph(column), &history.snapshot(slot)).await?;
        gauge(
            sink,
            &layout::gpu_load_text(column),
            &layout::gpu_load_bar(column),
            &fmt_percent(gpu.load_percent),
            gpu.load_percent,
        )
        .await?;
        gauge(
            sink,
            &layout::gpu_temp_text(column),
            &layout::gpu_temp_bar(column),
            &fmt_temperature_coarse(gpu.temperature_c),
            gpu.temperature_c,
        )
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GPU_SLOTS;
    use crate::display::MockDisplaySink;
    use crate::metrics::{CpuSample, GpuSample};
    use chrono::TimeZone;

    fn fixed_snapshot() -> Snapshot {
        let mut gpus = [GpuSample::default(); GPU_SLOTS];
        gpus[0] = GpuSample { load_percent: 10.0, vram_percent: 20.0, temperature_c: 30.0 };
        Snapshot {
            timestamp: chrono::Local.with_ymd_and_hms(2026, 8, 25, 13, 5, 9).unwrap(),
            cpu: CpuSample { load_percent: 42.0, temperature_c: 55.0 },
            memory: UsageSample { percent: 25.0, used: 4 * (1 << 30), free: 12 * (1 << 30) },
            swap: UsageSample::default(),
            disk: UsageSample { percent: 50.0, used: 100 * (1 << 30), free: 100 * (1 << 30) },
            gpus,
        }
    }

    #[test]
    fn percent_rounds_to_nearest_integer() {
        assert_eq!(fmt_percent(49.6), "50%");
        assert_eq!(fmt_percent(49.4), "49%");
        assert_eq!(fmt_percent(0.0), "0%");
        assert_eq!(fmt_percent(100.0), "100%");
    }

    #[test]
    fn gib_formats_with_one_decimal() {
        assert_eq!(fmt_gib(1.0), "1.0 GB");
        assert_eq!(fmt_gib(1.5), "1.5 GB");
        assert_eq!(fmt_gib(12.04), "12.0 GB");
    }

    #[test]
    fn temperatures_format_per_field() {
        assert_eq!(fmt_temperature(55.0), "55.0°C");
        assert_eq!(fmt_temperature_coarse(30.4), "30°C");
        assert_eq!(fmt_temperature_coarse(0.0), "0°C");
    }

    #[tokio::test]
    async fn frame_issues_the_full_fixed_sequence() {
        let snapshot = fixed_snapshot();
        let mut history = VramHistory::new();
        for (slot, gpu) in snapshot.gpus.iter().enumerate() {
            history.push(slot, gpu.vram_percent);
        }

        let mut sink = MockDisplaySink::new();

        // Values that pin specific fields: CPU load/temp, GPU 0 VRAM at
        // the graph row, GPU 0 temperature, and an absent slot's VRAM.
        sink.expect_draw_text()
            .withf(|text, _, y, _, _, _, _, _| text == "42%" && *y == 46)
            .times(1)
            .returning(|_, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_text()
            .withf(|text, _, _, _, _, _, _, _| text == "55.0°C")
            .times(1)
            .returning(|_, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_text()
            .withf(|text, x, y, _, _, _, _, _| text == "20%" && *x == 47 && *y == 141)
            .times(1)
            .returning(|_, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_text()
            .withf(|text, x, y, _, _, _, _, _| text == "30°C" && *x == 47 && *y == 276)
            .times(1)
            .returning(|_, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_text()
            .withf(|text, x, y, _, _, _, _, _| text == "0%" && *x == 287 && *y == 141)
            .times(1)
            .returning(|_, _, _, _, _, _, _, _| Ok(()));
        // Remaining text fields: 25 total per frame.
        sink.expect_draw_text()
            .times(20)
            .returning(|_, _, _, _, _, _, _, _| Ok(()));

        // GPU 0 VRAM bar carries the live value.
        sink.expect_draw_progress_bar()
            .withf(|x, y, _, _, _, _, value, _, _| *x == 18 && *y == 161 && *value == 20.0)
            .times(1)
            .returning(|_, _, _, _, _, _, _, _, _| Ok(()));
        // Remaining bars: 17 total per frame.
        sink.expect_draw_progress_bar()
            .times(16)
            .returning(|_, _, _, _, _, _, _, _, _| Ok(()));

        // GPU 0 graph gets the pushed history on a fixed 0..100 scale.
        sink.expect_draw_line_graph()
            .withf(|x, _, _, _, values, min, max, autoscale, _, _, _| {
                *x == 18 && *values == [20.0] && *min == 0.0 && *max == 100.0 && !*autoscale
            })
            .times(1)
            .returning(|_, _, _, _, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_line_graph()
            .times(3)
            .returning(|_, _, _, _, _, _, _, _, _, _, _| Ok(()));

        draw_frame(&mut sink, &snapshot, &history).await.unwrap();
    }

    #[tokio::test]
    async fn absent_slots_render_zeroed_gauges() {
        let snapshot = fixed_snapshot();
        let history = VramHistory::new();
        let mut sink = MockDisplaySink::new();

        // Slots 1-3 each render "0%" twice (VRAM + load) and "0°C" once.
        sink.expect_draw_text()
            .withf(|text, x, y, _, _, _, _, _| {
                (text == "0%" || text == "0°C")
                    && *x > 120
                    && (*y == 141 || *y == 246 || *y == 276)
            })
            .times(9)
            .returning(|_, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_text().returning(|_, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_progress_bar().returning(|_, _, _, _, _, _, _, _, _| Ok(()));
        sink.expect_draw_line_graph().returning(|_, _, _, _, _, _, _, _, _, _, _| Ok(()));

        draw_frame(&mut sink, &snapshot, &history).await.unwrap();
    }

    #[tokio::test]
    async fn draw_errors_propagate() {
        let snapshot = fixed_snapshot();
        let history = VramHistory::new();
        let mut sink = MockDisplaySink::new();
        sink.expect_draw_text()
            .returning(|_, _, _, _, _, _, _, _| Err(crate::Error::display("sink disconnected")));

        let result = draw_frame(&mut sink, &snapshot, &history).await;
        assert!(matches!(result, Err(crate::Error::Display(_))));
    }
}
