//! Integration tests against the public API only: history retention,
//! layout geometry and the display formatting helpers.

use panelmon::compose::{fmt_gib, fmt_percent, fmt_temperature, fmt_temperature_coarse};
use panelmon::config::{GPU_SLOTS, PANEL_HEIGHT, PANEL_WIDTH, VRAM_HISTORY_LEN};
use panelmon::history::VramHistory;
use panelmon::layout;
use panelmon::metrics::{UsageSample, GIB};

#[test]
fn history_keeps_the_last_ten_samples_per_slot() {
    let mut history = VramHistory::new();
    for value in 0..25 {
        history.push(0, value as f32);
    }

    let snapshot = history.snapshot(0);
    assert_eq!(snapshot.len(), VRAM_HISTORY_LEN);
    let expected: Vec<f32> = (15..25).map(|v| v as f32).collect();
    assert_eq!(snapshot, expected);
}

#[test]
fn history_slots_are_independent() {
    let mut history = VramHistory::new();
    history.push(0, 1.0);
    history.push(2, 2.0);

    assert_eq!(history.snapshot(0), vec![1.0]);
    assert!(history.snapshot(1).is_empty());
    assert_eq!(history.snapshot(2), vec![2.0]);
    assert!(history.snapshot(3).is_empty());
}

#[test]
fn usage_sample_converts_bytes_to_gib() {
    let sample = UsageSample { percent: 50.0, used: 8 * (1u64 << 30), free: 1u64 << 29 };
    assert_eq!(sample.used_gib(), 8.0);
    assert_eq!(sample.free_gib(), 0.5);
    assert_eq!(GIB, 1024.0 * 1024.0 * 1024.0);
}

#[test]
fn formatting_matches_the_panel_fields() {
    assert_eq!(fmt_percent(66.6), "67%");
    assert_eq!(fmt_gib(7.98), "8.0 GB");
    assert_eq!(fmt_temperature(41.25), "41.2°C");
    assert_eq!(fmt_temperature_coarse(41.9), "42°C");
}

#[test]
fn gpu_columns_step_by_a_fixed_stride_inside_the_panel() {
    assert_eq!(GPU_SLOTS, 4);

    let first = layout::gpu_vram_text(0);
    let last = layout::gpu_vram_text(GPU_SLOTS as u16 - 1);
    assert_eq!(last.x - first.x, 3 * layout::GPU_SLOT_STRIDE);

    // Every slot's widest element stays inside the driven surface, which
    // is the portrait panel rotated on its side.
    let surface_width = PANEL_HEIGHT;
    let surface_height = PANEL_WIDTH;
    for slot in 0..GPU_SLOTS as u16 {
        let graph = layout::gpu_vram_graph(slot);
        assert!(graph.x + graph.width <= surface_width);
        let temp_bar = layout::gpu_temp_bar(slot);
        assert!(temp_bar.y + temp_bar.height <= surface_height);
    }
}
