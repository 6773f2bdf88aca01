//! Fixed field geometry for the 480x320 reverse-landscape surface.
//!
//! Positions, sizes and colors are static configuration: the header row
//! holds date, hostname and time; the second row holds CPU, RAM, swap and
//! disk gauges; the lower two thirds hold four GPU slots side by side at a
//! fixed horizontal stride, rendered whether or not a device is present.

use crate::display::{Anchor, Rgb};

pub const ACCENT: Rgb = Rgb::new(249, 100, 0);
pub const TITLE: Rgb = Rgb::new(100, 207, 213);

pub const FONT_LARGE: f32 = 18.0;
pub const FONT_SMALL: f32 = 12.0;

/// Geometry and style of one text field.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub size: f32,
    pub color: Rgb,
    pub anchor: Anchor,
}

impl TextField {
    const fn new(x: u16, y: u16, width: u16, height: u16, size: f32, color: Rgb, anchor: Anchor) -> Self {
        Self { x, y, width, height, size, color, anchor }
    }
}

/// Geometry of one progress bar. Bars span 0..100 in the accent color.
#[derive(Debug, Clone, Copy)]
pub struct BarField {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl BarField {
    const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }
}

/// Geometry of one line graph. Graphs use a fixed 0..100 scale.
#[derive(Debug, Clone, Copy)]
pub struct GraphField {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub line_width: u32,
}

// Header row.
pub const HOSTNAME: TextField = TextField::new(140, 0, 200, 20, FONT_LARGE, TITLE, Anchor::TopCenter);
pub const DATE: TextField = TextField::new(4, 0, 80, 20, FONT_LARGE, ACCENT, Anchor::TopLeft);
pub const TIME: TextField = TextField::new(416, 0, 66, 20, FONT_LARGE, ACCENT, Anchor::TopLeft);

// CPU gauge pair: load and temperature.
pub const CPU_LOAD_TEXT: TextField = TextField::new(47, 46, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter);
pub const CPU_LOAD_BAR: BarField = BarField::new(18, 66, 84, 5);
pub const CPU_TEMP_TEXT: TextField = TextField::new(47, 76, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter);
pub const CPU_TEMP_BAR: BarField = BarField::new(18, 96, 84, 5);

// RAM, swap and disk blocks: percent + bar + used/free in GiB.
pub const RAM_PERCENT_TEXT: TextField = TextField::new(167, 46, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter);
pub const RAM_BAR: BarField = BarField::new(138, 66, 84, 5);
pub const RAM_USED_TEXT: TextField = TextField::new(164, 76, 40, 16, FONT_SMALL, ACCENT, Anchor::TopLeft);
pub const RAM_FREE_TEXT: TextField = TextField::new(164, 90, 40, 16, FONT_SMALL, ACCENT, Anchor::TopLeft);

pub const SWAP_PERCENT_TEXT: TextField = TextField::new(287, 46, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter);
pub const SWAP_BAR: BarField = BarField::new(258, 66, 84, 5);
pub const SWAP_USED_TEXT: TextField = TextField::new(284, 76, 40, 16, FONT_SMALL, ACCENT, Anchor::TopLeft);
pub const SWAP_FREE_TEXT: TextField = TextField::new(284, 90, 40, 16, FONT_SMALL, ACCENT, Anchor::TopLeft);

pub const DISK_PERCENT_TEXT: TextField = TextField::new(407, 46, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter);
pub const DISK_BAR: BarField = BarField::new(378, 66, 84, 5);
pub const DISK_USED_TEXT: TextField = TextField::new(404, 76, 40, 16, FONT_SMALL, ACCENT, Anchor::TopLeft);
pub const DISK_FREE_TEXT: TextField = TextField::new(404, 90, 40, 16, FONT_SMALL, ACCENT, Anchor::TopLeft);

/// Horizontal distance between consecutive GPU slots.
pub const GPU_SLOT_STRIDE: u16 = 120;

pub const fn gpu_vram_text(slot: u16) -> TextField {
    TextField::new(47 + slot * GPU_SLOT_STRIDE, 141, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter)
}

pub const fn gpu_vram_bar(slot: u16) -> BarField {
    BarField::new(18 + slot * GPU_SLOT_STRIDE, 161, 84, 5)
}

pub const fn gpu_vram_graph(slot: u16) -> GraphField {
    GraphField { x: 18 + slot * GPU_SLOT_STRIDE, y: 178, width: 86, height: 60, line_width: 3 }
}

pub const fn gpu_load_text(slot: u16) -> TextField {
    TextField::new(47 + slot * GPU_SLOT_STRIDE, 246, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter)
}

pub const fn gpu_load_bar(slot: u16) -> BarField {
    BarField::new(18 + slot * GPU_SLOT_STRIDE, 266, 84, 5)
}

pub const fn gpu_temp_text(slot: u16) -> TextField {
    TextField::new(47 + slot * GPU_SLOT_STRIDE, 276, 30, 16, FONT_SMALL, ACCENT, Anchor::TopCenter)
}

pub const fn gpu_temp_bar(slot: u16) -> BarField {
    BarField::new(18 + slot * GPU_SLOT_STRIDE, 296, 84, 5)
}
