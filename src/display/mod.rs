//! Display sink abstraction.
//!
//! The panel is modeled as a sink of self-contained draw primitives: every
//! call composites against the static background image pushed by
//! [`DisplaySink::draw_bitmap`], so there is no clear or flush step and no
//! frame buffer shared with callers. Coordinates are top-left-origin pixels
//! in the panel's configured orientation.

mod serial;

pub use serial::SerialPanel;

use std::path::Path;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::Result;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Panel orientation. The panel powers up in portrait; landscape values
/// rotate the drawing surface by 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    ReversePortrait,
    Landscape,
    ReverseLandscape,
}

impl Orientation {
    /// Wire encoding of the orientation for the rev. A protocol.
    pub(crate) fn code(self) -> u8 {
        match self {
            Orientation::Portrait => 0,
            Orientation::ReversePortrait => 1,
            Orientation::Landscape => 2,
            Orientation::ReverseLandscape => 3,
        }
    }
}

/// Horizontal anchoring of a text field.
///
/// `TopLeft` places the text's left edge at the field's `x`; `TopCenter`
/// centers the text on `x`. The vertical anchor is always the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
}

/// Sink of draw primitives for one physical panel.
///
/// The sink owns the connection and reports nothing back besides failure.
/// `reset`/`initialize`/`set_*` are one-time setup calls; the `draw_*`
/// primitives are issued once per field per tick.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DisplaySink: Send {
    /// Resets the panel out of any unstable state. Clears the screen.
    async fn reset(&mut self) -> Result<()>;

    /// Sends the one-time initialization sequence.
    async fn initialize(&mut self) -> Result<()>;

    /// Sets the backlight level in percent (0-100).
    async fn set_brightness(&mut self, level: u8) -> Result<()>;

    /// Sets the backplate LED color. A no-op on hardware without one.
    async fn set_backplate_color(&mut self, color: Rgb) -> Result<()>;

    /// Sets the drawing orientation for all subsequent primitives.
    async fn set_orientation(&mut self, orientation: Orientation) -> Result<()>;

    /// Pushes a full-panel bitmap and retains it as the compositing base
    /// for subsequent primitives.
    async fn draw_bitmap(&mut self, path: &Path) -> Result<()>;

    /// Draws a text field over the background region `(x, y, width, height)`.
    #[allow(clippy::too_many_arguments)]
    async fn draw_text(
        &mut self,
        text: &str,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        size: f32,
        color: Rgb,
        anchor: Anchor,
    ) -> Result<()>;

    /// Draws a horizontal progress bar filled proportionally between
    /// `min` and `max`.
    #[allow(clippy::too_many_arguments)]
    async fn draw_progress_bar(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        min: f32,
        max: f32,
        value: f32,
        color: Rgb,
        outline: bool,
    ) -> Result<()>;

    /// Draws a line graph of `values` in chronological order. With
    /// `autoscale` off the vertical scale is fixed to `min..max`.
    #[allow(clippy::too_many_arguments)]
    async fn draw_line_graph(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        values: &[f32],
        min: f32,
        max: f32,
        autoscale: bool,
        color: Rgb,
        line_width: u32,
        axis: bool,
    ) -> Result<()>;

    /// Releases the connection. Must be called exactly once.
    async fn close(&mut self) -> Result<()>;
}
