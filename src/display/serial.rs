//! Rev. A serial panel driver.
//!
//! The panel speaks a six-byte command protocol over USB CDC and accepts
//! raw RGB565 pixel data for rectangular regions. Every draw primitive
//! here is self-contained: it crops the affected region out of the static
//! background image, composites the text/bar/graph into that copy and
//! pushes only the touched rectangle, so no clear step is needed between
//! ticks.
//!
//! The panel is addressed in its native portrait coordinate system; when a
//! landscape orientation is configured, regions are rotated in software
//! before transmission.

use std::path::Path;
use std::time::Duration;

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};
use async_trait::async_trait;
use image::{imageops, GenericImageView, RgbImage};
use serialport::SerialPort;
use std::io::Write;
use tracing::{debug, info};

use crate::config;
use crate::display::{Anchor, DisplaySink, Orientation, Rgb};
use crate::error::{Error, Result};

const CMD_RESET: u8 = 101;
const CMD_CLEAR: u8 = 102;
const CMD_SCREEN_OFF: u8 = 108;
const CMD_SCREEN_ON: u8 = 109;
const CMD_SET_BRIGHTNESS: u8 = 110;
const CMD_SET_ORIENTATION: u8 = 121;
const CMD_DISPLAY_BITMAP: u8 = 197;

const PORT_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay for the panel to re-enumerate after a reset.
const RESET_SETTLE: Duration = Duration::from_secs(1);

/// Serial-attached rev. A LCD panel.
pub struct SerialPanel {
    path: String,
    port: Box<dyn SerialPort>,
    /// Native portrait dimensions.
    width: u16,
    height: u16,
    orientation: Orientation,
    background: Option<RgbImage>,
    font: FontArc,
}

impl SerialPanel {
    /// Opens the serial device and loads the font used for text fields.
    ///
    /// The background image is not loaded here; it is supplied through
    /// [`DisplaySink::draw_bitmap`] during one-time setup.
    pub fn open(path: &str) -> Result<Self> {
        let port = open_port(path)?;
        let font_data = std::fs::read(config::FONT_PATH)?;
        let font = FontArc::try_from_vec(font_data)
            .map_err(|e| Error::display(format!("invalid font {}: {e}", config::FONT_PATH)))?;
        info!(port = path, "panel connection opened");
        Ok(Self {
            path: path.to_owned(),
            port,
            width: config::PANEL_WIDTH,
            height: config::PANEL_HEIGHT,
            orientation: Orientation::default(),
            background: None,
            font,
        })
    }

    /// Drawing surface dimensions in the configured orientation.
    fn surface_size(&self) -> (u16, u16) {
        match self.orientation {
            Orientation::Portrait | Orientation::ReversePortrait => (self.width, self.height),
            Orientation::Landscape | Orientation::ReverseLandscape => (self.height, self.width),
        }
    }

    fn send_command(&mut self, cmd: u8, x: u16, y: u16, ex: u16, ey: u16) -> Result<()> {
        let buf = pack_command(cmd, x, y, ex, ey);
        self.port.write_all(&buf)?;
        Ok(())
    }

    /// Copies the rectangle `(x, y, w, h)` out of the background image.
    fn crop_background(&self, x: u16, y: u16, w: u16, h: u16) -> Result<RgbImage> {
        let background = self
            .background
            .as_ref()
            .ok_or_else(|| Error::display("no background bitmap has been drawn"))?;
        let (bw, bh) = background.dimensions();
        if u32::from(x) + u32::from(w) > bw || u32::from(y) + u32::from(h) > bh {
            return Err(Error::display(format!(
                "draw region {x},{y} {w}x{h} exceeds background {bw}x{bh}"
            )));
        }
        Ok(background
            .view(u32::from(x), u32::from(y), u32::from(w), u32::from(h))
            .to_image())
    }

    /// Sends a composited region, rotating it into the panel's native
    /// portrait coordinates when a landscape orientation is configured.
    fn flush_region(&mut self, x: u16, y: u16, region: &RgbImage) -> Result<()> {
        let (w, h) = region.dimensions();
        match self.orientation {
            Orientation::Portrait | Orientation::ReversePortrait => self.push_bitmap(x, y, region),
            Orientation::ReverseLandscape => {
                let rotated = imageops::rotate90(region);
                let px = self.width - y - h as u16;
                let py = x;
                self.push_bitmap(px, py, &rotated)
            }
            Orientation::Landscape => {
                let rotated = imageops::rotate270(region);
                let px = y;
                let py = self.height - x - w as u16;
                self.push_bitmap(px, py, &rotated)
            }
        }
    }

    /// Streams a bitmap region in native portrait coordinates as RGB565.
    fn push_bitmap(&mut self, x: u16, y: u16, img: &RgbImage) -> Result<()> {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return Ok(());
        }
        let ex = x + w as u16 - 1;
        let ey = y + h as u16 - 1;
        if ex >= self.width || ey >= self.height {
            return Err(Error::display(format!(
                "bitmap region {x},{y} {w}x{h} exceeds panel {}x{}",
                self.width, self.height
            )));
        }
        self.send_command(CMD_DISPLAY_BITMAP, x, y, ex, ey)?;
        let mut line = Vec::with_capacity(w as usize * 2);
        for row in img.rows() {
            line.clear();
            for px in row {
                line.extend_from_slice(&rgb565(px).to_le_bytes());
            }
            self.port.write_all(&line)?;
        }
        self.port.flush()?;
        Ok(())
    }
}

#[async_trait]
impl DisplaySink for SerialPanel {
    async fn reset(&mut self) -> Result<()> {
        debug!("resetting panel");
        self.send_command(CMD_RESET, 0, 0, 0, 0)?;
        self.port.flush()?;
        // The device reboots and re-enumerates; reopen the port.
        tokio::time::sleep(RESET_SETTLE).await;
        self.port = open_port(&self.path)?;
        Ok(())
    }

    async fn initialize(&mut self) -> Result<()> {
        debug!("initializing panel");
        self.send_command(CMD_CLEAR, 0, 0, 0, 0)?;
        self.send_command(CMD_SCREEN_ON, 0, 0, 0, 0)?;
        self.port.flush()?;
        Ok(())
    }

    async fn set_brightness(&mut self, level: u8) -> Result<()> {
        let raw = brightness_raw(level);
        debug!(level, raw, "setting brightness");
        self.send_command(CMD_SET_BRIGHTNESS, u16::from(raw), 0, 0, 0)?;
        Ok(())
    }

    async fn set_backplate_color(&mut self, color: Rgb) -> Result<()> {
        // Rev. A hardware has no backplate LED.
        debug!(?color, "backplate LED not supported on this revision");
        Ok(())
    }

    async fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        let (w, h) = match orientation {
            Orientation::Portrait | Orientation::ReversePortrait => (self.width, self.height),
            Orientation::Landscape | Orientation::ReverseLandscape => (self.height, self.width),
        };
        let mut buf = [0u8; 16];
        buf[5] = CMD_SET_ORIENTATION;
        buf[6] = orientation.code() + 100;
        buf[7] = (w >> 8) as u8;
        buf[8] = (w & 0xff) as u8;
        buf[9] = (h >> 8) as u8;
        buf[10] = (h & 0xff) as u8;
        self.port.write_all(&buf)?;
        self.orientation = orientation;
        Ok(())
    }

    async fn draw_bitmap(&mut self, path: &Path) -> Result<()> {
        let img = image::open(path)?.to_rgb8();
        let (w, h) = img.dimensions();
        let (sw, sh) = self.surface_size();
        if w != u32::from(sw) || h != u32::from(sh) {
            return Err(Error::display(format!(
                "background {w}x{h} does not match surface {sw}x{sh}"
            )));
        }
        self.flush_region(0, 0, &img)?;
        self.background = Some(img);
        Ok(())
    }

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
    ) -> Result<()> {
        let origin_x = match anchor {
            Anchor::TopLeft => x,
            Anchor::TopCenter => x.saturating_sub(width / 2),
        };
        let mut region = self.crop_background(origin_x, y, width, height)?;

        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);
        let glyphs: Vec<GlyphId> = text.chars().map(|c| self.font.glyph_id(c)).collect();
        let mut text_width = 0.0f32;
        for (i, gid) in glyphs.iter().enumerate() {
            if i > 0 {
                text_width += scaled.kern(glyphs[i - 1], *gid);
            }
            text_width += scaled.h_advance(*gid);
        }

        let mut caret = match anchor {
            Anchor::TopLeft => 0.0,
            Anchor::TopCenter => (f32::from(width) - text_width) / 2.0,
        };
        let baseline = scaled.ascent();
        for (i, gid) in glyphs.iter().enumerate() {
            if i > 0 {
                caret += scaled.kern(glyphs[i - 1], *gid);
            }
            let glyph = gid.with_scale_and_position(scale, ab_glyph::point(caret, baseline));
            caret += scaled.h_advance(*gid);
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    if px >= 0
                        && py >= 0
                        && (px as u32) < region.width()
                        && (py as u32) < region.height()
                    {
                        blend(region.get_pixel_mut(px as u32, py as u32), color, coverage);
                    }
                });
            }
        }
        self.flush_region(origin_x, y, &region)
    }

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
    ) -> Result<()> {
        let mut region = self.crop_background(x, y, width, height)?;
        let span = (max - min).max(f32::EPSILON);
        let frac = ((value - min) / span).clamp(0.0, 1.0);
        let fill = (frac * f32::from(width)).round() as u32;
        let pixel = image::Rgb([color.r, color.g, color.b]);
        for py in 0..u32::from(height) {
            for px in 0..fill.min(u32::from(width)) {
                region.put_pixel(px, py, pixel);
            }
        }
        if outline {
            for px in 0..u32::from(width) {
                region.put_pixel(px, 0, pixel);
                region.put_pixel(px, u32::from(height) - 1, pixel);
            }
            for py in 0..u32::from(height) {
                region.put_pixel(0, py, pixel);
                region.put_pixel(u32::from(width) - 1, py, pixel);
            }
        }
        self.flush_region(x, y, &region)
    }

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
    ) -> Result<()> {
        let mut region = self.crop_background(x, y, width, height)?;
        let pixel = image::Rgb([color.r, color.g, color.b]);
        if axis {
            for py in 0..u32::from(height) {
                region.put_pixel(0, py, pixel);
            }
            for px in 0..u32::from(width) {
                region.put_pixel(px, u32::from(height) - 1, pixel);
            }
        }
        if values.len() >= 2 {
            let (lo, hi) = if autoscale {
                let lo = values.iter().copied().fold(f32::INFINITY, f32::min);
                let hi = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                (lo, hi)
            } else {
                (min, max)
            };
            let span = (hi - lo).max(f32::EPSILON);
            let step = f32::from(width - 1) / (values.len() - 1) as f32;
            let plot_y = |v: f32| {
                let norm = ((v - lo) / span).clamp(0.0, 1.0);
                (1.0 - norm) * f32::from(height - 1)
            };
            for (i, pair) in values.windows(2).enumerate() {
                let x0 = i as f32 * step;
                let x1 = (i + 1) as f32 * step;
                draw_segment(&mut region, x0, plot_y(pair[0]), x1, plot_y(pair[1]), line_width, color);
            }
        }
        self.flush_region(x, y, &region)
    }

    async fn close(&mut self) -> Result<()> {
        info!("closing panel connection");
        self.send_command(CMD_SCREEN_OFF, 0, 0, 0, 0)?;
        self.port.flush()?;
        Ok(())
    }
}

fn open_port(path: &str) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(path, config::BAUD_RATE)
        .timeout(PORT_TIMEOUT)
        .open()?;
    Ok(port)
}

/// Packs a rev. A six-byte command frame.
fn pack_command(cmd: u8, x: u16, y: u16, ex: u16, ey: u16) -> [u8; 6] {
    [
        (x >> 2) as u8,
        (((x & 3) << 6) + (y >> 4)) as u8,
        (((y & 15) << 4) + (ex >> 6)) as u8,
        (((ex & 63) << 2) + (ey >> 8)) as u8,
        (ey & 255) as u8,
        cmd,
    ]
}

/// Rev. A brightness is inverted: 0 is full backlight, 255 is off.
fn brightness_raw(level: u8) -> u8 {
    let level = u16::from(level.min(100));
    255 - (level * 255 / 100) as u8
}

fn rgb565(px: &image::Rgb<u8>) -> u16 {
    let [r, g, b] = px.0;
    ((u16::from(r) & 0xf8) << 8) | ((u16::from(g) & 0xfc) << 3) | (u16::from(b) >> 3)
}

fn draw_segment(region: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32, width: u32, color: Rgb) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    let radius = (width as f32 / 2.0).max(0.5);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp(region, x0 + dx * t, y0 + dy * t, radius, color);
    }
}

fn stamp(region: &mut RgbImage, cx: f32, cy: f32, radius: f32, color: Rgb) {
    let pixel = image::Rgb([color.r, color.g, color.b]);
    let x_lo = (cx - radius).floor() as i32;
    let x_hi = (cx + radius).ceil() as i32;
    let y_lo = (cy - radius).floor() as i32;
    let y_hi = (cy + radius).ceil() as i32;
    for py in y_lo..=y_hi {
        for px in x_lo..=x_hi {
            let within = (px as f32 - cx).powi(2) + (py as f32 - cy).powi(2) <= radius * radius;
            if within
                && px >= 0
                && py >= 0
                && (px as u32) < region.width()
                && (py as u32) < region.height()
            {
                region.put_pixel(px as u32, py as u32, pixel);
            }
        }
    }
}

fn blend(px: &mut image::Rgb<u8>, color: Rgb, alpha: f32) {
    let a = alpha.clamp(0.0, 1.0);
    px.0[0] = (f32::from(px.0[0]) * (1.0 - a) + f32::from(color.r) * a).round() as u8;
    px.0[1] = (f32::from(px.0[1]) * (1.0 - a) + f32::from(color.g) * a).round() as u8;
    px.0[2] = (f32::from(px.0[2]) * (1.0 - a) + f32::from(color.b) * a).round() as u8;
}
