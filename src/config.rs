//! Fixed process constants.
//!
//! There is no runtime configuration surface: the serial port, panel
//! geometry, refresh cadence and asset paths are compile-time constants,
//! matching the fixed layout in [`crate::layout`].

use std::time::Duration;

use crate::display::Rgb;

/// Serial device the panel is attached to.
pub const COM_PORT: &str = "/dev/ttyACM0";

/// Baud rate for the panel serial link.
pub const BAUD_RATE: u32 = 115_200;

/// Panel width in its native portrait orientation.
pub const PANEL_WIDTH: u16 = 320;

/// Panel height in its native portrait orientation.
pub const PANEL_HEIGHT: u16 = 480;

// Panel dimensions are declared portrait-native: width <= height.
const _: () = assert!(PANEL_WIDTH <= PANEL_HEIGHT);

/// Tick period of the scheduler loop.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(1);

/// Number of VRAM samples retained per GPU slot for the line graph.
pub const VRAM_HISTORY_LEN: usize = 10;

/// Fixed number of GPU display slots, independent of detected devices.
pub const GPU_SLOTS: usize = 4;

/// Panel backlight level in percent. Rev. A panels run hot above 50%.
pub const BRIGHTNESS: u8 = 20;

/// Backplate LED color (ignored by hardware without a backplate LED).
pub const BACKPLATE_LED: Rgb = Rgb::new(255, 255, 255);

/// Static background image drawn once and used as the compositing base.
pub const BACKGROUND_PATH: &str = "res/background.png";

/// TTF font used for every text field.
pub const FONT_PATH: &str = "res/font.ttf";

/// Root path whose disk usage is displayed.
pub const DISK_ROOT: &str = if cfg!(windows) { "C:\\" } else { "/" };
