//! 5x5 LED matrix state.

use serde::{Deserialize, Serialize};

/// Matrix width in pixels.
pub const MATRIX_WIDTH: usize = 5;
/// Matrix height in pixels.
pub const MATRIX_HEIGHT: usize = 5;
/// Fully lit pixel level and maximum brightness.
pub const MAX_LEVEL: u8 = 255;

/// Row-major greyscale bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    width: usize,
    data: Vec<u8>,
}

impl Image {
    /// Creates a dark bitmap.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            data: vec![0; width * height],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.data.len().checked_div(self.width).unwrap_or(0)
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height()).then(|| y * self.width + x)
    }

    /// Sets one pixel; coordinates outside the bitmap are ignored.
    pub fn set(&mut self, x: usize, y: usize, level: u8) {
        if let Some(offset) = self.offset(x, y) {
            self.data[offset] = level;
        }
    }

    /// Reads one pixel; coordinates outside the bitmap read as dark.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.offset(x, y).map_or(0, |offset| self.data[offset])
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Coordinates of every lit pixel in row-major order.
    ///
    /// Bytes past the last complete row are not pixels and are skipped.
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .take(width * self.height())
            .enumerate()
            .filter(|(_, level)| **level > 0)
            .map(move |(offset, _)| (offset % width, offset / width))
    }
}

/// How pixel levels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    /// Any non-zero level renders fully lit.
    #[default]
    BlackAndWhite,
    /// Levels render proportionally.
    Greyscale,
}

/// Runtime state of the LED matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedMatrixState {
    image: Image,
    brightness: u8,
    display_mode: DisplayMode,
    enabled: bool,
    refresh_pending: bool,
}

impl Default for LedMatrixState {
    fn default() -> Self {
        Self {
            image: Image::new(MATRIX_WIDTH, MATRIX_HEIGHT),
            brightness: MAX_LEVEL,
            display_mode: DisplayMode::default(),
            enabled: true,
            refresh_pending: false,
        }
    }
}

impl LedMatrixState {
    /// Primary bitmap.
    #[must_use]
    pub const fn image(&self) -> &Image {
        &self.image
    }

    /// Mutable primary bitmap.
    #[allow(clippy::missing_const_for_fn)]
    pub fn image_mut(&mut self) -> &mut Image {
        &mut self.image
    }

    /// Current brightness.
    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Sets brightness.
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Current render mode.
    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Switches render mode.
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Returns `true` while the matrix drives its LEDs.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the matrix (pins shared with the edge connector).
    #[allow(clippy::missing_const_for_fn)]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Asks the view layer to redraw on its next frame.
    #[allow(clippy::missing_const_for_fn)]
    pub fn request_refresh(&mut self) {
        self.refresh_pending = true;
    }

    /// Returns `true` when a redraw was requested and not yet acknowledged.
    #[must_use]
    pub const fn refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    /// Clears a pending redraw request, returning whether one was pending.
    #[allow(clippy::missing_const_for_fn)]
    pub fn acknowledge_refresh(&mut self) -> bool {
        std::mem::replace(&mut self.refresh_pending, false)
    }
}
