//! Addressable light strip pixel buffer.

use serde::{Deserialize, Serialize};

/// Colour layout of the bytes the program shifts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LightStripMode {
    /// Three bytes per pixel, green-red-blue wire order.
    #[default]
    Rgb,
    /// Four bytes per pixel with a dedicated white channel.
    Rgbw,
    /// Three bytes per pixel, red-green-blue wire order.
    RgbRgb,
}

impl LightStripMode {
    /// Bytes per pixel.
    #[must_use]
    pub const fn stride(self) -> usize {
        match self {
            Self::Rgb | Self::RgbRgb => 3,
            Self::Rgbw => 4,
        }
    }
}

/// Decoded colour of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelColor {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// White channel, zero for three-channel strips.
    pub white: u8,
}

/// Pixel buffer of one strip, as last shifted out by the program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightStripState {
    buffer: Vec<u8>,
    mode: LightStripMode,
}

impl LightStripState {
    /// Creates an empty strip.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            mode: LightStripMode::Rgb,
        }
    }

    /// Replaces the pixel buffer.
    pub fn send_buffer(&mut self, buffer: &[u8], mode: LightStripMode) {
        self.buffer.clear();
        self.buffer.extend_from_slice(buffer);
        self.mode = mode;
    }

    /// Raw bytes as last sent.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Layout of the raw bytes.
    #[must_use]
    pub const fn mode(&self) -> LightStripMode {
        self.mode
    }

    /// Number of complete pixels in the buffer.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.buffer.len() / self.mode.stride()
    }

    /// Colour of pixel `index`, or `None` past the end of the buffer.
    #[must_use]
    pub fn pixel_color(&self, index: usize) -> Option<PixelColor> {
        let stride = self.mode.stride();
        let start = index.checked_mul(stride)?;
        let bytes = self.buffer.get(start..start.checked_add(stride)?)?;
        Some(match self.mode {
            LightStripMode::Rgb => PixelColor {
                green: bytes[0],
                red: bytes[1],
                blue: bytes[2],
                white: 0,
            },
            LightStripMode::Rgbw => PixelColor {
                green: bytes[0],
                red: bytes[1],
                blue: bytes[2],
                white: bytes[3],
            },
            LightStripMode::RgbRgb => PixelColor {
                red: bytes[0],
                green: bytes[1],
                blue: bytes[2],
                white: 0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_pixels_decode_from_grb_wire_order() {
        let mut strip = LightStripState::new();
        strip.send_buffer(&[10, 20, 30, 1, 2, 3], LightStripMode::Rgb);

        assert_eq!(strip.pixel_count(), 2);
        assert_eq!(
            strip.pixel_color(0),
            Some(PixelColor {
                red: 20,
                green: 10,
                blue: 30,
                white: 0
            })
        );
        assert!(strip.pixel_color(2).is_none());
    }

    #[test]
    fn rgbw_uses_four_byte_stride() {
        let mut strip = LightStripState::new();
        strip.send_buffer(&[1, 2, 3, 4, 5, 6, 7], LightStripMode::Rgbw);

        assert_eq!(strip.pixel_count(), 1);
        assert_eq!(strip.pixel_color(0).map(|c| c.white), Some(4));
        assert!(strip.pixel_color(1).is_none());
    }

    #[test]
    fn send_buffer_replaces_previous_frame() {
        let mut strip = LightStripState::new();
        strip.send_buffer(&[9; 9], LightStripMode::RgbRgb);
        strip.send_buffer(&[1, 2, 3], LightStripMode::RgbRgb);
        assert_eq!(strip.buffer(), &[1, 2, 3]);
        assert_eq!(strip.pixel_color(0).map(|c| c.red), Some(1));
    }

    #[test]
    fn huge_index_does_not_overflow() {
        let strip = LightStripState::new();
        assert!(strip.pixel_color(usize::MAX).is_none());
    }
}
