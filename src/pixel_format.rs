// Copyright 2025 Dustin McAfee
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pixel format description and translation.
//!
//! The RFB wire carries a 16-byte pixel format record describing how a
//! logical colour maps to bytes: bits per pixel, colour depth, byte order,
//! and per-channel maxima and shifts. The server encodes every pixel it
//! sends in whatever format the client last negotiated, so the encoder here
//! must honour all of those fields exactly.

use bytes::{BufMut, BytesMut};

use crate::error::{Result, RfbError};

/// An RGB colour with channels in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl Colour {
    /// Creates a colour from three channel values.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Converts the colour to the 16-bit channels of a colour map entry,
    /// clamping each channel to `[0.0, 1.0]`.
    #[allow(clippy::cast_possible_truncation)] // Clamped to [0, 65535] before the cast
    #[allow(clippy::cast_sign_loss)]
    pub(crate) fn map_entry_channels(&self) -> [u16; 3] {
        let scale = |channel: f32| (channel.clamp(0.0, 1.0) * 65535.0).round() as u16;
        [scale(self.r), scale(self.g), scale(self.b)]
    }
}

/// The 16-byte RFB pixel format record (RFC 6143 Section 7.4).
///
/// Created at session open from the server configuration and replaced
/// wholesale whenever the client sends `SetPixelFormat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    /// Bits per pixel on the wire. Must be 8, 16, 24, 32 or 64.
    pub bits_per_pixel: u8,
    /// Colour depth: the number of useful bits, at most `bits_per_pixel`.
    pub depth: u8,
    /// True if multi-byte pixel values are sent most significant byte first.
    pub big_endian_flag: bool,
    /// True for true-colour formats; false selects indexed colour.
    pub true_colour_flag: bool,
    /// Maximum red value (`2^N - 1` for N red bits).
    pub red_max: u16,
    /// Maximum green value.
    pub green_max: u16,
    /// Maximum blue value.
    pub blue_max: u16,
    /// Left shift of the red channel within the pixel value.
    pub red_shift: u8,
    /// Left shift of the green channel.
    pub green_shift: u8,
    /// Left shift of the blue channel.
    pub blue_shift: u8,
}

impl PixelFormat {
    /// The canonical 32-bit little-endian true-colour format: blue in the
    /// low byte, then green, then red, then a padding byte.
    #[must_use]
    pub const fn bgrx8888() -> Self {
        Self {
            bits_per_pixel: 32,
            depth: 24,
            big_endian_flag: false,
            true_colour_flag: true,
            red_max: 255,
            green_max: 255,
            blue_max: 255,
            red_shift: 16,
            green_shift: 8,
            blue_shift: 0,
        }
    }

    /// Serializes the format into its 16-byte wire form.
    ///
    /// Layout: four single bytes (`bits_per_pixel`, `depth`, `big_endian`,
    /// `true_colour`), three big-endian u16 maxima, three shift bytes, and
    /// three bytes of padding.
    pub fn write_to(&self, buf: &mut BytesMut) {
        buf.put_u8(self.bits_per_pixel);
        buf.put_u8(self.depth);
        buf.put_u8(u8::from(self.big_endian_flag));
        buf.put_u8(u8::from(self.true_colour_flag));
        buf.put_u16(self.red_max);
        buf.put_u16(self.green_max);
        buf.put_u16(self.blue_max);
        buf.put_u8(self.red_shift);
        buf.put_u8(self.green_shift);
        buf.put_u8(self.blue_shift);
        buf.put_bytes(0, 3);
    }

    /// Parses a format from its 16-byte wire form. Padding is ignored.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; 16]) -> Self {
        Self {
            bits_per_pixel: bytes[0],
            depth: bytes[1],
            big_endian_flag: bytes[2] != 0,
            true_colour_flag: bytes[3] != 0,
            red_max: u16::from_be_bytes([bytes[4], bytes[5]]),
            green_max: u16::from_be_bytes([bytes[6], bytes[7]]),
            blue_max: u16::from_be_bytes([bytes[8], bytes[9]]),
            red_shift: bytes[10],
            green_shift: bytes[11],
            blue_shift: bytes[12],
        }
    }

    /// Checks the structural invariants of the record: a known bits-per-pixel
    /// value, depth no larger than bits-per-pixel, shifts inside the pixel,
    /// and channel maxima of the form `2^N - 1`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let known_bpp = matches!(self.bits_per_pixel, 8 | 16 | 24 | 32 | 64);
        let depth_fits = self.depth > 0 && self.depth <= self.bits_per_pixel;
        let shifts_fit = self.red_shift < self.bits_per_pixel
            && self.green_shift < self.bits_per_pixel
            && self.blue_shift < self.bits_per_pixel;
        let mask = |max: u16| max > 0 && (u32::from(max) & (u32::from(max) + 1)) == 0;
        let maxima_ok = !self.true_colour_flag
            || (mask(self.red_max) && mask(self.green_max) && mask(self.blue_max));
        known_bpp && depth_fits && shifts_fit && maxima_ok
    }

    /// Number of bytes one pixel occupies on the wire, or 0 for a
    /// bits-per-pixel value the encoder does not produce.
    #[must_use]
    pub fn bytes_per_pixel(&self) -> usize {
        match self.bits_per_pixel {
            8 => 1,
            16 => 2,
            24 => 3,
            32 => 4,
            64 => 8,
            _ => 0,
        }
    }

    /// Encodes one colour into its on-wire byte sequence.
    ///
    /// Each channel is scaled by its maximum with a truncating float-to-int
    /// conversion, shifted into place, and the combined value is written in
    /// `bits_per_pixel / 8` bytes in the negotiated byte order. An
    /// unrecognized bits-per-pixel yields an empty vector (the pixel is
    /// skipped). Indexed colour is not supported.
    ///
    /// # Errors
    ///
    /// Returns [`RfbError::UnsupportedPixelFormat`] if the format is not
    /// true-colour.
    #[allow(clippy::cast_possible_truncation)] // Channel products are bounded by the u16 maxima
    #[allow(clippy::cast_sign_loss)]
    pub fn encode(&self, colour: Colour) -> Result<Vec<u8>> {
        if !self.true_colour_flag {
            return Err(RfbError::UnsupportedPixelFormat(
                "indexed colour is not supported".to_string(),
            ));
        }

        let pixel = ((f32::from(self.red_max) * colour.r) as u64) << self.red_shift
            | ((f32::from(self.green_max) * colour.g) as u64) << self.green_shift
            | ((f32::from(self.blue_max) * colour.b) as u64) << self.blue_shift;

        let bytes = match self.bits_per_pixel {
            8 => vec![pixel as u8],
            16 => {
                let value = pixel as u16;
                if self.big_endian_flag {
                    value.to_be_bytes().to_vec()
                } else {
                    value.to_le_bytes().to_vec()
                }
            }
            24 => {
                let value = pixel as u32;
                if self.big_endian_flag {
                    value.to_be_bytes()[1..].to_vec()
                } else {
                    value.to_le_bytes()[..3].to_vec()
                }
            }
            32 => {
                let value = pixel as u32;
                if self.big_endian_flag {
                    value.to_be_bytes().to_vec()
                } else {
                    value.to_le_bytes().to_vec()
                }
            }
            64 => {
                if self.big_endian_flag {
                    pixel.to_be_bytes().to_vec()
                } else {
                    pixel.to_le_bytes().to_vec()
                }
            }
            _ => Vec::new(),
        };
        Ok(bytes)
    }

    /// Decodes one on-wire pixel back into a colour. The inverse of
    /// [`encode`](Self::encode), restricted to true-colour formats.
    ///
    /// # Errors
    ///
    /// Returns [`RfbError::UnsupportedPixelFormat`] if the format is not
    /// true-colour, or [`RfbError::ProtocolViolation`] if `bytes` is not
    /// exactly one pixel wide.
    pub fn decode(&self, bytes: &[u8]) -> Result<Colour> {
        if !self.true_colour_flag {
            return Err(RfbError::UnsupportedPixelFormat(
                "indexed colour is not supported".to_string(),
            ));
        }
        let width = self.bytes_per_pixel();
        if width == 0 || bytes.len() != width {
            return Err(RfbError::ProtocolViolation(format!(
                "pixel is {} bytes, expected {}",
                bytes.len(),
                width
            )));
        }

        let mut raw = [0u8; 8];
        if self.big_endian_flag {
            raw[8 - width..].copy_from_slice(bytes);
        } else {
            raw[..width].copy_from_slice(bytes);
            raw.reverse();
        }
        let pixel = u64::from_be_bytes(raw);

        let channel = |shift: u8, max: u16| {
            if max == 0 {
                0.0
            } else {
                ((pixel >> shift) & u64::from(max)) as f32 / f32::from(max)
            }
        };
        Ok(Colour::new(
            channel(self.red_shift, self.red_max),
            channel(self.green_shift, self.green_max),
            channel(self.blue_shift, self.blue_max),
        ))
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::bgrx8888()
    }
}
