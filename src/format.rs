//! Pixel formats and the packing/unpacking codec.
//!
//! Six fixed storage formats, identified by the integer codes a foreign
//! caller would pass. Components are laid out in memory in the order they
//! appear in the format name: `Rgb888` stores `[r, g, b]`. The two packed
//! 16-bit formats store the high-order byte first (the byte holding red), so
//! the layout is identical on every machine.
//!
//! All conversions go through the canonical [`Color`]; `Rgb565` and
//! `Rgba4444` truncate the low-order component bits on pack and reconstruct
//! by plain left-shift on unpack, so the stored bytes round-trip exactly and
//! only the truncated bits are lost.

use crate::color::Color;
use crate::error::PixmapError;

// ============================================================================
// PixelFormat
// ============================================================================

/// Storage format of a pixmap's pixel buffer.
///
/// Discriminants match the integer codes of the C-era API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// 1 byte: alpha only. Unpacks with white RGB.
    Alpha = 1,
    /// 2 bytes: BT.709 luma, then alpha.
    LuminanceAlpha = 2,
    /// 3 bytes: red, green, blue. Unpacks fully opaque.
    Rgb888 = 3,
    /// 4 bytes: red, green, blue, alpha.
    Rgba8888 = 4,
    /// 2 bytes, bit-packed `rrrrrggg gggbbbbb`. Unpacks fully opaque.
    Rgb565 = 5,
    /// 2 bytes, bit-packed `rrrrgggg bbbbaaaa`.
    Rgba4444 = 6,
}

impl PixelFormat {
    /// All formats, in code order.
    pub const ALL: [PixelFormat; 6] = [
        PixelFormat::Alpha,
        PixelFormat::LuminanceAlpha,
        PixelFormat::Rgb888,
        PixelFormat::Rgba8888,
        PixelFormat::Rgb565,
        PixelFormat::Rgba4444,
    ];

    /// Resolve an integer format code.
    pub fn from_code(code: u32) -> Result<Self, PixmapError> {
        match code {
            1 => Ok(PixelFormat::Alpha),
            2 => Ok(PixelFormat::LuminanceAlpha),
            3 => Ok(PixelFormat::Rgb888),
            4 => Ok(PixelFormat::Rgba8888),
            5 => Ok(PixelFormat::Rgb565),
            6 => Ok(PixelFormat::Rgba4444),
            other => Err(PixmapError::InvalidFormat(other)),
        }
    }

    /// The integer code of this format.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Storage size of one pixel.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Alpha => 1,
            PixelFormat::LuminanceAlpha => 2,
            PixelFormat::Rgb888 => 3,
            PixelFormat::Rgba8888 => 4,
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgba4444 => 2,
        }
    }

    /// Whether the stored bytes carry an alpha channel. Formats without one
    /// unpack as fully opaque.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            PixelFormat::Alpha
                | PixelFormat::LuminanceAlpha
                | PixelFormat::Rgba8888
                | PixelFormat::Rgba4444
        )
    }

    /// Write `c` into `buf` at byte `offset` in this format's layout.
    ///
    /// Low-order component bits are truncated for `Rgb565`/`Rgba4444`; RGB
    /// collapses to luma for the luminance formats.
    #[inline]
    pub fn pack(self, c: Color, buf: &mut [u8], offset: usize) {
        match self {
            PixelFormat::Alpha => {
                buf[offset] = c.a;
            }
            PixelFormat::LuminanceAlpha => {
                buf[offset] = c.luma();
                buf[offset + 1] = c.a;
            }
            PixelFormat::Rgb888 => {
                buf[offset] = c.r;
                buf[offset + 1] = c.g;
                buf[offset + 2] = c.b;
            }
            PixelFormat::Rgba8888 => {
                buf[offset] = c.r;
                buf[offset + 1] = c.g;
                buf[offset + 2] = c.b;
                buf[offset + 3] = c.a;
            }
            PixelFormat::Rgb565 => {
                let v = ((c.r as u16 >> 3) << 11) | ((c.g as u16 >> 2) << 5) | (c.b as u16 >> 3);
                buf[offset] = (v >> 8) as u8;
                buf[offset + 1] = v as u8;
            }
            PixelFormat::Rgba4444 => {
                let v = ((c.r as u16 >> 4) << 12)
                    | ((c.g as u16 >> 4) << 8)
                    | ((c.b as u16 >> 4) << 4)
                    | (c.a as u16 >> 4);
                buf[offset] = (v >> 8) as u8;
                buf[offset + 1] = v as u8;
            }
        }
    }

    /// Read the canonical color stored in `buf` at byte `offset`.
    #[inline]
    pub fn unpack(self, buf: &[u8], offset: usize) -> Color {
        match self {
            PixelFormat::Alpha => Color::new(255, 255, 255, buf[offset]),
            PixelFormat::LuminanceAlpha => {
                let l = buf[offset];
                Color::new(l, l, l, buf[offset + 1])
            }
            PixelFormat::Rgb888 => Color::new(buf[offset], buf[offset + 1], buf[offset + 2], 255),
            PixelFormat::Rgba8888 => Color::new(
                buf[offset],
                buf[offset + 1],
                buf[offset + 2],
                buf[offset + 3],
            ),
            PixelFormat::Rgb565 => {
                let v = (buf[offset] as u16) << 8 | buf[offset + 1] as u16;
                Color::new(
                    (((v >> 11) & 0x1f) << 3) as u8,
                    (((v >> 5) & 0x3f) << 2) as u8,
                    ((v & 0x1f) << 3) as u8,
                    255,
                )
            }
            PixelFormat::Rgba4444 => {
                let v = (buf[offset] as u16) << 8 | buf[offset + 1] as u16;
                Color::new(
                    (((v >> 12) & 0x0f) << 4) as u8,
                    (((v >> 8) & 0x0f) << 4) as u8,
                    (((v >> 4) & 0x0f) << 4) as u8,
                    ((v & 0x0f) << 4) as u8,
                )
            }
        }
    }
}
