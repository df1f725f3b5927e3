//! Pixmap — an owned raster buffer with fixed size and format.
//!
//! A [`Pixmap`] owns its pixel bytes; dropping it releases them. Width,
//! height, and format are fixed at creation (reformatting means creating a
//! new pixmap and blitting into it), while blend and scale mode may be
//! changed at any time and affect only subsequent operations.
//!
//! All drawing goes through [`Color`], the canonical RGBA representation;
//! the pixel format only determines how colors are stored.

use crate::basics::{saturate_i32, RectI};
use crate::color::Color;
use crate::error::PixmapError;
use crate::format::PixelFormat;

// ============================================================================
// Blend and scale modes
// ============================================================================

/// How drawn pixels combine with what the buffer already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum BlendMode {
    /// Overwrite the destination pixel.
    None = 0,
    /// Source-over alpha compositing ([`Color::src_over`]).
    #[default]
    SrcOver = 1,
}

impl BlendMode {
    /// Resolve an integer mode code; `None` for unknown codes.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(BlendMode::None),
            1 => Some(BlendMode::SrcOver),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Resampling strategy for scaled blits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum ScaleMode {
    /// Sample the proportionally nearest source pixel.
    #[default]
    Nearest = 0,
    /// Weighted average of the four nearest source pixels.
    Bilinear = 1,
}

impl ScaleMode {
    /// Resolve an integer mode code; `None` for unknown codes.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ScaleMode::Nearest),
            1 => Some(ScaleMode::Bilinear),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }
}

// ============================================================================
// Pixmap
// ============================================================================

/// An in-memory raster image: a packed pixel buffer tagged with width,
/// height, pixel format, blend mode, and scale mode.
///
/// Invariant: `pixels.len() == width * height * format.bytes_per_pixel()`
/// at all times.
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    format: PixelFormat,
    blend: BlendMode,
    scale: ScaleMode,
    pixels: Vec<u8>,
}

impl Pixmap {
    /// Allocate a pixmap with a zero-initialized buffer (transparent black
    /// for formats with alpha, black otherwise).
    ///
    /// Fails with [`PixmapError::Allocation`] if either dimension is zero,
    /// the byte length overflows `usize`, or the allocator cannot satisfy
    /// the request.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, PixmapError> {
        if width == 0 || height == 0 {
            return Err(PixmapError::Allocation { width, height });
        }
        let len = Self::buffer_len(width, height, format)
            .ok_or(PixmapError::Allocation { width, height })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| PixmapError::Allocation { width, height })?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            format,
            blend: BlendMode::default(),
            scale: ScaleMode::default(),
            pixels,
        })
    }

    /// Adopt an already-decoded pixel buffer.
    ///
    /// Fails with [`PixmapError::BufferSize`] if the buffer length does not
    /// match `width * height * format.bytes_per_pixel()`.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, PixmapError> {
        if width == 0 || height == 0 {
            return Err(PixmapError::Allocation { width, height });
        }
        let expected = Self::buffer_len(width, height, format)
            .ok_or(PixmapError::Allocation { width, height })?;
        if pixels.len() != expected {
            return Err(PixmapError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            blend: BlendMode::default(),
            scale: ScaleMode::default(),
            pixels,
        })
    }

    /// Buffer byte length for the given dimensions, `None` on overflow.
    fn buffer_len(width: u32, height: u32, format: PixelFormat) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(format.bytes_per_pixel())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub fn scale_mode(&self) -> ScaleMode {
        self.scale
    }

    /// Set the blend mode for subsequent draw/blit calls.
    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    /// Set the scale mode for subsequent scaled blits.
    pub fn set_scale_mode(&mut self, scale: ScaleMode) {
        self.scale = scale;
    }

    /// The packed pixel bytes, row-major, no padding between rows.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the packed pixel bytes.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// The drawable area as an inclusive-corner rectangle.
    #[inline]
    pub(crate) fn bounds(&self) -> RectI {
        RectI::new(
            0,
            0,
            saturate_i32(self.width as i64 - 1),
            saturate_i32(self.height as i64 - 1),
        )
    }

    #[inline]
    pub(crate) fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Byte offset of pixel (x, y). Caller guarantees in-bounds coordinates.
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.format.bytes_per_pixel()
    }

    /// Blend-aware unclipped write. Caller guarantees in-bounds coordinates.
    #[inline]
    pub(crate) fn write_pixel(&mut self, x: u32, y: u32, color: Color) {
        let off = self.offset(x, y);
        let c = match self.blend {
            BlendMode::None => color,
            BlendMode::SrcOver => color.src_over(self.format.unpack(&self.pixels, off)),
        };
        self.format.pack(c, &mut self.pixels, off);
    }

    /// Write one pixel, honoring the blend mode. Out-of-bounds coordinates
    /// are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            self.write_pixel(x as u32, y as u32, color);
        }
    }

    /// Read the canonical color at (x, y), or [`Color::TRANSPARENT`] for
    /// out-of-bounds coordinates.
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        if !self.in_bounds(x, y) {
            return Color::TRANSPARENT;
        }
        let off = self.offset(x as u32, y as u32);
        self.format.unpack(&self.pixels, off)
    }

    /// Set every pixel to `color`, bypassing the blend mode.
    pub fn clear(&mut self, color: Color) {
        let bpp = self.format.bytes_per_pixel();
        let mut px = [0u8; 4];
        self.format.pack(color, &mut px, 0);
        for chunk in self.pixels.chunks_exact_mut(bpp) {
            chunk.copy_from_slice(&px[..bpp]);
        }
    }
}

// ============================================================================
// Loading through an external decoder
// ============================================================================

/// Raw pixels produced by an external image decoder.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pixels: Vec<u8>,
}

/// Decodes an encoded image (PNG, JPEG, ...) into raw pixels in one of the
/// six pixel formats. This crate ships no codecs; callers plug in one from
/// an image-codec library.
pub trait Decoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, PixmapError>;
}

/// Decode `data` with `decoder` and wrap the result in a [`Pixmap`],
/// re-validating the buffer-size invariant.
pub fn load(decoder: &dyn Decoder, data: &[u8]) -> Result<Pixmap, PixmapError> {
    let img = decoder.decode(data)?;
    Pixmap::from_raw(img.width, img.height, img.format, img.pixels)
}
