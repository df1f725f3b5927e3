//! # raster2d
//!
//! A minimal 2D software rasterizer: pixmap allocation, pixel-format
//! handling, and primitive drawing over raw pixel buffers.
//!
//! The crate centers on [`Pixmap`], an owned raster buffer tagged with one
//! of six fixed pixel formats plus a blend mode and a scale mode. It
//! provides:
//!
//! - Pixel-format packing/unpacking between stored bytes and a canonical
//!   32-bit RGBA [`Color`]
//! - Source-over alpha compositing or plain overwrite per pixmap
//! - Bresenham lines, rectangle outlines and fills, midpoint circles and
//!   discs, scanline-filled triangles
//! - Pixmap-to-pixmap blits with clipping, format conversion, and nearest
//!   or bilinear scaling
//!
//! All drawing clips silently to the destination bounds; primitives never
//! fail. Errors only arise when creating a pixmap or decoding an image, and
//! are returned as [`PixmapError`] values. The crate ships no image codecs:
//! [`load`] accepts any external [`Decoder`] that produces raw pixels in one
//! of the six formats.
//!
//! ## Example
//!
//! ```
//! use raster2d::{Color, Pixmap, PixelFormat};
//!
//! let mut pm = Pixmap::new(64, 64, PixelFormat::Rgba8888).unwrap();
//! pm.clear(Color::from_rgba8888(0x0000_00ff));
//! pm.fill_circle(32, 32, 20, Color::from_rgba8888(0xff00_00ff));
//! pm.draw_line(0, 0, 63, 63, Color::from_rgba8888(0xffff_ffff));
//! assert_eq!(pm.get_pixel(20, 32).to_rgba8888(), 0xff00_00ff);
//! ```

pub mod basics;
pub mod blit;
pub mod color;
pub mod error;
pub mod format;
pub mod pixmap;
pub mod raster;

pub use color::Color;
pub use error::PixmapError;
pub use format::PixelFormat;
pub use pixmap::{load, BlendMode, DecodedImage, Decoder, Pixmap, ScaleMode};
