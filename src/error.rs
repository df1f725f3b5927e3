//! Error types for pixmap creation and decoding.
//!
//! Drawing and blitting never fail — out-of-range coordinates are clipped,
//! not rejected — so errors only arise when constructing a [`Pixmap`] or
//! decoding encoded image data.
//!
//! [`Pixmap`]: crate::pixmap::Pixmap

use thiserror::Error;

/// Error produced by pixmap construction and image decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixmapError {
    /// An integer format code did not name one of the six pixel formats.
    #[error("invalid pixel format code {0}")]
    InvalidFormat(u32),

    /// A pixmap was requested with a zero dimension.
    #[error("invalid pixmap size {width}x{height}")]
    Allocation { width: u32, height: u32 },

    /// A raw pixel buffer did not match the size implied by its
    /// width, height, and format.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    /// An external decoder failed to decode encoded image data.
    #[error("decode failed: {0}")]
    Decode(String),
}
