//! Canonical color representation and compositing math.
//!
//! Every drawing and blitting operation works in a single canonical color
//! space: 8 bits per channel RGBA, non-premultiplied. Pixel formats pack and
//! unpack this representation into their own byte layouts
//! ([`crate::format`]); blending and interpolation happen here,
//! format-independently.

// ============================================================================
// Color
// ============================================================================

/// Canonical 32-bit RGBA color, 8 bits per channel, non-premultiplied.
///
/// The packed integer form is `0xRRGGBBAA`: red in the most significant
/// byte, alpha in the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    /// Fully transparent black, the out-of-bounds read sentinel.
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a `0xRRGGBBAA` integer.
    #[inline]
    pub fn from_rgba8888(c: u32) -> Self {
        Self {
            r: (c >> 24) as u8,
            g: (c >> 16) as u8,
            b: (c >> 8) as u8,
            a: c as u8,
        }
    }

    /// Pack into a `0xRRGGBBAA` integer.
    #[inline]
    pub fn to_rgba8888(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Fixed-point multiply of two 8-bit values, `a * b / 255` with rounding.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Interpolate `p` toward `q` by 8-bit factor `a`.
    ///
    /// Exact at the endpoints: `lerp(p, q, 0) == p` and `lerp(p, q, 255) == q`.
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }

    /// Composite `self` over `dst` with standard non-premultiplied
    /// source-over blending: each channel moves from the destination toward
    /// the source by the source alpha; the result alpha is
    /// `src.a + dst.a * (1 - src.a)`.
    ///
    /// A fully opaque source overwrites; a fully transparent source leaves
    /// the destination untouched.
    #[inline]
    pub fn src_over(self, dst: Color) -> Color {
        if self.a == Self::BASE_MASK as u8 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }
        Color {
            r: Self::lerp(dst.r, self.r, self.a),
            g: Self::lerp(dst.g, self.g, self.a),
            b: Self::lerp(dst.b, self.b, self.a),
            a: self.a + Self::multiply(dst.a, Self::BASE_MASK as u8 - self.a),
        }
    }

    /// BT.709 luma of the RGB channels, integer weights summing to 256.
    #[inline]
    pub fn luma(self) -> u8 {
        ((54 * self.r as u32 + 183 * self.g as u32 + 19 * self.b as u32) >> Self::BASE_SHIFT) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8888_round_trip() {
        let c = Color::from_rgba8888(0x12345678);
        assert_eq!(c, Color::new(0x12, 0x34, 0x56, 0x78));
        assert_eq!(c.to_rgba8888(), 0x12345678);
    }

    #[test]
    fn test_lerp_endpoints_exact() {
        for &(p, q) in &[(0u8, 255u8), (255, 0), (17, 200), (200, 17), (90, 90)] {
            assert_eq!(Color::lerp(p, q, 0), p);
            assert_eq!(Color::lerp(p, q, 255), q);
        }
    }

    #[test]
    fn test_lerp_midpoint() {
        let m = Color::lerp(0, 255, 128);
        assert!((m as i32 - 128).abs() <= 1, "midpoint was {}", m);
    }

    #[test]
    fn test_multiply_identity() {
        for v in [0u8, 1, 127, 200, 255] {
            assert_eq!(Color::multiply(v, 255), v);
            assert_eq!(Color::multiply(v, 0), 0);
        }
    }

    #[test]
    fn test_src_over_opaque_overwrites() {
        let src = Color::new(10, 20, 30, 255);
        let dst = Color::new(200, 200, 200, 255);
        assert_eq!(src.src_over(dst), src);
    }

    #[test]
    fn test_src_over_transparent_is_noop() {
        let src = Color::new(10, 20, 30, 0);
        let dst = Color::new(200, 100, 50, 255);
        assert_eq!(src.src_over(dst), dst);
    }

    #[test]
    fn test_src_over_half_alpha() {
        let src = Color::new(255, 255, 255, 128);
        let dst = Color::new(0, 0, 0, 255);
        let out = src.src_over(dst);
        assert!((out.r as i32 - 128).abs() <= 1);
        assert_eq!(out.r, out.g);
        assert_eq!(out.g, out.b);
        // Opaque destination stays opaque.
        assert_eq!(out.a, 255);
    }

    #[test]
    fn test_src_over_alpha_accumulates() {
        let src = Color::new(0, 0, 0, 128);
        let dst = Color::new(0, 0, 0, 0);
        assert_eq!(src.src_over(dst).a, 128);
    }

    #[test]
    fn test_src_over_alpha_never_overflows() {
        for sa in 0..=255u8 {
            for da in [0u8, 1, 127, 128, 254, 255] {
                let out = Color::new(9, 9, 9, sa).src_over(Color::new(1, 1, 1, da));
                // Would panic on overflow in debug builds; also must not
                // lose opacity relative to the source.
                assert!(out.a >= sa);
            }
        }
    }

    #[test]
    fn test_luma_gray_identity() {
        // Weights sum to 256, so pure gray maps to itself.
        for v in [0u8, 1, 77, 128, 254, 255] {
            assert_eq!(Color::new(v, v, v, 255).luma(), v);
        }
    }

    #[test]
    fn test_luma_green_dominates() {
        let g = Color::new(0, 255, 0, 255).luma();
        let r = Color::new(255, 0, 0, 255).luma();
        let b = Color::new(0, 0, 255, 255).luma();
        assert!(g > r && r > b);
    }
}
