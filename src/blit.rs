//! Pixmap-to-pixmap copying, scaling, and format conversion.
//!
//! Every copied pixel travels through the canonical [`Color`]: unpack from
//! the source format, optionally resample, then write into the destination
//! honoring its blend mode. The destination's scale mode selects the
//! resampler whenever the source and destination rectangles differ in size.
//!
//! The source and destination are distinct `&`/`&mut` borrows, so
//! overlapping same-buffer blits cannot be expressed.

use crate::basics::{saturate_i32, RectI};
use crate::color::Color;
use crate::pixmap::{Pixmap, ScaleMode};

/// Fixed-point bits for source-coordinate stepping.
const FIXED_SHIFT: u32 = 16;
/// Fraction bits for bilinear weights.
const SUBPIXEL_SHIFT: u32 = 8;
const SUBPIXEL_SCALE: i64 = 1 << SUBPIXEL_SHIFT;
const SUBPIXEL_MASK: i64 = SUBPIXEL_SCALE - 1;

impl Pixmap {
    /// Copy the source rectangle `(src_x, src_y, src_width, src_height)` of
    /// `src` into this pixmap's rectangle `(dst_x, dst_y, dst_width,
    /// dst_height)`.
    ///
    /// Both rectangles are clipped to their pixmap's bounds; the mapping
    /// between them is established before clipping, so partially
    /// out-of-range blits keep their alignment. Differing rectangle sizes
    /// resample with this pixmap's scale mode; differing formats convert
    /// through canonical color; this pixmap's blend mode governs how copied
    /// pixels land.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_pixmap(
        &mut self,
        src: &Pixmap,
        src_x: i32,
        src_y: i32,
        src_width: u32,
        src_height: u32,
        dst_x: i32,
        dst_y: i32,
        dst_width: u32,
        dst_height: u32,
    ) {
        if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
            return;
        }
        let mut sr = RectI::new(
            src_x,
            src_y,
            saturate_i32(src_x as i64 + src_width as i64 - 1),
            saturate_i32(src_y as i64 + src_height as i64 - 1),
        );
        if !sr.clip(&src.bounds()) {
            return;
        }

        if src_width == dst_width && src_height == dst_height {
            self.blit_same_size(src, &sr, src_x, src_y, dst_x, dst_y, dst_width, dst_height);
        } else {
            match self.scale_mode() {
                ScaleMode::Nearest => self.blit_nearest(
                    src, &sr, src_x, src_y, src_width, src_height, dst_x, dst_y, dst_width,
                    dst_height,
                ),
                ScaleMode::Bilinear => self.blit_bilinear(
                    src, &sr, src_x, src_y, src_width, src_height, dst_x, dst_y, dst_width,
                    dst_height,
                ),
            }
        }
    }

    /// Copy all of `src` unscaled with its top-left corner at (x, y).
    pub fn draw_pixmap_at(&mut self, src: &Pixmap, x: i32, y: i32) {
        self.draw_pixmap(
            src,
            0,
            0,
            src.width(),
            src.height(),
            x,
            y,
            src.width(),
            src.height(),
        );
    }

    #[inline]
    fn sample(src: &Pixmap, x: i64, y: i64) -> Color {
        src.format().unpack(src.pixels(), src.offset(x as u32, y as u32))
    }

    #[allow(clippy::too_many_arguments)]
    fn blit_same_size(
        &mut self,
        src: &Pixmap,
        sr: &RectI,
        src_x: i32,
        src_y: i32,
        dst_x: i32,
        dst_y: i32,
        width: u32,
        height: u32,
    ) {
        for j in 0..height as i64 {
            let dy = dst_y as i64 + j;
            if dy < 0 {
                continue;
            }
            if dy >= self.height() as i64 {
                break;
            }
            let sy = src_y as i64 + j;
            if sy < sr.y1 as i64 {
                continue;
            }
            if sy > sr.y2 as i64 {
                break;
            }
            for i in 0..width as i64 {
                let dx = dst_x as i64 + i;
                if dx < 0 {
                    continue;
                }
                if dx >= self.width() as i64 {
                    break;
                }
                let sx = src_x as i64 + i;
                if sx < sr.x1 as i64 {
                    continue;
                }
                if sx > sr.x2 as i64 {
                    break;
                }
                let c = Self::sample(src, sx, sy);
                self.write_pixel(dx as u32, dy as u32, c);
            }
        }
    }

    /// Nearest-neighbor scaling: destination pixel (i, j) samples the source
    /// pixel at `floor(i * src_extent / dst_extent)` within the source
    /// rectangle.
    #[allow(clippy::too_many_arguments)]
    fn blit_nearest(
        &mut self,
        src: &Pixmap,
        sr: &RectI,
        src_x: i32,
        src_y: i32,
        src_width: u32,
        src_height: u32,
        dst_x: i32,
        dst_y: i32,
        dst_width: u32,
        dst_height: u32,
    ) {
        for j in 0..dst_height as i64 {
            let dy = dst_y as i64 + j;
            if dy < 0 {
                continue;
            }
            if dy >= self.height() as i64 {
                break;
            }
            let sy = src_y as i64 + (j as u64 * src_height as u64 / dst_height as u64) as i64;
            if sy < sr.y1 as i64 || sy > sr.y2 as i64 {
                continue;
            }
            for i in 0..dst_width as i64 {
                let dx = dst_x as i64 + i;
                if dx < 0 {
                    continue;
                }
                if dx >= self.width() as i64 {
                    break;
                }
                let sx = src_x as i64 + (i as u64 * src_width as u64 / dst_width as u64) as i64;
                if sx < sr.x1 as i64 || sx > sr.x2 as i64 {
                    continue;
                }
                let c = Self::sample(src, sx, sy);
                self.write_pixel(dx as u32, dy as u32, c);
            }
        }
    }

    /// Bilinear scaling: 16.16 fixed-point source positions, 8-bit subpixel
    /// fractions, 2x2 weighted blend per channel in canonical color space.
    /// The sample anchor is the rectangle's top-left texel; neighbor
    /// coordinates clamp at the clipped source rectangle's edge.
    #[allow(clippy::too_many_arguments)]
    fn blit_bilinear(
        &mut self,
        src: &Pixmap,
        sr: &RectI,
        src_x: i32,
        src_y: i32,
        src_width: u32,
        src_height: u32,
        dst_x: i32,
        dst_y: i32,
        dst_width: u32,
        dst_height: u32,
    ) {
        let x_step = ((src_width as u64) << FIXED_SHIFT) / dst_width as u64;
        let y_step = ((src_height as u64) << FIXED_SHIFT) / dst_height as u64;
        let half = SUBPIXEL_SCALE * SUBPIXEL_SCALE / 2;

        for j in 0..dst_height as i64 {
            let dy = dst_y as i64 + j;
            if dy < 0 {
                continue;
            }
            if dy >= self.height() as i64 {
                break;
            }
            let pos_y = (j as u64 * y_step) as i64;
            let sy = src_y as i64 + (pos_y >> FIXED_SHIFT);
            if sy < sr.y1 as i64 || sy > sr.y2 as i64 {
                continue;
            }
            let sy1 = (sy + 1).min(sr.y2 as i64);
            let y_frac = (pos_y >> (FIXED_SHIFT - SUBPIXEL_SHIFT)) & SUBPIXEL_MASK;

            for i in 0..dst_width as i64 {
                let dx = dst_x as i64 + i;
                if dx < 0 {
                    continue;
                }
                if dx >= self.width() as i64 {
                    break;
                }
                let pos_x = (i as u64 * x_step) as i64;
                let sx = src_x as i64 + (pos_x >> FIXED_SHIFT);
                if sx < sr.x1 as i64 || sx > sr.x2 as i64 {
                    continue;
                }
                let sx1 = (sx + 1).min(sr.x2 as i64);
                let x_frac = (pos_x >> (FIXED_SHIFT - SUBPIXEL_SHIFT)) & SUBPIXEL_MASK;

                let c00 = Self::sample(src, sx, sy);
                let c10 = Self::sample(src, sx1, sy);
                let c01 = Self::sample(src, sx, sy1);
                let c11 = Self::sample(src, sx1, sy1);

                let w00 = (SUBPIXEL_SCALE - x_frac) * (SUBPIXEL_SCALE - y_frac);
                let w10 = x_frac * (SUBPIXEL_SCALE - y_frac);
                let w01 = (SUBPIXEL_SCALE - x_frac) * y_frac;
                let w11 = x_frac * y_frac;

                let mut acc = [half; 4];
                for (c, w) in [(c00, w00), (c10, w10), (c01, w01), (c11, w11)] {
                    acc[0] += w * c.r as i64;
                    acc[1] += w * c.g as i64;
                    acc[2] += w * c.b as i64;
                    acc[3] += w * c.a as i64;
                }

                let shift = 2 * SUBPIXEL_SHIFT;
                let c = Color::new(
                    (acc[0] >> shift) as u8,
                    (acc[1] >> shift) as u8,
                    (acc[2] >> shift) as u8,
                    (acc[3] >> shift) as u8,
                );
                self.write_pixel(dx as u32, dy as u32, c);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Color;
    use crate::format::PixelFormat;
    use crate::pixmap::{BlendMode, Pixmap, ScaleMode};

    const R: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    const G: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    const B: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    const W: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    fn checker2x2() -> Pixmap {
        let mut p = Pixmap::new(2, 2, PixelFormat::Rgba8888).unwrap();
        p.set_blend_mode(BlendMode::None);
        p.set_pixel(0, 0, R);
        p.set_pixel(1, 0, G);
        p.set_pixel(0, 1, B);
        p.set_pixel(1, 1, W);
        p
    }

    #[test]
    fn test_same_size_copy() {
        let src = checker2x2();
        let mut dst = Pixmap::new(4, 4, PixelFormat::Rgba8888).unwrap();
        dst.draw_pixmap(&src, 0, 0, 2, 2, 1, 1, 2, 2);
        assert_eq!(dst.get_pixel(1, 1), R);
        assert_eq!(dst.get_pixel(2, 1), G);
        assert_eq!(dst.get_pixel(1, 2), B);
        assert_eq!(dst.get_pixel(2, 2), W);
        assert_eq!(dst.get_pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(dst.get_pixel(3, 3), Color::TRANSPARENT);
    }

    #[test]
    fn test_draw_pixmap_at_matches_full_blit() {
        let src = checker2x2();
        let mut a = Pixmap::new(4, 4, PixelFormat::Rgba8888).unwrap();
        a.draw_pixmap_at(&src, 1, 1);
        let mut b = Pixmap::new(4, 4, PixelFormat::Rgba8888).unwrap();
        b.draw_pixmap(&src, 0, 0, 2, 2, 1, 1, 2, 2);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_nearest_2x2_to_4x4_replicates_blocks() {
        let src = checker2x2();
        let mut dst = Pixmap::new(4, 4, PixelFormat::Rgba8888).unwrap();
        dst.set_scale_mode(ScaleMode::Nearest);
        dst.draw_pixmap(&src, 0, 0, 2, 2, 0, 0, 4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let expect = match (x / 2, y / 2) {
                    (0, 0) => R,
                    (1, 0) => G,
                    (0, 1) => B,
                    _ => W,
                };
                assert_eq!(dst.get_pixel(x, y), expect, "at ({x},{y})");
            }
        }
    }

    #[test]
    fn test_nearest_downscale_samples_grid() {
        let mut src = Pixmap::new(4, 4, PixelFormat::Rgba8888).unwrap();
        src.set_blend_mode(BlendMode::None);
        for y in 0..4 {
            for x in 0..4 {
                src.set_pixel(x, y, Color::new((x * 10) as u8, (y * 10) as u8, 0, 255));
            }
        }
        let mut dst = Pixmap::new(2, 2, PixelFormat::Rgba8888).unwrap();
        dst.draw_pixmap(&src, 0, 0, 4, 4, 0, 0, 2, 2);
        // Destination pixel (i, j) samples source (2i, 2j).
        assert_eq!(dst.get_pixel(0, 0), Color::new(0, 0, 0, 255));
        assert_eq!(dst.get_pixel(1, 0), Color::new(20, 0, 0, 255));
        assert_eq!(dst.get_pixel(0, 1), Color::new(0, 20, 0, 255));
        assert_eq!(dst.get_pixel(1, 1), Color::new(20, 20, 0, 255));
    }

    #[test]
    fn test_bilinear_gradient_row() {
        let mut src = Pixmap::new(2, 1, PixelFormat::Rgba8888).unwrap();
        src.set_blend_mode(BlendMode::None);
        src.set_pixel(0, 0, Color::new(0, 0, 0, 255));
        src.set_pixel(1, 0, Color::new(255, 255, 255, 255));
        let mut dst = Pixmap::new(4, 1, PixelFormat::Rgba8888).unwrap();
        dst.set_scale_mode(ScaleMode::Bilinear);
        dst.draw_pixmap(&src, 0, 0, 2, 1, 0, 0, 4, 1);
        // Top-left-anchored mapping interpolates toward the next texel and
        // clamps at the rectangle edge.
        assert_eq!(dst.get_pixel(0, 0).r, 0);
        assert_eq!(dst.get_pixel(1, 0).r, 128);
        assert_eq!(dst.get_pixel(2, 0).r, 255);
        assert_eq!(dst.get_pixel(3, 0).r, 255);
        // Channels move together.
        for x in 0..4 {
            let c = dst.get_pixel(x, 0);
            assert_eq!(c.r, c.g);
            assert_eq!(c.g, c.b);
            assert_eq!(c.a, 255);
        }
    }

    #[test]
    fn test_bilinear_integer_positions_are_exact() {
        // Scaling 2x2 to 4x4: even destination rows/columns land on integer
        // source positions and must reproduce the source pixels.
        let src = checker2x2();
        let mut dst = Pixmap::new(4, 4, PixelFormat::Rgba8888).unwrap();
        dst.set_scale_mode(ScaleMode::Bilinear);
        dst.draw_pixmap(&src, 0, 0, 2, 2, 0, 0, 4, 4);
        assert_eq!(dst.get_pixel(0, 0), R);
        assert_eq!(dst.get_pixel(2, 0), G);
        assert_eq!(dst.get_pixel(0, 2), B);
        assert_eq!(dst.get_pixel(2, 2), W);
        // The mid position mixes all four neighbors.
        let mid = dst.get_pixel(1, 1);
        assert!(mid != R && mid != G && mid != B && mid != W);
    }

    #[test]
    fn test_format_conversion_through_blit() {
        let src = checker2x2();
        let mut dst = Pixmap::new(2, 2, PixelFormat::Rgb565).unwrap();
        dst.draw_pixmap_at(&src, 0, 0);
        assert_eq!(dst.get_pixel(0, 0), Color::new(0xf8, 0, 0, 255));
        assert_eq!(dst.get_pixel(1, 0), Color::new(0, 0xfc, 0, 255));
        assert_eq!(dst.get_pixel(0, 1), Color::new(0, 0, 0xf8, 255));
        assert_eq!(dst.get_pixel(1, 1), Color::new(0xf8, 0xfc, 0xf8, 255));
    }

    #[test]
    fn test_blit_honors_dst_blend_mode() {
        let mut src = Pixmap::new(1, 1, PixelFormat::Rgba8888).unwrap();
        src.set_blend_mode(BlendMode::None);
        src.set_pixel(0, 0, Color::new(255, 255, 255, 128));

        let mut over = Pixmap::new(1, 1, PixelFormat::Rgba8888).unwrap();
        over.clear(Color::new(0, 0, 0, 255));
        over.set_blend_mode(BlendMode::SrcOver);
        over.draw_pixmap_at(&src, 0, 0);
        assert!((over.get_pixel(0, 0).r as i32 - 128).abs() <= 1);

        let mut none = Pixmap::new(1, 1, PixelFormat::Rgba8888).unwrap();
        none.clear(Color::new(0, 0, 0, 255));
        none.set_blend_mode(BlendMode::None);
        none.draw_pixmap_at(&src, 0, 0);
        assert_eq!(none.get_pixel(0, 0), Color::new(255, 255, 255, 128));
    }

    #[test]
    fn test_blit_clips_destination() {
        let src = checker2x2();
        let mut dst = Pixmap::new(2, 2, PixelFormat::Rgba8888).unwrap();
        dst.set_blend_mode(BlendMode::None);
        dst.draw_pixmap(&src, 0, 0, 2, 2, -1, -1, 2, 2);
        // Only the bottom-right source pixel lands in bounds.
        assert_eq!(dst.get_pixel(0, 0), W);
        assert_eq!(dst.get_pixel(1, 0), Color::TRANSPARENT);
        assert_eq!(dst.get_pixel(0, 1), Color::TRANSPARENT);
    }

    #[test]
    fn test_blit_clips_source() {
        let src = checker2x2();
        let mut dst = Pixmap::new(4, 4, PixelFormat::Rgba8888).unwrap();
        dst.set_blend_mode(BlendMode::None);
        // Source rectangle hangs off the top-left of the source pixmap;
        // only its in-bounds part is copied, keeping alignment.
        dst.draw_pixmap(&src, -1, -1, 2, 2, 0, 0, 2, 2);
        assert_eq!(dst.get_pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(dst.get_pixel(1, 1), R);
    }

    #[test]
    fn test_blit_outside_is_noop() {
        let src = checker2x2();
        let mut dst = Pixmap::new(2, 2, PixelFormat::Rgba8888).unwrap();
        let before = dst.pixels().to_vec();
        dst.draw_pixmap(&src, 5, 5, 2, 2, 0, 0, 2, 2);
        dst.draw_pixmap(&src, 0, 0, 2, 2, 10, 10, 2, 2);
        dst.draw_pixmap(&src, 0, 0, 0, 2, 0, 0, 2, 2);
        dst.draw_pixmap(&src, 0, 0, 2, 2, 0, 0, 0, 2);
        assert_eq!(dst.pixels(), &before[..]);
    }

    #[test]
    fn test_blit_alpha_format_source() {
        let mut src = Pixmap::new(1, 1, PixelFormat::Alpha).unwrap();
        src.set_blend_mode(BlendMode::None);
        src.set_pixel(0, 0, Color::new(0, 0, 0, 200));

        let mut dst = Pixmap::new(1, 1, PixelFormat::Rgba8888).unwrap();
        dst.set_blend_mode(BlendMode::None);
        dst.draw_pixmap_at(&src, 0, 0);
        // Alpha-only pixels unpack with white RGB.
        assert_eq!(dst.get_pixel(0, 0), Color::new(255, 255, 255, 200));
    }
}
