//! Primitive drawing: lines, rectangles, circles, triangles.
//!
//! All operations clip silently to the pixmap bounds and never fail;
//! coordinates may lie arbitrarily far outside the buffer. Every pixel
//! write honors the pixmap's blend mode, and each primitive touches any
//! given pixel at most once so source-over blending never darkens edges
//! by compositing twice.
//!
//! Internal stepping uses `i64` so coordinate deltas near the `i32` limits
//! cannot overflow.

use crate::basics::{saturate_i32, RectI};
use crate::color::Color;
use crate::pixmap::Pixmap;

impl Pixmap {
    /// Bounds-checked pixel write with `i64` coordinates, for algorithms
    /// whose intermediate positions can exceed `i32` range.
    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
            self.write_pixel(x as u32, y as u32, color);
        }
    }

    /// Clipped horizontal span, endpoints inclusive and order-insensitive.
    fn hline(&mut self, x1: i64, x2: i64, y: i64, color: Color) {
        if y < 0 || y >= self.height() as i64 {
            return;
        }
        let (a, b) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        if b < 0 || a >= self.width() as i64 {
            return;
        }
        let a = a.max(0);
        let b = b.min(self.width() as i64 - 1);
        for x in a..=b {
            self.write_pixel(x as u32, y as u32, color);
        }
    }

    /// Clipped vertical span, endpoints inclusive and order-insensitive.
    fn vline(&mut self, y1: i64, y2: i64, x: i64, color: Color) {
        if x < 0 || x >= self.width() as i64 {
            return;
        }
        let (a, b) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        if b < 0 || a >= self.height() as i64 {
            return;
        }
        let a = a.max(0);
        let b = b.min(self.height() as i64 - 1);
        for y in a..=b {
            self.write_pixel(x as u32, y as u32, color);
        }
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Draw a line from (x0, y0) to (x1, y1) with Bresenham's algorithm,
    /// both endpoints included.
    ///
    /// Endpoints are canonicalized before stepping, so swapping them
    /// produces the identical pixel set.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        // Always step from the lexicographically smaller endpoint.
        let (x0, y0, x1, y1) = if (x1, y1) < (x0, y0) {
            (x1, y1, x0, y0)
        } else {
            (x0, y0, x1, y1)
        };

        let (mut x, mut y) = (x0 as i64, y0 as i64);
        let (x1, y1) = (x1 as i64, y1 as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx: i64 = if x < x1 { 1 } else { -1 };
        let sy: i64 = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    // ========================================================================
    // Rectangles
    // ========================================================================

    /// Outline the rectangle covering `[x, x+width) x [y, y+height)`.
    /// Corner pixels are drawn exactly once. Zero width or height draws
    /// nothing.
    pub fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let x2 = x as i64 + width as i64 - 1;
        let y2 = y as i64 + height as i64 - 1;

        self.hline(x as i64, x2, y as i64, color);
        if y2 > y as i64 {
            self.hline(x as i64, x2, y2, color);
        }
        if y2 > y as i64 + 1 {
            self.vline(y as i64 + 1, y2 - 1, x as i64, color);
            if x2 > x as i64 {
                self.vline(y as i64 + 1, y2 - 1, x2, color);
            }
        }
    }

    /// Fill every pixel of `[x, x+width) x [y, y+height)`. Zero width or
    /// height draws nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        if width == 0 || height == 0 {
            return;
        }
        let mut r = RectI::new(
            x,
            y,
            saturate_i32(x as i64 + width as i64 - 1),
            saturate_i32(y as i64 + height as i64 - 1),
        );
        if !r.clip(&self.bounds()) {
            return;
        }
        for yy in r.y1..=r.y2 {
            for xx in r.x1..=r.x2 {
                self.write_pixel(xx as u32, yy as u32, color);
            }
        }
    }

    // ========================================================================
    // Circles
    // ========================================================================

    /// Draw a midpoint-algorithm circle outline centered at (cx, cy).
    /// Radius zero draws the center pixel. Symmetric points that coincide
    /// (on the axes and diagonals) are drawn once.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        if radius == 0 {
            self.set_pixel(cx, cy, color);
            return;
        }
        let r = radius.min(i32::MAX as u32) as i64;
        if self.circle_outside(cx as i64, cy as i64, r) {
            return;
        }
        if self.circle_surrounds(cx as i64, cy as i64, r) {
            return;
        }
        let (cx, cy) = (cx as i64, cy as i64);

        let mut x: i64 = 0;
        let mut y: i64 = r;
        let mut d: i64 = 1 - r;
        while x <= y {
            self.plot(cx + x, cy + y, color);
            self.plot(cx + x, cy - y, color);
            if x > 0 {
                self.plot(cx - x, cy + y, color);
                self.plot(cx - x, cy - y, color);
            }
            if x < y {
                self.plot(cx + y, cy + x, color);
                self.plot(cx - y, cy + x, color);
                if x > 0 {
                    self.plot(cx + y, cy - x, color);
                    self.plot(cx - y, cy - x, color);
                }
            }
            if d < 0 {
                d += 2 * x + 3;
            } else {
                d += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Fill the disc centered at (cx, cy) with one horizontal span per
    /// scanline, derived from the same midpoint walk as [`draw_circle`]:
    /// the filled region covers the outline with no gaps, and no pixel is
    /// blended twice.
    ///
    /// [`draw_circle`]: Pixmap::draw_circle
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Color) {
        if radius == 0 {
            self.set_pixel(cx, cy, color);
            return;
        }
        let r = radius.min(i32::MAX as u32) as i64;
        if self.circle_outside(cx as i64, cy as i64, r) {
            return;
        }
        let (cx, cy) = (cx as i64, cy as i64);
        let w = self.width() as i64;
        let h = self.height() as i64;

        if self.circle_surrounds(cx, cy, r) {
            for y in 0..h {
                self.hline(0, w - 1, y, color);
            }
            return;
        }

        // Per-row half-widths, indexed by buffer row so memory stays
        // proportional to the buffer height whatever the radius; -1 marks
        // rows the disc does not reach. Each walk offset appears both as
        // an x index and a y index; the span takes the larger so the fill
        // always covers the outline.
        fn bump(half: &mut [i64], cy: i64, o: i64, v: i64) {
            for row in [cy - o, cy + o] {
                if row >= 0 && (row as usize) < half.len() && half[row as usize] < v {
                    half[row as usize] = v;
                }
            }
        }

        let mut half = vec![-1i64; h as usize];
        let mut x: i64 = 0;
        let mut y: i64 = r;
        let mut d: i64 = 1 - r;
        while x <= y {
            bump(&mut half, cy, y, x);
            bump(&mut half, cy, x, y);
            if d < 0 {
                d += 2 * x + 3;
            } else {
                d += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }

        for (row, &hw) in half.iter().enumerate() {
            if hw >= 0 {
                self.hline(cx - hw, cx + hw, row as i64, color);
            }
        }
    }

    /// True if the circle's bounding box misses the buffer entirely.
    fn circle_outside(&self, cx: i64, cy: i64, r: i64) -> bool {
        cx + r < 0
            || cy + r < 0
            || cx - r >= self.width() as i64
            || cy - r >= self.height() as i64
    }

    /// True if every buffer pixel lies more than two units inside the
    /// circle. Walk points stay within a pixel of the true radius, so the
    /// outline cannot reach the buffer and a fill covers all of it.
    fn circle_surrounds(&self, cx: i64, cy: i64, r: i64) -> bool {
        if r < 2 {
            return false;
        }
        let dx = cx.abs().max((self.width() as i64 - 1 - cx).abs()) as i128;
        let dy = cy.abs().max((self.height() as i64 - 1 - cy).abs()) as i128;
        let m = (r - 2) as i128;
        dx * dx + dy * dy <= m * m
    }

    // ========================================================================
    // Triangles
    // ========================================================================

    /// Fill a triangle by scanline, one horizontal span per row, edges
    /// included. Any vertex winding is accepted; degenerate (collinear)
    /// triangles fill their spans deterministically.
    pub fn fill_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) {
        let edges = [
            (x0 as i64, y0 as i64, x1 as i64, y1 as i64),
            (x1 as i64, y1 as i64, x2 as i64, y2 as i64),
            (x2 as i64, y2 as i64, x0 as i64, y0 as i64),
        ];

        let y_min = (y0.min(y1).min(y2) as i64).max(0);
        let y_max = (y0.max(y1).max(y2) as i64).min(self.height() as i64 - 1);

        for y in y_min..=y_max {
            let mut lo = i64::MAX;
            let mut hi = i64::MIN;
            for &(xa, ya, xb, yb) in &edges {
                // Order each edge top-down so the divisor is positive.
                let (xa, ya, xb, yb) = if ya <= yb {
                    (xa, ya, xb, yb)
                } else {
                    (xb, yb, xa, ya)
                };
                if y < ya || y > yb {
                    continue;
                }
                if ya == yb {
                    // Horizontal edge: both endpoints bound the span.
                    lo = lo.min(xa.min(xb));
                    hi = hi.max(xa.max(xb));
                } else {
                    let x = xa + ((y - ya) * (xb - xa)).div_euclid(yb - ya);
                    lo = lo.min(x);
                    hi = hi.max(x);
                }
            }
            if lo <= hi {
                self.hline(lo, hi, y, color);
            }
        }
    }
}
