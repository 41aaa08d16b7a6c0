/// Packed 1-bit framebuffer with line primitives
use crate::error::{RenderError, Result};

/// A screen-space pixel coordinate. May lie outside the surface.
pub type Point = (i32, i32);

/// Monochrome bitmap, row-major, 8 pixels per byte, LSB-first.
///
/// Drawing only ever sets bits; overlapping strokes stay lit until the next
/// [`Framebuffer::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    stride: usize,
    bits: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let stride = width.div_ceil(8);
        let size = stride
            .checked_mul(height)
            .ok_or(RenderError::FramebufferAlloc { width, height })?;

        let mut bits = Vec::new();
        bits.try_reserve_exact(size)
            .map_err(|_| RenderError::FramebufferAlloc { width, height })?;
        bits.resize(size, 0);

        Ok(Self {
            width,
            height,
            stride,
            bits,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Raw packed rows for the display host
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
    }

    fn index(&self, x: i64, y: i64) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * self.stride + x / 8, 1 << (x % 8)))
    }

    /// Light a pixel. Coordinates outside the surface, negative ones
    /// included, are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        self.set_pixel_wide(x as i64, y as i64);
    }

    fn set_pixel_wide(&mut self, x: i64, y: i64) {
        if let Some((byte, mask)) = self.index(x, y) {
            self.bits[byte] |= mask;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.index(x as i64, y as i64)
            .map(|(byte, mask)| self.bits[byte] & mask != 0)
            .unwrap_or(false)
    }

    /// Number of lit pixels
    pub fn lit_pixels(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Bresenham line including both endpoints.
    ///
    /// Endpoints are put in a canonical order first, so swapping them yields
    /// the same pixel set.
    pub fn draw_line(&mut self, from: Point, to: Point) {
        let (start, end) = if from <= to { (from, to) } else { (to, from) };

        let (mut x, mut y) = (start.0 as i64, start.1 as i64);
        let (x1, y1) = (end.0 as i64, end.1 as i64);

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel_wide(x, y);
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

    /// Closed outline: p1 -> p2 -> p3 -> p1
    pub fn draw_triangle_outline(&mut self, p1: Point, p2: Point, p3: Point) {
        self.draw_line(p1, p2);
        self.draw_line(p2, p3);
        self.draw_line(p3, p1);
    }
}
