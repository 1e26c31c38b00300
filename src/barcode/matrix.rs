//! Module matrices and their rasterisation onto a fixed canvas
//!
//! Scaling follows the ZXing writers: the canvas is never smaller than the
//! symbol, modules are scaled by an integer factor and the result is centred.

use image::{GrayImage, Luma};

pub const DARK: Luma<u8> = Luma([0]);
pub const LIGHT: Luma<u8> = Luma([255]);

/// Row-major grid of modules, `true` = dark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl BitMatrix {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; (width * height) as usize],
        }
    }

    /// Single-row matrix for linear symbols
    pub fn from_row(modules: impl IntoIterator<Item = bool>) -> Self {
        let bits: Vec<bool> = modules.into_iter().collect();
        Self {
            width: bits.len() as u32,
            height: 1,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32) {
        let idx = (y * self.width + x) as usize;
        self.bits[idx] = true;
    }

    /// Copy with `margin` light modules added on every side
    pub fn with_quiet_zone(&self, margin: u32) -> Self {
        if margin == 0 {
            return self.clone();
        }
        let mut out = Self::new(self.width + 2 * margin, self.height + 2 * margin);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    out.set(x + margin, y + margin);
                }
            }
        }
        out
    }

    /// Like `with_quiet_zone` but only left and right, for linear symbols
    pub fn with_side_margins(&self, margin: u32) -> Self {
        if margin == 0 {
            return self.clone();
        }
        let mut out = Self::new(self.width + 2 * margin, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    out.set(x + margin, y);
                }
            }
        }
        out
    }
}

/// Scale a 2D matrix uniformly into a `width` x `height` canvas.
pub fn rasterize_2d(matrix: &BitMatrix, width: u32, height: u32) -> GrayImage {
    let out_w = width.max(matrix.width());
    let out_h = height.max(matrix.height());
    let multiple = (out_w / matrix.width()).min(out_h / matrix.height()).max(1);

    let left = (out_w - matrix.width() * multiple) / 2;
    let top = (out_h - matrix.height() * multiple) / 2;

    let mut img = GrayImage::from_pixel(out_w, out_h, LIGHT);
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            if !matrix.get(x, y) {
                continue;
            }
            for dy in 0..multiple {
                for dx in 0..multiple {
                    img.put_pixel(left + x * multiple + dx, top + y * multiple + dy, DARK);
                }
            }
        }
    }
    img
}

/// Scale a single-row matrix horizontally; bars span the full height.
pub fn rasterize_linear(row: &BitMatrix, width: u32, height: u32) -> GrayImage {
    let out_w = width.max(row.width());
    let out_h = height.max(1);
    let multiple = (out_w / row.width()).max(1);
    let left = (out_w - row.width() * multiple) / 2;

    let mut img = GrayImage::from_pixel(out_w, out_h, LIGHT);
    for x in 0..row.width() {
        if !row.get(x, 0) {
            continue;
        }
        for dx in 0..multiple {
            let px = left + x * multiple + dx;
            for py in 0..out_h {
                img.put_pixel(px, py, DARK);
            }
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(size: u32) -> BitMatrix {
        let mut m = BitMatrix::new(size, size);
        for y in 0..size {
            for x in 0..size {
                if (x + y) % 2 == 0 {
                    m.set(x, y);
                }
            }
        }
        m
    }

    #[test]
    fn test_rasterize_2d_fills_requested_canvas() {
        let img = rasterize_2d(&checker(21), 500, 500);
        assert_eq!(img.dimensions(), (500, 500));
    }

    #[test]
    fn test_rasterize_2d_centres_symbol() {
        // 21 modules * 23 px = 483, leaving 17 px split 8 / 9
        let img = rasterize_2d(&checker(21), 500, 500);
        assert_eq!(*img.get_pixel(7, 7), LIGHT);
        assert_eq!(*img.get_pixel(8, 8), DARK);
        assert_eq!(*img.get_pixel(8 + 22, 8 + 22), DARK);
        assert_eq!(*img.get_pixel(8 + 23, 8), LIGHT);
    }

    #[test]
    fn test_rasterize_2d_never_shrinks_below_symbol() {
        let img = rasterize_2d(&checker(30), 10, 10);
        assert_eq!(img.dimensions(), (30, 30));
    }

    #[test]
    fn test_rasterize_linear_bars_span_full_height() {
        let row = BitMatrix::from_row([true, false, true, true]);
        let img = rasterize_linear(&row, 1500, 400);
        assert_eq!(img.dimensions(), (1500, 400));
        // multiple = 375, no leftover
        assert_eq!(*img.get_pixel(0, 0), DARK);
        assert_eq!(*img.get_pixel(0, 399), DARK);
        assert_eq!(*img.get_pixel(375, 200), LIGHT);
        assert_eq!(*img.get_pixel(1499, 399), DARK);
    }

    #[test]
    fn test_quiet_zone_adds_light_border() {
        let mut m = BitMatrix::new(1, 1);
        m.set(0, 0);
        let padded = m.with_quiet_zone(2);
        assert_eq!((padded.width(), padded.height()), (5, 5));
        assert!(padded.get(2, 2));
        assert!(!padded.get(0, 0));
    }

    #[test]
    fn test_side_margins_keep_height() {
        let row = BitMatrix::from_row([true]);
        let padded = row.with_side_margins(3);
        assert_eq!((padded.width(), padded.height()), (7, 1));
        assert!(padded.get(3, 0));
    }
}
