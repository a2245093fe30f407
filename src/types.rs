// Core types shared by the capture loop, the mapper and the compositor.

use image::RgbImage;

/// Packed display buffer handed to minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window content is (pixels)
    pub height: usize,     // how tall the window content is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Copy an RGB frame into this buffer with its top-left corner at (x0, y0).
    /// Pixels that land outside the buffer are dropped.
    pub fn blit_rgb(&mut self, frame: &RgbImage, x0: usize, y0: usize) {
        let (fw, fh) = frame.dimensions();
        for y in 0..fh as usize {
            let dy = y0 + y;
            if dy >= self.height { break; }
            for x in 0..fw as usize {
                let dx = x0 + x;
                if dx >= self.width { break; }
                let p = frame.get_pixel(x as u32, y as u32);
                self.pixels[dy * self.width + dx] = pack_rgb(p[0], p[1], p[2]);
            }
        }
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Destination region for one overlay in frame pixel coordinates.
/// May be partly or entirely off-frame; width/height may be non-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        // i64 so rects near i32::MAX can't overflow the far edge.
        let (px, py) = (px as i64, py as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && py >= y && px < x + self.width as i64 && py < y + self.height as i64
    }
}
