// Binary alpha-test overlay: resize the overlay to the placement rect, then copy
// every pixel with non-zero alpha into the frame. No weighted blending.

use crate::types::Rect;
use image::imageops::{self, FilterType};
use image::{RgbImage, RgbaImage};

/// Resize an overlay to exactly `width` x `height` (bilinear).
/// Returns None for non-positive sizes; the caller treats that as "nothing to draw".
pub fn resize_overlay(overlay: &RgbaImage, width: i32, height: i32) -> Option<RgbaImage> {
    if width <= 0 || height <= 0 {
        return None;
    }
    Some(imageops::resize(overlay, width as u32, height as u32, FilterType::Triangle))
}

/// Draw `overlay` into `frame` over `rect`.
///
/// Only the part of `rect` that intersects the frame is visited, so nothing outside
/// `[0, width) x [0, height)` is ever touched. A missing overlay or an empty rect is a no-op.
pub fn composite(frame: &mut RgbImage, overlay: Option<&RgbaImage>, rect: Rect) {
    let Some(overlay) = overlay else { return };
    let Some(resized) = resize_overlay(overlay, rect.width, rect.height) else { return };

    let (fw, fh) = (frame.width() as i64, frame.height() as i64);
    let (x, y) = (rect.x as i64, rect.y as i64);
    let (w, h) = (rect.width as i64, rect.height as i64);

    // Overlay-space rows/cols whose destination is inside the frame.
    let col_start = (-x).clamp(0, w);
    let col_end = (fw - x).clamp(0, w);
    let row_start = (-y).clamp(0, h);
    let row_end = (fh - y).clamp(0, h);

    for row in row_start..row_end {
        for col in col_start..col_end {
            let src = resized.get_pixel(col as u32, row as u32);
            if src[3] == 0 {
                continue; // transparent: leave the frame as is
            }
            let dst = frame.get_pixel_mut((x + col) as u32, (y + row) as u32);
            dst.0 = [src[0], src[1], src[2]];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    const SENTINEL: Rgb<u8> = Rgb([7, 8, 9]);

    fn frame(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, SENTINEL)
    }

    fn opaque(w: u32, h: u32, c: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([c[0], c[1], c[2], 255]))
    }

    #[test]
    fn missing_overlay_is_noop() {
        let mut f = frame(8, 8);
        composite(&mut f, None, Rect::new(0, 0, 4, 4));
        assert_eq!(f, frame(8, 8));
    }

    #[test]
    fn non_positive_size_is_noop() {
        let ov = opaque(4, 4, [1, 2, 3]);
        for rect in [Rect::new(0, 0, 0, 4), Rect::new(0, 0, 4, 0), Rect::new(0, 0, -3, -3)] {
            let mut f = frame(8, 8);
            composite(&mut f, Some(&ov), rect);
            assert_eq!(f, frame(8, 8), "{rect:?}");
        }
    }

    #[test]
    fn writes_stay_inside_rect_and_frame() {
        let ov = opaque(5, 3, [200, 100, 50]);
        let rects = [
            Rect::new(-100, -100, 20, 20), // fully outside, top-left
            Rect::new(50, 50, 10, 10),     // fully outside, bottom-right
            Rect::new(-5, -5, 10, 10),     // overlaps top-left corner
            Rect::new(12, 3, 10, 4),       // overlaps right edge
            Rect::new(3, 12, 4, 10),       // overlaps bottom edge
            Rect::new(2, 2, 6, 6),         // fully inside
            Rect::new(-20, 4, 60, 2),      // wider than frame
        ];
        for rect in rects {
            let mut f = frame(16, 16);
            composite(&mut f, Some(&ov), rect);
            for (px, py, p) in f.enumerate_pixels() {
                if rect.contains(px as i32, py as i32) {
                    assert_eq!(*p, Rgb([200, 100, 50]), "{rect:?} at ({px},{py})");
                } else {
                    assert_eq!(*p, SENTINEL, "{rect:?} leaked to ({px},{py})");
                }
            }
        }
    }

    #[test]
    fn fully_transparent_overlay_leaves_frame_identical() {
        let ov = RgbaImage::from_pixel(6, 6, Rgba([255, 0, 255, 0]));
        let mut f = RgbImage::from_fn(10, 10, |x, y| Rgb([x as u8, y as u8, (x * y) as u8]));
        let before = f.clone();
        composite(&mut f, Some(&ov), Rect::new(2, 2, 7, 5));
        assert_eq!(f, before);
    }

    #[test]
    fn opaque_overlay_copies_resized_pixels_exactly() {
        let ov = RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 60, y as u8 * 60, 10, 255]));
        let rect = Rect::new(3, 2, 9, 7);
        let mut f = frame(16, 16);
        composite(&mut f, Some(&ov), rect);

        let resized = resize_overlay(&ov, rect.width, rect.height).unwrap();
        for row in 0..rect.height as u32 {
            for col in 0..rect.width as u32 {
                let s = resized.get_pixel(col, row);
                let d = f.get_pixel(rect.x as u32 + col, rect.y as u32 + row);
                assert_eq!(d.0, [s[0], s[1], s[2]]);
            }
        }
    }

    #[test]
    fn mixed_alpha_is_binary_not_blended() {
        // Left half fully transparent, right half barely visible.
        let ov = RgbaImage::from_fn(4, 1, |x, _| {
            if x < 2 { Rgba([255, 255, 255, 0]) } else { Rgba([10, 20, 30, 1]) }
        });
        let mut f = frame(4, 1);
        composite(&mut f, Some(&ov), Rect::new(0, 0, 4, 1));
        assert_eq!(*f.get_pixel(0, 0), SENTINEL);
        assert_eq!(*f.get_pixel(3, 0), Rgb([10, 20, 30]));
    }
}
