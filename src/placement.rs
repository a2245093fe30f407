// Landmarks -> placement rect, one rule per filter.
// All pixel math truncates toward zero, like the rest of the capture path.

use crate::filters::Filter;
use crate::landmarks::{LandmarkLayout, LandmarkSet};
use crate::types::Rect;

/// Extra width added to the eye span for glasses (pixels).
pub const GLASSES_MARGIN: i32 = 60;
/// How far left of the left eye the glasses start (pixels).
pub const GLASSES_LEFT_OFFSET: i32 = 30;
/// How far above the eye line the glasses start (pixels).
pub const GLASSES_TOP_OFFSET: i32 = 20;

/// Crown / heart size and lift above the forehead point (pixels).
pub const HEADPIECE_WIDTH: i32 = 200;
pub const HEADPIECE_HEIGHT: i32 = 100;
pub const HEADPIECE_LIFT: i32 = 120;

/// Mask inflation relative to the landmark bounding box.
pub const MASK_SCALE_X: f64 = 1.2;
pub const MASK_SCALE_Y: f64 = 1.4;

/// Where to draw `filter` for one face.
///
/// `frame_size` converts normalized landmarks to pixels. `overlay_size` is the
/// intrinsic (width, height) of the loaded overlay; glasses need it for their
/// aspect ratio and get no rect without it. Returns None for `Filter::None`
/// or when a required landmark is missing from the set.
pub fn placement(
    filter: Filter,
    landmarks: &LandmarkSet,
    layout: &LandmarkLayout,
    frame_size: (u32, u32),
    overlay_size: Option<(u32, u32)>,
) -> Option<Rect> {
    let (fw, fh) = frame_size;
    match filter {
        Filter::None => None,
        Filter::Glasses => {
            let (ow, oh) = overlay_size?;
            if ow == 0 {
                return None;
            }
            let (x1, eye_y) = landmarks.get(layout.left_eye_outer)?.to_pixels(fw, fh);
            let (x2, _) = landmarks.get(layout.right_eye_outer)?.to_pixels(fw, fh);

            let width = x2 - x1 + GLASSES_MARGIN;
            let height = (width as f64 * oh as f64 / ow as f64) as i32;
            Some(Rect::new(x1 - GLASSES_LEFT_OFFSET, eye_y - GLASSES_TOP_OFFSET, width, height))
        }
        Filter::Crown | Filter::Heart => {
            let (x, y) = landmarks.get(layout.forehead)?.to_pixels(fw, fh);
            Some(Rect::new(
                x - HEADPIECE_WIDTH / 2,
                y - HEADPIECE_LIFT,
                HEADPIECE_WIDTH,
                HEADPIECE_HEIGHT,
            ))
        }
        Filter::Spiderman => {
            let (x_min, y_min, x_max, y_max) = pixel_bounds(landmarks, fw, fh)?;
            let face_w = x_max - x_min;
            let face_h = y_max - y_min;

            let mask_w = (face_w as f64 * MASK_SCALE_X) as i32;
            let mask_h = (face_h as f64 * MASK_SCALE_Y) as i32;

            // Keep the inflated box centered on the face box.
            let x = x_min - ((mask_w - face_w) as f64 / 2.0) as i32;
            let y = y_min - ((mask_h - face_h) as f64 / 2.0) as i32;
            Some(Rect::new(x, y, mask_w, mask_h))
        }
    }
}

/// Axis-aligned box over every landmark, in pixels: (x_min, y_min, x_max, y_max).
/// Extremes are taken in normalized space first, then scaled.
fn pixel_bounds(landmarks: &LandmarkSet, fw: u32, fh: u32) -> Option<(i32, i32, i32, i32)> {
    let first = landmarks.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &landmarks.points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let scale = |v: f32, dim: u32| (v as f64 * dim as f64) as i32;
    Some((scale(min_x, fw), scale(min_y, fh), scale(max_x, fw), scale(max_y, fh)))
}
