//! Landmark types and the detector seam.
//!
//! A detector returns one [`LandmarkSet`] per face, in normalized [0,1] frame
//! coordinates, and tells the mapper where its eye and forehead points live via
//! a [`LandmarkLayout`].

use image::RgbImage;

/// A 2D point in normalized frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale to pixel units, truncating toward zero.
    pub fn to_pixels(&self, width: u32, height: u32) -> (i32, i32) {
        (
            (self.x as f64 * width as f64) as i32,
            (self.y as f64 * height as f64) as i32,
        )
    }
}

/// Landmarks for one detected face.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    pub points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Point> {
        self.points.get(idx).copied()
    }
}

/// Indices of the points the mapper needs, in the detector's own numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkLayout {
    /// Outer corner of the eye that appears on the left of the image.
    pub left_eye_outer: usize,
    /// Outer corner of the eye that appears on the right of the image.
    pub right_eye_outer: usize,
    pub forehead: usize,
}

/// Anything that can turn a frame into per-face landmarks.
///
/// Implementations may keep state across frames, hence `&mut self`.
pub trait LandmarkDetector {
    fn layout(&self) -> LandmarkLayout;

    /// Zero or more landmark sets; an empty Vec means no face this frame.
    fn detect(&mut self, frame: &RgbImage) -> Vec<LandmarkSet>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_pixels_truncates() {
        let p = Point::new(0.5, 0.999);
        assert_eq!(p.to_pixels(641, 480), (320, 479));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let set = LandmarkSet::new(vec![Point::new(0.1, 0.2)]);
        assert_eq!(set.get(0), Some(Point::new(0.1, 0.2)));
        assert_eq!(set.get(1), None);
    }
}
