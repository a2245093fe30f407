//! Face landmarks from SeetaFace boxes.
//!
//! `rustface` finds face boxes in a grayscale copy of the frame. Each box gets a
//! fixed mean-shape template (the same starting estimate a cascade landmark
//! predictor refines), mapped into the box and normalized to the frame.

use crate::error::{Error, Result};
use crate::landmarks::{LandmarkDetector, LandmarkLayout, LandmarkSet, Point};
use image::RgbImage;
use image::imageops;
use log::debug;
use rustface::{Detector, ImageData};
use std::path::Path;

/// Template layout: indices into [`FACE_TEMPLATE`].
pub const TEMPLATE_LAYOUT: LandmarkLayout = LandmarkLayout {
    left_eye_outer: 1,
    right_eye_outer: 2,
    forehead: 0,
};

/// Mean face shape in face-box coordinates ([0,1] spans the detector box).
/// The forehead and chin sit slightly outside the box; SeetaFace boxes run
/// from the brows to just above the chin.
pub const FACE_TEMPLATE: [(f32, f32); 13] = [
    (0.50, -0.12), // forehead center
    (0.22, 0.36),  // left eye, outer corner
    (0.78, 0.36),  // right eye, outer corner
    (0.40, 0.37),  // left eye, inner corner
    (0.60, 0.37),  // right eye, inner corner
    (0.50, 0.62),  // nose tip
    (0.34, 0.80),  // mouth, left corner
    (0.66, 0.80),  // mouth, right corner
    (0.50, 1.06),  // chin
    (0.04, 0.55),  // left jaw
    (0.96, 0.55),  // right jaw
    (0.08, 0.12),  // left temple
    (0.92, 0.12),  // right temple
];

/// Face box in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FaceBox {
    /// Place the template inside this box and normalize to the frame, clamped to [0,1].
    pub fn landmarks(&self, frame_w: u32, frame_h: u32) -> LandmarkSet {
        let (fw, fh) = (frame_w.max(1) as f32, frame_h.max(1) as f32);
        let points = FACE_TEMPLATE
            .iter()
            .map(|&(tx, ty)| {
                let px = self.x + tx * self.width;
                let py = self.y + ty * self.height;
                Point::new((px / fw).clamp(0.0, 1.0), (py / fh).clamp(0.0, 1.0))
            })
            .collect();
        LandmarkSet::new(points)
    }
}

/// Tuning for the SeetaFace detector.
#[derive(Debug, Clone, Copy)]
pub struct DetectorSettings {
    pub min_face_size: u32,
    pub max_faces: usize,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self { min_face_size: 40, max_faces: 1 }
    }
}

pub struct SeetaLandmarker {
    detector: Box<dyn Detector>,
    max_faces: usize,
}

impl SeetaLandmarker {
    /// Load the SeetaFace model from disk.
    pub fn from_model_file(path: &Path, settings: DetectorSettings) -> Result<Self> {
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::Detector(format!("Model path is not UTF-8: {}", path.display())))?;
        let mut detector = rustface::create_detector(path_str)
            .map_err(|e| Error::Detector(format!("Load model {}: {e}", path.display())))?;

        detector.set_min_face_size(settings.min_face_size);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        Ok(Self { detector, max_faces: settings.max_faces })
    }
}

impl LandmarkDetector for SeetaLandmarker {
    fn layout(&self) -> LandmarkLayout {
        TEMPLATE_LAYOUT
    }

    fn detect(&mut self, frame: &RgbImage) -> Vec<LandmarkSet> {
        let (w, h) = frame.dimensions();
        let gray = imageops::grayscale(frame);
        let mut faces = self.detector.detect(&ImageData::new(gray.as_raw(), w, h));

        // Strongest first so the cap keeps the best faces.
        faces.sort_by(|a, b| b.score().total_cmp(&a.score()));
        faces.truncate(self.max_faces);
        debug!("Detected {} face(s)", faces.len());

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBox {
                    x: bbox.x() as f32,
                    y: bbox.y() as f32,
                    width: bbox.width() as f32,
                    height: bbox.height() as f32,
                }
                .landmarks(w, h)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_layout_points_at_named_landmarks() {
        let (lx, ly) = FACE_TEMPLATE[TEMPLATE_LAYOUT.left_eye_outer];
        let (rx, ry) = FACE_TEMPLATE[TEMPLATE_LAYOUT.right_eye_outer];
        let (_, fy) = FACE_TEMPLATE[TEMPLATE_LAYOUT.forehead];
        assert!(lx < rx);
        assert_eq!(ly, ry);
        assert!(fy < ly);
    }

    #[test]
    fn landmarks_are_normalized_to_frame() {
        let face = FaceBox { x: 100.0, y: 100.0, width: 200.0, height: 200.0 };
        let set = face.landmarks(400, 400);
        assert_eq!(set.len(), FACE_TEMPLATE.len());

        let left = set.get(TEMPLATE_LAYOUT.left_eye_outer).unwrap();
        assert!((left.x - (100.0 + 0.22 * 200.0) / 400.0).abs() < 1e-6);
        assert!((left.y - (100.0 + 0.36 * 200.0) / 400.0).abs() < 1e-6);
    }

    #[test]
    fn landmarks_are_clamped_at_frame_edge() {
        let face = FaceBox { x: 0.0, y: 0.0, width: 100.0, height: 100.0 };
        let set = face.landmarks(100, 100);
        let forehead = set.get(TEMPLATE_LAYOUT.forehead).unwrap();
        assert_eq!(forehead.y, 0.0);
        assert!(set.points.iter().all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
    }

    #[test]
    fn missing_model_is_a_detector_error() {
        let err = SeetaLandmarker::from_model_file(
            Path::new("/nonexistent/seeta.bin"),
            DetectorSettings::default(),
        );
        assert!(matches!(err, Err(Error::Detector(_))));
    }
}
