use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::detector::DetectorSettings;

#[derive(Parser, Debug, Clone)]
#[command(name = "face-filter")]
#[command(version, about = "Live camera face filters (glasses, crown, heart, mask)", long_about = None)]
pub struct Args {
    /// Camera index (0 = default webcam)
    #[arg(long, default_value = "0")]
    pub camera: u32,

    /// Requested capture width; the camera may pick the closest it supports
    #[arg(long, default_value = "640")]
    pub width: u32,

    /// Requested capture height
    #[arg(long, default_value = "480")]
    pub height: u32,

    /// Directory holding <name>.png overlays
    #[arg(long, default_value = "filters")]
    pub filters_dir: PathBuf,

    /// SeetaFace frontal face model
    #[arg(long, default_value = "models/seeta_fd_frontal_v1.0.bin")]
    pub detector_model: PathBuf,

    /// Most faces to decorate per frame
    #[arg(long, default_value = "1")]
    pub max_faces: usize,

    /// Minimum face size for detection (pixels)
    #[arg(long, default_value = "40")]
    pub min_face_size: u32,

    /// Pause between processing cycles (milliseconds)
    #[arg(long, default_value = "10")]
    pub frame_delay_ms: u64,
}

impl Args {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn detector_settings(&self) -> DetectorSettings {
        DetectorSettings { min_face_size: self.min_face_size, max_faces: self.max_faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_single_face_webcam_setup() {
        let args = Args::parse_from(["face-filter"]);
        assert_eq!(args.camera, 0);
        assert_eq!((args.width, args.height), (640, 480));
        assert_eq!(args.filters_dir, PathBuf::from("filters"));
        assert_eq!(args.max_faces, 1);
        assert_eq!(args.frame_delay(), Duration::from_millis(10));
    }

    #[test]
    fn overrides_are_parsed() {
        let args = Args::parse_from([
            "face-filter",
            "--camera", "2",
            "--filters-dir", "/tmp/overlays",
            "--max-faces", "3",
            "--frame-delay-ms", "33",
        ]);
        assert_eq!(args.camera, 2);
        assert_eq!(args.filters_dir, PathBuf::from("/tmp/overlays"));
        assert_eq!(args.detector_settings().max_faces, 3);
        assert_eq!(args.frame_delay(), Duration::from_millis(33));
    }
}
