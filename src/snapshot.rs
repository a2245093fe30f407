// "Capture & Save": grab a fresh raw frame, ask where to put it, write it.
// The frame is read independently of the one on screen, so it carries no overlay.

use crate::camera::FrameSource;
use crate::error::Result;
use image::RgbImage;
use log::{debug, error, info};
use std::path::{Path, PathBuf};

/// Ask the user for a destination; None when the dialog is cancelled.
pub trait SavePrompt {
    fn ask(&mut self) -> Option<PathBuf>;
}

/// Native "save as" dialog defaulting to JPEG.
pub struct NativeSaveDialog;

impl SavePrompt for NativeSaveDialog {
    fn ask(&mut self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Save snapshot")
            .set_file_name("snapshot.jpg")
            .add_filter("JPEG files", &["jpg", "jpeg"])
            .add_filter("All files", &["*"])
            .save_file()
            .map(with_default_extension)
    }
}

/// Append `.jpg` when the chosen name has no extension.
pub fn with_default_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension("jpg")
    }
}

/// Write `frame` to `path`; the format follows the extension.
pub fn save_frame(frame: &RgbImage, path: &Path) -> Result<()> {
    frame.save(path)?;
    Ok(())
}

/// Full save flow. Returns where the snapshot went, or None if nothing was written.
/// Failures are logged rather than returned so the live view keeps running.
pub fn capture_and_save(source: &mut dyn FrameSource, prompt: &mut dyn SavePrompt) -> Option<PathBuf> {
    let frame = match source.grab() {
        Ok(frame) => frame,
        Err(e) => {
            debug!("Snapshot skipped, no frame: {e}");
            return None;
        }
    };

    let Some(path) = prompt.ask() else {
        info!("Snapshot cancelled");
        return None;
    };

    match save_frame(&frame, &path) {
        Ok(()) => {
            info!("Image saved as {}", path.display());
            Some(path)
        }
        Err(e) => {
            error!("Could not save {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::Rgb;

    struct OneFrame(Option<RgbImage>);

    impl FrameSource for OneFrame {
        fn grab(&mut self) -> std::result::Result<RgbImage, Error> {
            self.0.take().ok_or_else(|| Error::CameraFrame("no frame".into()))
        }
    }

    struct FixedPrompt(Option<PathBuf>);

    impl SavePrompt for FixedPrompt {
        fn ask(&mut self) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    #[test]
    fn default_extension_is_added_once() {
        assert_eq!(with_default_extension(PathBuf::from("shot")), PathBuf::from("shot.jpg"));
        assert_eq!(with_default_extension(PathBuf::from("shot.png")), PathBuf::from("shot.png"));
    }

    #[test]
    fn saves_jpeg_at_full_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.jpg");
        let mut source = OneFrame(Some(RgbImage::from_pixel(64, 48, Rgb([10, 200, 30]))));
        let mut prompt = FixedPrompt(Some(path.clone()));

        assert_eq!(capture_and_save(&mut source, &mut prompt), Some(path.clone()));
        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (64, 48));
    }

    #[test]
    fn cancelled_dialog_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = OneFrame(Some(RgbImage::new(4, 4)));
        let mut prompt = FixedPrompt(None);

        assert_eq!(capture_and_save(&mut source, &mut prompt), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_capture_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.jpg");
        let mut source = OneFrame(None);
        let mut prompt = FixedPrompt(Some(path.clone()));

        assert_eq!(capture_and_save(&mut source, &mut prompt), None);
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_is_absorbed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("snap.jpg");
        let mut source = OneFrame(Some(RgbImage::new(4, 4)));
        let mut prompt = FixedPrompt(Some(path));

        assert_eq!(capture_and_save(&mut source, &mut prompt), None);
    }
}
