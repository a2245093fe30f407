// Opens the camera and hands out RGB frames to the processing loop.

use crate::error::Error;
use image::RgbImage;

// Bring in nokhwa types for camera control.
use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// "Read one frame or report failure."
pub trait FrameSource {
    fn grab(&mut self) -> Result<RgbImage, Error>;
}

// A small wrapper around nokhwa::Camera so our main loop stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` at a target resolution (falls back if not exact).
    /// On success nothing is shown yet; we just hold an open stream.
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        // 1) Choose the device (0 = default webcam)
        let idx = CameraIndex::Index(index);

        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );

        // 2) Ask for RGB frames at the format closest to our request.
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        // 3) Create the camera (fails if no device exists).
        let mut cam = Camera::new(idx, req)
            .map_err(|e| Error::CameraInit(format!("Create camera: {e}")))?;

        // 4) Start streaming frames.
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // 5) The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();

        Ok(Self {
            cam,
            width: actual.width(),
            height: actual.height(),
        })
    }

    /// Report the actual resolution the camera is delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for CameraCapture {
    /// Blocks until the camera has a new frame, then decodes it to RGB.
    fn grab(&mut self) -> Result<RgbImage, Error> {
        // 1) Pull a frame (blocks until the device has one).
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        // 2) Decode whatever raw format the device sent into RGB.
        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        // 3) Rebuild from raw bytes so we don't depend on nokhwa's `image` version.
        let (w, h) = (decoded.width(), decoded.height());
        RgbImage::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| Error::CameraFrame(format!("Short RGB buffer for {w}x{h}")))
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        // Release the device; errors here have nowhere useful to go.
        let _ = self.cam.stop_stream();
    }
}
