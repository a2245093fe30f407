//! # face-filter
//!
//! Live camera face filters: glasses, a crown, a heart or a full-face mask drawn
//! over each detected face, with a button to save a raw snapshot.
//!
//! Per frame:
//! 1. grab an RGB frame from the camera
//! 2. detect faces and their landmarks
//! 3. map landmarks to a placement rect for the selected filter
//! 4. composite the overlay (binary alpha test, no blending)
//! 5. pack to 0x00RRGGBB and present with the toolbar
//!
//! The detector and camera sit behind traits ([`LandmarkDetector`],
//! [`FrameSource`]) so the cycle can run against fixtures.

pub mod camera;
pub mod compositor;
pub mod config;
pub mod detector;
pub mod draw;
mod error;
pub mod filters;
pub mod landmarks;
pub mod placement;
pub mod session;
pub mod snapshot;
mod types;

pub use camera::{CameraCapture, FrameSource};
pub use compositor::composite;
pub use error::{Error, Result};
pub use filters::{Filter, FilterBank};
pub use landmarks::{LandmarkDetector, LandmarkLayout, LandmarkSet, Point};
pub use placement::placement;
pub use session::{Action, Session, UiEvent};
pub use types::{FrameBuffer, Rect, pack_rgb};
