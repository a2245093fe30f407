// The app's only mutable UI state, plus the detect -> place -> composite step
// that runs once per captured frame.

use crate::camera::FrameSource;
use crate::compositor::composite;
use crate::filters::{Filter, FilterBank};
use crate::landmarks::LandmarkDetector;
use crate::placement::placement;
use image::RgbImage;
use log::{debug, info};

/// Discrete things the UI can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    SelectFilter(Filter),
    CaptureRequested,
    Quit,
}

/// What the main loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    SaveSnapshot,
    Exit,
}

#[derive(Debug, Default)]
pub struct Session {
    filter: Filter,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn handle(&mut self, event: UiEvent) -> Action {
        match event {
            UiEvent::SelectFilter(filter) => {
                if filter != self.filter {
                    info!("Filter: {} -> {}", self.filter.name(), filter.name());
                }
                self.filter = filter;
                Action::None
            }
            UiEvent::CaptureRequested => Action::SaveSnapshot,
            UiEvent::Quit => Action::Exit,
        }
    }

    /// One processing cycle: grab a fresh frame, then decorate it.
    /// A failed grab skips the cycle (None) without touching the detector.
    pub fn cycle(
        &self,
        source: &mut dyn FrameSource,
        detector: &mut dyn LandmarkDetector,
        bank: &FilterBank,
    ) -> Option<RgbImage> {
        let mut frame = match source.grab() {
            Ok(frame) => frame,
            Err(e) => {
                debug!("Cycle skipped: {e}");
                return None;
            }
        };
        self.process(&mut frame, detector, bank);
        Some(frame)
    }

    /// Detect faces in `frame` and draw the selected overlay on each one, in place.
    /// Returns how many overlays were actually drawn; a missing asset or an
    /// empty rect draws nothing and is not counted.
    pub fn process(
        &self,
        frame: &mut RgbImage,
        detector: &mut dyn LandmarkDetector,
        bank: &FilterBank,
    ) -> usize {
        let faces = detector.detect(frame);
        if faces.is_empty() || self.filter == Filter::None {
            return 0;
        }

        let layout = detector.layout();
        let frame_size = frame.dimensions();
        let overlay = bank.overlay(self.filter);
        let overlay_size = bank.overlay_size(self.filter);

        let mut placed = 0;
        for landmarks in &faces {
            let Some(rect) = placement(self.filter, landmarks, &layout, frame_size, overlay_size)
            else {
                continue;
            };
            if overlay.is_none() || rect.is_empty() {
                continue;
            }
            composite(frame, overlay, rect);
            placed += 1;
        }
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_filter_updates_state() {
        let mut s = Session::new();
        assert_eq!(s.filter(), Filter::None);
        assert_eq!(s.handle(UiEvent::SelectFilter(Filter::Crown)), Action::None);
        assert_eq!(s.filter(), Filter::Crown);
        s.handle(UiEvent::SelectFilter(Filter::Crown));
        assert_eq!(s.filter(), Filter::Crown);
    }

    #[test]
    fn capture_and_quit_map_to_actions() {
        let mut s = Session::new();
        s.handle(UiEvent::SelectFilter(Filter::Heart));
        assert_eq!(s.handle(UiEvent::CaptureRequested), Action::SaveSnapshot);
        assert_eq!(s.handle(UiEvent::Quit), Action::Exit);
        assert_eq!(s.filter(), Filter::Heart);
    }
}
