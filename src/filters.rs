//! The filter catalogue: which overlays exist, where their PNGs live, and the
//! images loaded for them at startup.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Side of a toolbar thumbnail (pixels).
pub const THUMB_SIZE: u32 = 50;
/// Color used for a thumbnail whose asset failed to load.
pub const PLACEHOLDER_GRAY: Rgb<u8> = Rgb([128, 128, 128]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    None,
    Glasses,
    Crown,
    Heart,
    Spiderman,
}

impl Filter {
    /// Toolbar order.
    pub const ALL: [Filter; 5] =
        [Filter::None, Filter::Glasses, Filter::Crown, Filter::Heart, Filter::Spiderman];

    pub fn name(self) -> &'static str {
        match self {
            Filter::None => "None",
            Filter::Glasses => "Glasses",
            Filter::Crown => "Crown",
            Filter::Heart => "Heart",
            Filter::Spiderman => "Spiderman",
        }
    }

    /// Asset file name, e.g. `glasses.png`.
    pub fn file_name(self) -> String {
        format!("{}.png", self.name().to_lowercase())
    }

    pub fn asset_path(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }

    /// Position in [`Filter::ALL`]; also the number key that selects it.
    pub fn index(self) -> usize {
        Filter::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn from_index(idx: usize) -> Option<Filter> {
        Filter::ALL.get(idx).copied()
    }
}

/// One filter's loaded assets.
pub struct FilterEntry {
    pub filter: Filter,
    pub overlay: Option<RgbaImage>,
    pub thumbnail: RgbImage,
}

/// Overlays for every filter, loaded once and shared read-only afterwards.
pub struct FilterBank {
    entries: Vec<FilterEntry>,
}

impl FilterBank {
    /// Load `<dir>/<name>.png` for every filter. Unreadable files become "no image".
    pub fn load(dir: &Path) -> Self {
        let entries = Filter::ALL
            .iter()
            .map(|&filter| {
                let path = filter.asset_path(dir);
                let overlay = match image::open(&path) {
                    Ok(img) => {
                        info!("Loaded {} overlay from {}", filter.name(), path.display());
                        Some(img.to_rgba8())
                    }
                    Err(e) => {
                        warn!("No overlay for {} ({}): {e}", filter.name(), path.display());
                        None
                    }
                };
                FilterEntry::new(filter, overlay)
            })
            .collect();
        Self { entries }
    }

    /// Build a bank from images already in memory, in [`Filter::ALL`] order.
    pub fn from_overlays(overlays: [Option<RgbaImage>; 5]) -> Self {
        let entries = Filter::ALL
            .iter()
            .zip(overlays)
            .map(|(&filter, overlay)| FilterEntry::new(filter, overlay))
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn overlay(&self, filter: Filter) -> Option<&RgbaImage> {
        self.entries.get(filter.index()).and_then(|e| e.overlay.as_ref())
    }

    pub fn overlay_size(&self, filter: Filter) -> Option<(u32, u32)> {
        self.overlay(filter).map(|o| o.dimensions())
    }
}

impl FilterEntry {
    fn new(filter: Filter, overlay: Option<RgbaImage>) -> Self {
        let thumbnail = thumbnail(overlay.as_ref());
        Self { filter, overlay, thumbnail }
    }
}

/// 50x50 button face: the overlay flattened on gray, or plain gray without one.
pub fn thumbnail(overlay: Option<&RgbaImage>) -> RgbImage {
    let Some(overlay) = overlay else {
        return RgbImage::from_pixel(THUMB_SIZE, THUMB_SIZE, PLACEHOLDER_GRAY);
    };
    let small = imageops::resize(overlay, THUMB_SIZE, THUMB_SIZE, FilterType::Triangle);
    RgbImage::from_fn(THUMB_SIZE, THUMB_SIZE, |x, y| {
        let p = small.get_pixel(x, y);
        let a = p[3] as u32;
        let mix = |c: u8, bg: u8| ((c as u32 * a + bg as u32 * (255 - a)) / 255) as u8;
        Rgb([
            mix(p[0], PLACEHOLDER_GRAY[0]),
            mix(p[1], PLACEHOLDER_GRAY[1]),
            mix(p[2], PLACEHOLDER_GRAY[2]),
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn asset_paths_follow_lowercase_names() {
        let dir = Path::new("filters");
        assert_eq!(Filter::Glasses.asset_path(dir), PathBuf::from("filters/glasses.png"));
        assert_eq!(Filter::Spiderman.file_name(), "spiderman.png");
        assert_eq!(Filter::None.file_name(), "none.png");
    }

    #[test]
    fn index_round_trips_through_toolbar_order() {
        for (i, f) in Filter::ALL.iter().enumerate() {
            assert_eq!(f.index(), i);
            assert_eq!(Filter::from_index(i), Some(*f));
        }
        assert_eq!(Filter::from_index(5), None);
    }

    #[test]
    fn missing_asset_gets_gray_placeholder() {
        let thumb = thumbnail(None);
        assert_eq!(thumb.dimensions(), (THUMB_SIZE, THUMB_SIZE));
        assert!(thumb.pixels().all(|p| *p == PLACEHOLDER_GRAY));
    }

    #[test]
    fn opaque_overlay_thumbnail_shows_overlay_color() {
        let ov = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let thumb = thumbnail(Some(&ov));
        assert_eq!(*thumb.get_pixel(25, 25), Rgb([255, 0, 0]));
    }

    #[test]
    fn load_from_empty_dir_yields_no_overlays() {
        let dir = tempfile::tempdir().unwrap();
        let bank = FilterBank::load(dir.path());
        assert_eq!(bank.entries().len(), Filter::ALL.len());
        for f in Filter::ALL {
            assert!(bank.overlay(f).is_none());
        }
    }

    #[test]
    fn load_reads_png_with_alpha() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(30, 10, Rgba([1, 2, 3, 4]))
            .save(dir.path().join("glasses.png"))
            .unwrap();

        let bank = FilterBank::load(dir.path());
        assert_eq!(bank.overlay_size(Filter::Glasses), Some((30, 10)));
        assert_eq!(bank.overlay(Filter::Glasses).unwrap().get_pixel(0, 0)[3], 4);
        assert!(bank.overlay(Filter::Crown).is_none());
    }
}
