// Window + software drawing utilities.
// 1) A window that shows the filtered camera image above a toolbar.
// 2) A toolbar: one thumbnail button per filter plus "CAPTURE & SAVE".
// 3) A tiny 5x7 bitmap font for the button label and the HUD line.

use crate::error::Error;
use crate::filters::{Filter, FilterBank, THUMB_SIZE};
use crate::session::UiEvent;
use crate::types::{FrameBuffer, Rect};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const TOOLBAR_HEIGHT: usize = 70;
const BUTTON_MARGIN: i32 = 10;
const BUTTON_STRIDE: i32 = THUMB_SIZE as i32 + BUTTON_MARGIN;
const CAPTURE_LABEL: &str = "CAPTURE & SAVE";

const TOOLBAR_BG: u32 = 0x00_20_20_20;
const ACTIVE_BORDER: u32 = 0x00_FF_CC_33;
const CAPTURE_BG: u32 = 0x00_3A_3A_3A;
const TEXT_COLOR: u32 = 0x00_FF_FF_FF;

/// Button geometry below a video area of the given size.
pub struct Toolbar {
    top: i32,
    width: usize,
    filter_buttons: Vec<(Filter, Rect)>,
    capture_button: Rect,
}

impl Toolbar {
    pub fn new(video_width: usize, video_height: usize) -> Self {
        let top = video_height as i32;
        let size = THUMB_SIZE as i32;
        let button_y = top + (TOOLBAR_HEIGHT as i32 - size) / 2;

        let filter_buttons: Vec<(Filter, Rect)> = Filter::ALL
            .iter()
            .enumerate()
            .map(|(i, &f)| (f, Rect::new(BUTTON_MARGIN + i as i32 * BUTTON_STRIDE, button_y, size, size)))
            .collect();

        let capture_x = BUTTON_MARGIN + Filter::ALL.len() as i32 * BUTTON_STRIDE;
        let capture_w = text_width(CAPTURE_LABEL) + 2 * BUTTON_MARGIN;
        let capture_button = Rect::new(capture_x, button_y, capture_w, size);

        let needed = (capture_button.x + capture_button.width + BUTTON_MARGIN) as usize;
        Self { top, width: video_width.max(needed), filter_buttons, capture_button }
    }

    /// Full window width (video or toolbar, whichever is wider).
    pub fn window_width(&self) -> usize {
        self.width
    }

    pub fn window_height(&self) -> usize {
        self.top as usize + TOOLBAR_HEIGHT
    }

    pub fn filter_buttons(&self) -> &[(Filter, Rect)] {
        &self.filter_buttons
    }

    pub fn capture_button(&self) -> Rect {
        self.capture_button
    }

    /// Which button, if any, sits under window pixel (x, y).
    pub fn hit(&self, x: i32, y: i32) -> Option<UiEvent> {
        if self.capture_button.contains(x, y) {
            return Some(UiEvent::CaptureRequested);
        }
        self.filter_buttons
            .iter()
            .find(|(_, r)| r.contains(x, y))
            .map(|(f, _)| UiEvent::SelectFilter(*f))
    }

    /// Paint the toolbar strip: thumbnails, active highlight, capture button.
    /// Visual: a dark band under the video with five 50x50 buttons and a text button.
    pub fn render(&self, fb: &mut FrameBuffer, bank: &FilterBank, active: Filter) {
        let strip = Rect::new(0, self.top, fb.width as i32, TOOLBAR_HEIGHT as i32);
        fill_rect(fb, strip, TOOLBAR_BG);

        // Thumbnails; the active one gets a yellow ring
        for ((filter, rect), entry) in self.filter_buttons.iter().zip(bank.entries()) {
            fb.blit_rgb(&entry.thumbnail, rect.x as usize, rect.y as usize);
            if *filter == active {
                let ring = Rect::new(rect.x - 3, rect.y - 3, rect.width + 6, rect.height + 6);
                draw_rect_outline(fb, ring, 2, ACTIVE_BORDER);
            }
        }

        // Capture button: filled box, thin border, centered label
        let cb = self.capture_button;
        fill_rect(fb, cb, CAPTURE_BG);
        draw_rect_outline(fb, cb, 1, TEXT_COLOR);
        let text_y = cb.y + (cb.height - 7) / 2;
        draw_text_5x7(fb, cb.x + BUTTON_MARGIN, text_y, CAPTURE_LABEL, TEXT_COLOR);
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
    mouse_was_down: bool,
}

impl Drawer {
    /// Create a window of the given size.
    /// Visual: an empty window appears, tall enough for video plus toolbar.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window, mouse_was_down: false })
    }

    /// Push the pixels for this frame to the screen (also pumps window events).
    /// Visual: the filtered camera image and the toolbar update together.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Pump window events without new pixels (used when a capture fails).
    /// Visual: the last frame stays up and the window keeps responding.
    pub fn pump(&mut self) {
        self.window.update();
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Translate this tick's input into UI events.
    /// Keys: 0-4 select a filter, S saves, ESC quits. Clicks go through the toolbar.
    pub fn poll_events(&mut self, toolbar: &Toolbar) -> Vec<UiEvent> {
        let mut events = Vec::new();

        // 1) ESC: leave the loop
        if self.window.is_key_down(Key::Escape) {
            events.push(UiEvent::Quit);
        }

        // 2) 0-4: same as clicking the matching filter button
        const NUMBER_KEYS: [Key; 5] = [Key::Key0, Key::Key1, Key::Key2, Key::Key3, Key::Key4];
        for (i, key) in NUMBER_KEYS.iter().enumerate() {
            if self.window.is_key_pressed(*key, KeyRepeat::No) {
                if let Some(f) = Filter::from_index(i) {
                    events.push(UiEvent::SelectFilter(f));
                }
            }
        }

        // 3) S: same as the capture button
        if self.window.is_key_pressed(Key::S, KeyRepeat::No) {
            events.push(UiEvent::CaptureRequested);
        }

        // 4) A click is the press edge of the left button; holding does not repeat.
        let down = self.window.get_mouse_down(MouseButton::Left);
        if down && !self.mouse_was_down {
            if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Discard) {
                if let Some(ev) = toolbar.hit(mx as i32, my as i32) {
                    events.push(ev);
                }
            }
        }
        self.mouse_was_down = down;

        events
    }
}

/* ---------- Software drawing: pixels, rects, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

pub fn fill_rect(fb: &mut FrameBuffer, r: Rect, color: u32) {
    for y in r.y..r.y + r.height {
        for x in r.x..r.x + r.width {
            put_pixel(fb, x, y, color);
        }
    }
}

/// Border of `thickness` pixels drawn just inside `r`.
pub fn draw_rect_outline(fb: &mut FrameBuffer, r: Rect, thickness: i32, color: u32) {
    for t in 0..thickness {
        for x in r.x..r.x + r.width {
            put_pixel(fb, x, r.y + t, color);
            put_pixel(fb, x, r.y + r.height - 1 - t, color);
        }
        for y in r.y..r.y + r.height {
            put_pixel(fb, r.x + t, y, color);
            put_pixel(fb, r.x + r.width - 1 - t, y, color);
        }
    }
}

/* ---------- 5x7 bitmap font (uppercase subset for labels and HUD) ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters used by filter names, the capture label and the HUD
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),

        // Punctuation: space, vertical bar, colon, dot, ampersand
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '&' => g!(0b01100,0b10010,0b10100,0b01000,0b10101,0b10010,0b01101),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow pass: offset by (1,1) in black
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32 + 1, y + ry as i32 + 1, 0x00000000);
                }
            }
        }

        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Width in pixels of `text` drawn with [`draw_text_5x7`].
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * 6
}

/// Draw a text string using 5x7 glyphs (5 pixels + 1 spacing per char).
/// Lowercase input is drawn as uppercase.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch.to_ascii_uppercase(), color);
        x += 6;
    }
}
