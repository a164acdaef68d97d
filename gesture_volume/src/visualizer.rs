//! Software-rendered visualizer using `minifb`.
//!
//! Layout (640×480, the webcam frame size the thresholds are tuned for):
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                                   FPS: 60    │
//! │              MUTED / UNMUTED                 │
//! │  ┌──┐                                        │
//! │  │  │          · ·  ·                        │
//! │  │██│        ●───◉───●   (thumb ↔ index)     │
//! │  │██│             ·                          │
//! │  └──┘                                        │
//! │  42 %                                        │
//! └──────────────────────────────────────────────┘
//! ```

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::sync::mpsc::Sender;

use crate::error::AppError;
use crate::overlay::Overlay;
use crate::sim_hand::{FRAME_H, FRAME_W};
use crate::source::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:    usize = FRAME_W as usize;
pub const WIN_H:    usize = FRAME_H as usize;
const BAR_X:        usize = 50;
const BAR_W:        usize = 35;
const BAR_TOP:      usize = 150;
const BAR_BOTTOM:   usize = 400;
const BG_COLOR:     u32   = 0xFF1A1A2E;
const GREEN:        u32   = 0xFF00FF00;
const BLUE:         u32   = 0xFF0000FF;
const MAGENTA:      u32   = 0xFFFF00FF;
const LEGEND_COLOR: u32   = 0xFF888888;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    sim_tx: Option<Sender<SimInput>>,
}

impl Visualizer {
    /// `sim_tx` is `None` when a hardware source feeds the engine; the
    /// window then only renders (and still quits on `Q`).
    pub fn new(sim_tx: Option<Sender<SimInput>>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Gesture Volume Control",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard inputs, translate to SimInput events and close the
    /// frame with a `Tick`.  Returns false when the user quits.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held     = |k: Key| self.window.is_key_down(k);

        let mut keys = Vec::new();
        if one_shot(Key::Q) {
            keys.push(SimKey::Quit);
        }
        if one_shot(Key::F) { keys.push(SimKey::Fist); }
        if one_shot(Key::O) { keys.push(SimKey::Open); }
        if one_shot(Key::H) { keys.push(SimKey::ToggleHand); }
        if held(Key::Up)    { keys.push(SimKey::PinchWider); }
        if held(Key::Down)  { keys.push(SimKey::PinchNarrower); }
        if held(Key::Right) { keys.push(SimKey::Extend); }
        if held(Key::Left)  { keys.push(SimKey::Curl); }

        let quit = keys.contains(&SimKey::Quit);
        if let Some(tx) = &self.sim_tx {
            for key in keys {
                let _ = tx.send(SimInput::KeyDown(key));
            }
            if !quit {
                let _ = tx.send(SimInput::Tick);
            }
        }
        !quit
    }

    /// Render one frame.
    pub fn render(&mut self, overlay: &Overlay, status: &str) {
        self.buf.fill(BG_COLOR);

        // ── Hand sketch ───────────────────────────────────────────────────
        if let Some(hand) = &overlay.hand {
            for p in &hand.points {
                self.fill_circle(p.x as usize, p.y as usize, 4, 0xFFDDDDDD);
            }
            let (t, i, m) = (hand.thumb, hand.index, hand.mid);
            self.draw_line(t.x as isize, t.y as isize, i.x as isize, i.y as isize, 3, BLUE);
            self.fill_circle(t.x as usize, t.y as usize, 10, BLUE);
            self.fill_circle(i.x as usize, i.y as usize, 10, BLUE);
            self.fill_circle(m.x as usize, m.y as usize, 8, MAGENTA);
            if hand.clicked {
                self.fill_circle(m.x as usize, m.y as usize, 12, GREEN);
            }
        }

        // ── Mute label ────────────────────────────────────────────────────
        if let Some((label, color)) = overlay.mute_label() {
            self.draw_text(label, 200, 100, 6, color);
        }

        // ── Volume bar ────────────────────────────────────────────────────
        self.draw_border(BAR_X, BAR_TOP, BAR_W, BAR_BOTTOM - BAR_TOP, 3, GREEN);
        let top = (overlay.bar as usize).clamp(BAR_TOP, BAR_BOTTOM);
        self.fill_rect(BAR_X, top, BAR_W, BAR_BOTTOM - top, GREEN);
        self.draw_text(&overlay.percent_text(), 40, 420, 3, GREEN);

        // ── FPS ───────────────────────────────────────────────────────────
        let fps = format!("FPS: {}", overlay.fps.fps() as u32);
        self.draw_text(&fps, 450, 40, 3, GREEN);

        // ── Status + legend ───────────────────────────────────────────────
        self.draw_text(status, 10, WIN_H - 30, 2, 0xFFEEEEEE);
        self.draw_text(
            "UP/DOWN=pinch  LEFT/RIGHT=curl  F=fist  O=open  H=hide  Q=quit",
            10, WIN_H - 12, 1, LEGEND_COLOR,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, t: usize, color: u32) {
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, (y + h).saturating_sub(t), w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect((x + w).saturating_sub(t), y, t, h, color);
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    fn fill_circle(&mut self, cx: usize, cy: usize, r: usize, color: u32) {
        let r2 = (r * r) as isize;
        for dy in -(r as isize)..=r as isize {
            for dx in -(r as isize)..=r as isize {
                if dx*dx + dy*dy > r2 { continue; }
                let (sx, sy) = (cx as isize + dx, cy as isize + dy);
                if sx >= 0 && sy >= 0 {
                    self.set_pixel(sx as usize, sy as usize, color);
                }
            }
        }
    }

    /// Bresenham line, `thick` pixels wide.
    fn draw_line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, thick: usize, color: u32) {
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = (if x0 < x1 { 1 } else { -1 }, if y0 < y1 { 1 } else { -1 });
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        let half = (thick / 2) as isize;
        loop {
            for oy in -half..=half {
                for ox in -half..=half {
                    if x + ox >= 0 && y + oy >= 0 {
                        self.set_pixel((x + ox) as usize, (y + oy) as usize, color);
                    }
                }
            }
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    /// Draw `text` in the 3×5 font, each glyph pixel a `scale`×`scale`
    /// block.  Lower case is drawn as upper case.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            let bits = glyph(ch);
            for row in 0..GLYPH_ROWS {
                for col in 0..GLYPH_COLS {
                    if glyph_pixel(bits, row, col) {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += (GLYPH_COLS + 1) * scale;
            if cx + (GLYPH_COLS + 1) * scale > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────
//
// Shapes after the usual public-domain 3×5 pixel fonts, limited to the
// characters this window draws.  Each glyph packs five 3-bit rows into a
// `u16`, top row in the high bits.

const GLYPH_ROWS: usize = 5;
const GLYPH_COLS: usize = 3;
const BLANK:      u16   = 0;
const UNKNOWN:    u16   = 0b000_000_010_000_000;

/// Sorted by character for binary search.
const FONT: &[(char, u16)] = &[
    ('%', 0b101_001_010_100_101),
    ('-', 0b000_000_111_000_000),
    ('.', 0b000_000_000_000_010),
    ('/', 0b001_001_010_100_100),
    ('0', 0b111_101_101_101_111),
    ('1', 0b010_110_010_010_111),
    ('2', 0b111_001_111_100_111),
    ('3', 0b111_001_011_001_111),
    ('4', 0b101_101_111_001_001),
    ('5', 0b111_100_111_001_111),
    ('6', 0b111_100_111_101_111),
    ('7', 0b111_001_010_010_010),
    ('8', 0b111_101_111_101_111),
    ('9', 0b111_101_111_001_111),
    (':', 0b000_010_000_010_000),
    ('=', 0b000_111_000_111_000),
    ('A', 0b010_101_111_101_101),
    ('C', 0b011_100_100_100_011),
    ('D', 0b110_101_101_101_110),
    ('E', 0b111_100_110_100_111),
    ('F', 0b111_100_110_100_100),
    ('G', 0b011_100_101_101_011),
    ('H', 0b101_101_111_101_101),
    ('I', 0b111_010_010_010_111),
    ('L', 0b100_100_100_100_111),
    ('M', 0b101_111_111_101_101),
    ('N', 0b110_101_101_101_101),
    ('O', 0b010_101_101_101_010),
    ('P', 0b110_101_110_100_100),
    ('Q', 0b010_101_101_110_011),
    ('R', 0b110_101_110_101_101),
    ('S', 0b011_100_010_001_110),
    ('T', 0b111_010_010_010_010),
    ('U', 0b101_101_101_101_111),
    ('V', 0b101_101_101_101_010),
    ('W', 0b101_101_111_111_101),
    ('X', 0b101_101_010_101_101),
    ('Y', 0b101_101_010_010_010),
];

fn glyph(c: char) -> u16 {
    if c == ' ' { return BLANK; }
    let c = c.to_ascii_uppercase();
    FONT.binary_search_by_key(&c, |&(k, _)| k)
        .map(|i| FONT[i].1)
        .unwrap_or(UNKNOWN)
}

fn glyph_pixel(bits: u16, row: usize, col: usize) -> bool {
    let shift = (GLYPH_ROWS - 1 - row) * GLYPH_COLS + (GLYPH_COLS - 1 - col);
    bits & (1 << shift) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_is_sorted() {
        assert!(FONT.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn every_drawn_string_has_glyphs() {
        let drawn = [
            "MUTED", "UNMUTED", "FPS: 0123456789", "100 %",
            "PINCH 123PX  LEVEL -12.5", "NO HAND", "Show your hand",
            "UP/DOWN=pinch  LEFT/RIGHT=curl  F=fist  O=open  H=hide  Q=quit",
        ];
        for text in drawn {
            for c in text.chars().filter(|&c| c != ' ') {
                assert_ne!(glyph(c), UNKNOWN, "no glyph for {:?} in {:?}", c, text);
            }
        }
    }

    #[test]
    fn glyph_rows_read_top_down() {
        // 'L': left column set on every row, full bottom row.
        let l = glyph('l');
        for row in 0..GLYPH_ROWS {
            assert!(glyph_pixel(l, row, 0));
        }
        assert!(glyph_pixel(l, 4, 2));
        assert!(!glyph_pixel(l, 0, 2));
    }
}
