//! Renderer-facing state.
//!
//! The overlay remembers what to draw between frames: the bar and the
//! percentage keep their last values while no hand is visible, the hand
//! sketch disappears.

use std::time::Instant;

use gesture_engine::{FrameUpdate, LandmarkFrame, LandmarkId, MuteState, Point};

/// Pinch lengths below this draw the midpoint as "clicked".
pub const CLICK_LENGTH: f32 = 25.0;

pub const MUTED_COLOR:   u32 = 0xFFFF0000;
pub const UNMUTED_COLOR: u32 = 0xFF00FF00;

// ════════════════════════════════════════════════════════════════════════════
// HandSketch — what gets drawn over the hand
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct HandSketch {
    pub points:  Vec<Point>,
    pub thumb:   Point,
    pub index:   Point,
    /// Midpoint of the thumb–index line.
    pub mid:     Point,
    pub clicked: bool,
}

impl HandSketch {
    fn from_frame(frame: &LandmarkFrame, length: f32) -> Option<Self> {
        let thumb = frame.get(LandmarkId::THUMB_TIP)?;
        let index = frame.get(LandmarkId::INDEX_TIP)?;
        Some(HandSketch {
            points: frame.iter().map(|l| l.pos).collect(),
            thumb,
            index,
            mid: Point::new((thumb.x + index.x) / 2, (thumb.y + index.y) / 2),
            clicked: length < CLICK_LENGTH,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FpsCounter
// ════════════════════════════════════════════════════════════════════════════

/// Instantaneous frames-per-second from the gap between two ticks.
#[derive(Debug, Default)]
pub struct FpsCounter {
    last: Option<Instant>,
    fps:  f32,
}

impl FpsCounter {
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.fps = match self.last {
            Some(prev) => {
                let dt = now.duration_since(prev).as_secs_f32();
                if dt > 0.0 { 1.0 / dt } else { self.fps }
            }
            None => 0.0,
        };
        self.last = Some(now);
        self.fps
    }

    pub fn fps(&self) -> f32 { self.fps }
}

// ════════════════════════════════════════════════════════════════════════════
// Overlay
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct Overlay {
    /// Pixel row of the filled bar's top edge (150 = full, 400 = empty).
    pub bar:     u32,
    pub percent: u8,
    pub mute:    MuteState,
    pub hand:    Option<HandSketch>,
    pub fps:     FpsCounter,
}

impl Default for Overlay {
    fn default() -> Self {
        Overlay {
            bar:     400,
            percent: 0,
            mute:    MuteState::Unknown,
            hand:    None,
            fps:     FpsCounter::default(),
        }
    }
}

impl Overlay {
    /// Fold one processed frame into the overlay.
    pub fn update(&mut self, frame: Option<&LandmarkFrame>, update: &FrameUpdate) {
        self.mute = update.mute_state;
        self.hand = match (frame, update.volume) {
            (Some(f), Some(reading)) => {
                self.bar     = reading.bar;
                self.percent = reading.percent;
                HandSketch::from_frame(f, reading.length)
            }
            _ => None,
        };
    }

    /// Label text and colour; nothing while the mute state is unknown.
    pub fn mute_label(&self) -> Option<(&'static str, u32)> {
        let color = match self.mute {
            MuteState::Muted => MUTED_COLOR,
            _                => UNMUTED_COLOR,
        };
        self.mute.label().map(|l| (l, color))
    }

    pub fn percent_text(&self) -> String {
        format!("{} %", self.percent)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
