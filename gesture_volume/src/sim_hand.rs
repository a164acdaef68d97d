//! A synthetic 21-point hand for running without a camera or tracker.
//!
//! The hand is drawn in the same pixel frame a 640×480 webcam would give,
//! wrist near the bottom centre, fingers fanned upward.  Two knobs drive
//! the gestures the engine cares about:
//!
//! * `reach`: fingertip distance from the wrist (fist ↔ open hand);
//! * `pinch`: thumb-tip ↔ index-tip distance.

use gesture_engine::{LandmarkFrame, LandmarkId, Point};

pub const FRAME_W: u32 = 640;
pub const FRAME_H: u32 = 480;

pub const FIST_REACH: f32 = 45.0;
pub const OPEN_REACH: f32 = 190.0;
const MIN_REACH:      f32 = 30.0;
const MAX_REACH:      f32 = 220.0;
const MAX_PINCH:      f32 = 300.0;
const PINCH_PER_REACH: f32 = 2.0;

/// Finger fan angles in degrees from straight up, thumb → pinky.
const FINGER_ANGLES: [f32; 5] = [-55.0, -20.0, 0.0, 18.0, 36.0];

/// Joint positions along a finger as fractions of its length
/// (base, middle, upper, tip).
const JOINT_FRACTIONS: [f32; 4] = [0.35, 0.6, 0.8, 1.0];

#[derive(Clone, Debug, PartialEq)]
pub struct SimHand {
    pub wrist:   (f32, f32),
    pub reach:   f32,
    pub pinch:   f32,
    pub visible: bool,
}

impl Default for SimHand {
    fn default() -> Self {
        SimHand {
            wrist:   (FRAME_W as f32 / 2.0, 400.0),
            reach:   OPEN_REACH,
            pinch:   100.0,
            visible: true,
        }
    }
}

impl SimHand {
    pub fn adjust_pinch(&mut self, delta: f32) {
        self.pinch = (self.pinch + delta).clamp(0.0, MAX_PINCH);
    }

    pub fn adjust_reach(&mut self, delta: f32) {
        self.reach = (self.reach + delta).clamp(MIN_REACH, MAX_REACH);
    }

    pub fn make_fist(&mut self) { self.reach = FIST_REACH; }
    pub fn open(&mut self)      { self.reach = OPEN_REACH; }
    pub fn toggle_visible(&mut self) { self.visible = !self.visible; }

    /// Thumb ↔ index separation actually drawn.  A curled hand cannot
    /// spread its tips further apart than twice its reach, so a fist keeps
    /// every fingertip close to the wrist whatever `pinch` was set to.
    pub fn effective_pinch(&self) -> f32 {
        self.pinch.min(PINCH_PER_REACH * self.reach)
    }

    /// Landmarks for the current pose, or `None` while hidden.
    pub fn frame(&self) -> Option<LandmarkFrame> {
        if !self.visible { return None; }

        let (wx, wy) = self.wrist;
        let mut frame = LandmarkFrame::new();
        frame.set(LandmarkId::WRIST, to_pixel(wx, wy));

        // Tips of the thumb and index straddle a shared point so their
        // separation is `effective_pinch` (before pixel rounding).
        let mid_angle = (FINGER_ANGLES[0] + FINGER_ANGLES[1]) / 2.0;
        let (mx, my) = along(self.wrist, mid_angle, self.reach * 0.9);
        let half = self.effective_pinch() / 2.0;
        let pinch_tips = [(mx - half, my), (mx + half, my)];

        for (finger, &angle) in FINGER_ANGLES.iter().enumerate() {
            let tip = match finger {
                0 | 1 => pinch_tips[finger],
                _     => along(self.wrist, angle, self.reach),
            };
            for (joint, &t) in JOINT_FRACTIONS.iter().enumerate() {
                let x = wx + (tip.0 - wx) * t;
                let y = wy + (tip.1 - wy) * t;
                let id = (finger * 4 + joint + 1) as u8;
                if let Some(id) = LandmarkId::new(id) {
                    frame.set(id, to_pixel(x, y));
                }
            }
        }
        Some(frame)
    }
}

fn along((x, y): (f32, f32), angle_deg: f32, len: f32) -> (f32, f32) {
    let a = angle_deg.to_radians();
    (x + a.sin() * len, y - a.cos() * len)
}

fn to_pixel(x: f32, y: f32) -> Point {
    let x = x.round().clamp(0.0, (FRAME_W - 1) as f32) as u32;
    let y = y.round().clamp(0.0, (FRAME_H - 1) as f32) as u32;
    Point::new(x, y)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
