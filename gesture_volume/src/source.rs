//! Landmark sources: LeapMotion hardware or the keyboard-driven
//! [`SimHand`].
//!
//! The public interface is [`SourceEvent`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether frames came from real hardware or
//! the simulator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use gesture_engine::{LandmarkFrame, Point};
use tracing::debug;

use crate::sim_hand::{SimHand, FRAME_H, FRAME_W};

// ════════════════════════════════════════════════════════════════════════════
// SourceEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum SourceEvent {
    /// One video frame: the first detected hand, or `None`.
    Frame(Option<LandmarkFrame>),

    /// The source has stopped (user quit or device lost).
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`SourceEvent`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<SourceEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Leap joints are in millimetres above the device.  They are projected
/// top-down (x, z) onto a 640×480 frame at [`LEAP_PX_PER_MM`] so the same
/// pixel thresholds apply as with a webcam detector.  Per finger, the base of the proximal bone and
/// the three following joints give landmarks `4f+1 … 4f+4`; the wrist is the
/// mean base of the four non-thumb metacarpals.
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource;

#[cfg(feature = "leap")]
impl LandmarkSource for LeapLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
        use leaprs::*;
        use tracing::error;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                error!(error = ?e, "failed to create LeapC connection");
                let _ = tx.send(SourceEvent::Quit);
                return;
            }
        };
        if let Err(e) = connection.open() {
            error!(error = ?e, "failed to open LeapMotion device");
            let _ = tx.send(SourceEvent::Quit);
            return;
        }

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let landmarks = frame.hands().next().map(|h| leap_hand_frame(&h));
                if tx.send(SourceEvent::Frame(landmarks)).is_err() { return; }
            }
        }
    }
}

// ── Leap → pixel projection ───────────────────────────────────────────────

/// Pixels per millimetre of the top-down projection, same on both axes.
///
/// Chosen so adult hands land on the default pixel thresholds:
///
/// | gesture | measured (mm) | projected (px) | threshold |
/// |---|---|---|---|
/// | thumb ↔ index, full spread | 150–165 | 240–264 | 250 = 100 % |
/// | thumb ↔ index, touching | < 12 | < 20 | 20 = 0 % |
/// | mean tip ↔ metacarpal base, fist | 30–35 | 48–56 | < 60 mutes |
/// | mean tip ↔ metacarpal base, open | 115–130 | 184–208 | > 150 unmutes |
///
/// The fist row is the tightest margin.  Hands that stay above 60 px
/// when closed want a higher `fist_threshold` in the config file, not a
/// different scale, since the pinch range depends on the scale too.
pub const LEAP_PX_PER_MM: f32 = 1.6;

/// Leap x (mm, right of the device) and z (mm, toward the user) mapped
/// onto the 640×480 frame with the device at its centre.
pub fn project_leap_mm(x_mm: f32, z_mm: f32) -> Point {
    let px = (FRAME_W as f32 / 2.0 + x_mm * LEAP_PX_PER_MM).round().clamp(0.0, (FRAME_W - 1) as f32);
    let py = (FRAME_H as f32 / 2.0 + z_mm * LEAP_PX_PER_MM).round().clamp(0.0, (FRAME_H - 1) as f32);
    Point::new(px as u32, py as u32)
}

#[cfg(feature = "leap")]
fn leap_hand_frame(hand: &leaprs::Hand) -> LandmarkFrame {
    use gesture_engine::LandmarkId;

    let mut out = LandmarkFrame::new();
    let digits: Vec<_> = hand.digits().collect();

    let bases: Vec<_> = digits.iter().skip(1)
        .map(|d| d.metacarpal().prev_joint())
        .collect();
    if !bases.is_empty() {
        let n  = bases.len() as f32;
        let wx = bases.iter().map(|j| j.x).sum::<f32>() / n;
        let wz = bases.iter().map(|j| j.z).sum::<f32>() / n;
        out.set(LandmarkId::WRIST, project_leap_mm(wx, wz));
    }

    for (f, digit) in digits.iter().enumerate().take(5) {
        let joints = [
            digit.proximal().prev_joint(),
            digit.intermediate().prev_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for (j, joint) in joints.iter().enumerate() {
            if let Some(id) = LandmarkId::new((f * 4 + j + 1) as u8) {
                out.set(id, project_leap_mm(joint.x, joint.z));
            }
        }
    }
    out
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source driven by [`SimInput`] events (from the visualizer's
/// window).
///
/// Key presses reshape the simulated hand; every [`SimInput::Tick`] emits
/// one frame of its landmarks.  This decouples the window event loop from
/// hand modelling.
pub struct SimLandmarkSource {
    pub rx:   Receiver<SimInput>,
    pub hand: SimHand,
}

impl SimLandmarkSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimLandmarkSource { rx, hand: SimHand::default() }
    }
}

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
    /// The window finished a frame; emit landmarks.
    Tick,
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    PinchWider,     // Up
    PinchNarrower,  // Down
    Extend,         // Right
    Curl,           // Left
    Fist,           // F
    Open,           // O
    ToggleHand,     // H
    Quit,           // Q
}

/// Pixels per held-key repeat.
const PINCH_STEP: f32 = 6.0;
const REACH_STEP: f32 = 5.0;

impl SimLandmarkSource {
    /// Apply one input; returns the event to forward, if any.
    pub fn handle(&mut self, input: SimInput) -> Option<SourceEvent> {
        match input {
            SimInput::Tick => return Some(SourceEvent::Frame(self.hand.frame())),
            SimInput::KeyDown(SimKey::Quit)          => return Some(SourceEvent::Quit),
            SimInput::KeyDown(SimKey::PinchWider)    => self.hand.adjust_pinch(PINCH_STEP),
            SimInput::KeyDown(SimKey::PinchNarrower) => self.hand.adjust_pinch(-PINCH_STEP),
            SimInput::KeyDown(SimKey::Extend)        => self.hand.adjust_reach(REACH_STEP),
            SimInput::KeyDown(SimKey::Curl)          => self.hand.adjust_reach(-REACH_STEP),
            SimInput::KeyDown(SimKey::Fist)          => self.hand.make_fist(),
            SimInput::KeyDown(SimKey::Open)          => self.hand.open(),
            SimInput::KeyDown(SimKey::ToggleHand)    => self.hand.toggle_visible(),
        }
        debug!(pinch = self.hand.pinch, reach = self.hand.reach, visible = self.hand.visible, "sim hand");
        None
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn run(mut self: Box<Self>, tx: Sender<SourceEvent>) {
        while let Ok(input) = self.rx.recv() {
            let Some(event) = self.handle(input) else { continue };
            let quit = event == SourceEvent::Quit;
            if tx.send(event).is_err() || quit { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
