//! # gesture_volume
//!
//! Hand-gesture volume controller built on [`gesture_engine`], with a
//! software-rendered overlay and a MIDI volume sink.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Measure | Action |
//! |---|---|---|
//! | Pinch (thumb ↔ index) | 20–250 px | Volume, smoothed; bar and % follow instantly |
//! | Fist | mean tip ↔ wrist < 60 px | Mute |
//! | Open hand | mean tip ↔ wrist > 150 px | Unmute |
//! | Anything in between | 60–150 px | Keep current mute state |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: the keyboard reshapes a synthetic hand.
//! * `leap` — **Hardware mode**: polls a real LeapMotion controller via LeapC.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `Up` / `Down` (hold) | Widen / narrow the pinch |
//! | `Right` / `Left` (hold) | Extend / curl the fingers |
//! | `F` | Snap to a fist |
//! | `O` | Snap to an open hand |
//! | `H` | Hide / show the hand |
//! | `Q` | Quit |

pub mod app;
pub mod error;
pub mod overlay;
pub mod sim_hand;
pub mod sink;
pub mod source;
pub mod visualizer;
