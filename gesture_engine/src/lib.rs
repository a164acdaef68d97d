//! # gesture_engine
//!
//! Turns one hand's 21 landmark positions per video frame into two audio
//! control signals:
//!
//! * **Volume**: the thumb-tip ↔ index-tip ("pinch") distance is mapped
//!   linearly onto the sink's volume range and low-pass filtered.
//! * **Mute**: the mean fingertip ↔ wrist distance drives a hysteresis
//!   state machine: a closed fist mutes, an open hand unmutes.
//!
//! The engine holds no globals and does no I/O.  Landmarks come in as a
//! [`LandmarkFrame`] (or `None` when no hand is visible), and the results go
//! out through the [`AudioSink`] trait.
//!
//! ## Quick start
//!
//! ```rust
//! use gesture_engine::{EngineConfig, GestureEngine, LandmarkFrame, VolumeRange};
//!
//! let mut engine = GestureEngine::new(
//!     EngineConfig::default(),
//!     VolumeRange::new(-65.25, 0.0),
//! ).unwrap();
//!
//! // Thumb tip at (100,100), index tip at (100,120): 20 px pinch.
//! let frame = LandmarkFrame::from_triples([(4, 100, 100), (8, 100, 120)]);
//! let update = engine.process(Some(&frame));
//!
//! let reading = update.volume.unwrap();
//! assert_eq!(reading.percent, 0);
//! assert_eq!(reading.bar, 400);
//! ```
//!
//! ## Landmark layout
//!
//! | id | point | id | point |
//! |---|---|---|---|
//! | 0 | wrist | 12 | middle tip |
//! | 4 | thumb tip | 16 | ring tip |
//! | 8 | index tip | 20 | pinky tip |

pub mod config;
pub mod engine;
pub mod geometry;
pub mod landmark;
pub mod mute;
pub mod sink;
pub mod volume;

pub use config::{ConfigError, EngineConfig};
pub use engine::{FrameUpdate, GestureEngine};
pub use landmark::{Landmark, LandmarkFrame, LandmarkId, Point, FINGERTIPS};
pub use mute::{MuteSignal, MuteState, MuteStateMachine};
pub use sink::{AudioSink, VolumeRange};
pub use volume::{VolumeMapper, VolumeReading};
