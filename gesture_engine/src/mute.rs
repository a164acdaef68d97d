//! Fist / open-hand mute detection with hysteresis.
//!
//! Two thresholds split the mean fingertip-to-wrist distance into three
//! bands:
//!
//! ```text
//!   0 ──── fist ──────────── open ──── ∞
//!   │ mute │   dead zone     │ unmute │
//! ```
//!
//! A hand hovering near either boundary cannot toggle the state, because
//! leaving `Muted` requires crossing the *other* threshold.

use std::fmt;

use tracing::debug;

use crate::config::{check_thresholds, ConfigError, EngineConfig};
use crate::geometry::{distance, mean};
use crate::landmark::{LandmarkFrame, LandmarkId, FINGERTIPS};

/// Current mute decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MuteState {
    /// No gesture seen yet; nothing has been sent to the sink.
    #[default]
    Unknown,
    Muted,
    Unmuted,
}

impl MuteState {
    /// On-screen label; nothing is shown while `Unknown`.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            MuteState::Unknown => None,
            MuteState::Muted   => Some("MUTED"),
            MuteState::Unmuted => Some("UNMUTED"),
        }
    }
}

impl fmt::Display for MuteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuteState::Unknown => write!(f, "Unknown"),
            MuteState::Muted   => write!(f, "Muted"),
            MuteState::Unmuted => write!(f, "Unmuted"),
        }
    }
}

/// What a frame asks the sink to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MuteSignal {
    #[default]
    Unchanged,
    SetMuted,
    SetUnmuted,
}

impl MuteSignal {
    /// The `set_mute` argument, if any.
    pub fn as_mute(&self) -> Option<bool> {
        match self {
            MuteSignal::Unchanged  => None,
            MuteSignal::SetMuted   => Some(true),
            MuteSignal::SetUnmuted => Some(false),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MuteStateMachine {
    state:          MuteState,
    fist_threshold: f32,
    open_threshold: f32,
}

impl MuteStateMachine {
    /// Fails unless `fist_threshold < open_threshold`; equal or crossed
    /// thresholds leave no dead zone.
    pub fn new(fist_threshold: f32, open_threshold: f32) -> Result<Self, ConfigError> {
        check_thresholds(fist_threshold, open_threshold)?;
        Ok(MuteStateMachine { state: MuteState::Unknown, fist_threshold, open_threshold })
    }

    pub fn from_config(cfg: &EngineConfig) -> Result<Self, ConfigError> {
        Self::new(cfg.fist_threshold, cfg.open_threshold)
    }

    pub fn state(&self) -> MuteState { self.state }

    /// Mean distance of the five fingertips from the wrist, or `None` if any
    /// of those six points is missing.
    pub fn spread(frame: &LandmarkFrame) -> Option<f32> {
        let wrist = frame.get(LandmarkId::WRIST)?;
        let tips = FINGERTIPS
            .iter()
            .map(|&id| frame.get(id))
            .collect::<Option<Vec<_>>>()?;
        mean(tips.into_iter().map(|tip| distance(tip, wrist)))
    }

    /// Process one frame.
    pub fn process(&mut self, frame: &LandmarkFrame) -> MuteSignal {
        match Self::spread(frame) {
            Some(avg) => self.update(avg),
            None      => MuteSignal::Unchanged,
        }
    }

    /// Feed a precomputed mean fingertip distance.
    pub fn update(&mut self, avg: f32) -> MuteSignal {
        let (next, signal) = if avg < self.fist_threshold && self.state != MuteState::Muted {
            (MuteState::Muted, MuteSignal::SetMuted)
        } else if avg > self.open_threshold && self.state != MuteState::Unmuted {
            (MuteState::Unmuted, MuteSignal::SetUnmuted)
        } else {
            return MuteSignal::Unchanged;
        };

        debug!(from = %self.state, to = %next, avg, "mute transition");
        self.state = next;
        signal
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> MuteStateMachine {
        MuteStateMachine::from_config(&EngineConfig::default()).unwrap()
    }

    fn muted() -> MuteStateMachine {
        let mut m = machine();
        m.update(10.0);
        assert_eq!(m.state(), MuteState::Muted);
        m
    }

    #[test]
    fn starts_unknown_without_label() {
        let m = machine();
        assert_eq!(m.state(), MuteState::Unknown);
        assert_eq!(m.state().label(), None);
    }

    #[test]
    fn fist_from_unknown_mutes() {
        let mut m = machine();
        assert_eq!(m.update(40.0), MuteSignal::SetMuted);
        assert_eq!(m.state(), MuteState::Muted);
        assert_eq!(m.state().label(), Some("MUTED"));
    }

    #[test]
    fn dead_zone_holds_muted() {
        let mut m = muted();
        assert_eq!(m.update(100.0), MuteSignal::Unchanged);
        assert_eq!(m.state(), MuteState::Muted);
    }

    #[test]
    fn open_hand_unmutes() {
        let mut m = muted();
        assert_eq!(m.update(160.0), MuteSignal::SetUnmuted);
        assert_eq!(m.state(), MuteState::Unmuted);
        assert_eq!(m.state().label(), Some("UNMUTED"));
    }

    #[test]
    fn muted_survives_anything_up_to_open() {
        let mut m = muted();
        for avg in [60.0, 61.0, 90.0, 149.9, 150.0] {
            assert_eq!(m.update(avg), MuteSignal::Unchanged, "avg = {}", avg);
            assert_eq!(m.state(), MuteState::Muted);
        }
    }

    #[test]
    fn unmuted_survives_anything_down_to_fist() {
        let mut m = machine();
        m.update(200.0);
        for avg in [150.0, 149.0, 100.0, 60.1, 60.0] {
            assert_eq!(m.update(avg), MuteSignal::Unchanged, "avg = {}", avg);
            assert_eq!(m.state(), MuteState::Unmuted);
        }
        assert_eq!(m.update(59.0), MuteSignal::SetMuted);
    }

    #[test]
    fn repeated_fist_signals_once() {
        let mut m = machine();
        assert_eq!(m.update(30.0), MuteSignal::SetMuted);
        assert_eq!(m.update(30.0), MuteSignal::Unchanged);
        assert_eq!(m.update(20.0), MuteSignal::Unchanged);
    }

    #[test]
    fn dead_zone_from_unknown_stays_unknown() {
        let mut m = machine();
        assert_eq!(m.update(100.0), MuteSignal::Unchanged);
        assert_eq!(m.state(), MuteState::Unknown);
    }

    #[test]
    fn spread_of_square_hand() {
        // Wrist at origin-ish, every tip exactly 50 px away.
        let frame = LandmarkFrame::from_triples([
            (0, 100, 100),
            (4, 150, 100), (8, 100, 150), (12, 50, 100), (16, 100, 50), (20, 130, 140),
        ]);
        let avg = MuteStateMachine::spread(&frame).unwrap();
        assert!((avg - 50.0).abs() < 1e-4, "avg = {}", avg);
    }

    #[test]
    fn missing_wrist_is_no_op() {
        let mut m = machine();
        let frame = LandmarkFrame::from_triples([
            (4, 0, 0), (8, 0, 0), (12, 0, 0), (16, 0, 0), (20, 0, 0),
        ]);
        assert_eq!(m.process(&frame), MuteSignal::Unchanged);
        assert_eq!(m.state(), MuteState::Unknown);
    }

    #[test]
    fn crossed_thresholds_rejected() {
        assert_eq!(
            MuteStateMachine::new(150.0, 60.0).unwrap_err(),
            ConfigError::ThresholdsInverted { fist: 150.0, open: 60.0 },
        );
        assert!(MuteStateMachine::new(100.0, 100.0).is_err());
        assert_eq!(
            MuteStateMachine::new(f32::NAN, 150.0).unwrap_err(),
            ConfigError::NonFinite("fist_threshold"),
        );
    }

    #[test]
    fn from_config_checks_thresholds() {
        let cfg = EngineConfig { fist_threshold: 150.0, open_threshold: 60.0, ..Default::default() };
        assert!(MuteStateMachine::from_config(&cfg).is_err());
    }

    #[test]
    fn signal_as_mute() {
        assert_eq!(MuteSignal::SetMuted.as_mute(), Some(true));
        assert_eq!(MuteSignal::SetUnmuted.as_mute(), Some(false));
        assert_eq!(MuteSignal::Unchanged.as_mute(), None);
    }
}
