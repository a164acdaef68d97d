//! Engine tuning constants, fixed for the life of a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Startup configuration for [`GestureEngine`](crate::GestureEngine).
///
/// Every field has a default, so a config file only needs to name the
/// values it changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pinch lengths (px) mapped onto the bottom and top of the volume range.
    pub pinch_domain:   (f32, f32),
    /// Smoothing divisor, ≥ 1.  Higher = slower response; 1 = no smoothing.
    pub smoothness:     f32,
    /// Mean fingertip-to-wrist distance (px) below which the hand is a fist.
    pub fist_threshold: f32,
    /// Mean fingertip-to-wrist distance (px) above which the hand is open.
    pub open_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            pinch_domain:   (20.0, 250.0),
            smoothness:     5.0,
            fist_threshold: 60.0,
            open_threshold: 150.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("smoothness must be at least 1, got {0}")]
    SmoothnessTooLow(f32),

    #[error("fist threshold ({fist}) must be below open threshold ({open})")]
    ThresholdsInverted { fist: f32, open: f32 },

    #[error("pinch domain [{0}, {1}] is empty or reversed")]
    EmptyPinchDomain(f32, f32),

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

impl EngineConfig {
    /// Check the invariants the per-frame code relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("pinch_domain.0", self.pinch_domain.0),
            ("pinch_domain.1", self.pinch_domain.1),
            ("smoothness",     self.smoothness),
            ("fist_threshold", self.fist_threshold),
            ("open_threshold", self.open_threshold),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite(*name));
        }
        check_smoothness(self.smoothness)?;
        check_thresholds(self.fist_threshold, self.open_threshold)?;
        check_pinch_domain(self.pinch_domain)
    }
}

// The stage constructors run the same checks on their own arguments, so a
// `VolumeMapper` or `MuteStateMachine` built outside `GestureEngine` holds
// the same invariants.

pub(crate) fn check_smoothness(smoothness: f32) -> Result<(), ConfigError> {
    if !smoothness.is_finite() {
        return Err(ConfigError::NonFinite("smoothness"));
    }
    if smoothness < 1.0 {
        return Err(ConfigError::SmoothnessTooLow(smoothness));
    }
    Ok(())
}

pub(crate) fn check_thresholds(fist: f32, open: f32) -> Result<(), ConfigError> {
    if !fist.is_finite() {
        return Err(ConfigError::NonFinite("fist_threshold"));
    }
    if !open.is_finite() {
        return Err(ConfigError::NonFinite("open_threshold"));
    }
    if fist >= open {
        return Err(ConfigError::ThresholdsInverted { fist, open });
    }
    Ok(())
}

pub(crate) fn check_pinch_domain((lo, hi): (f32, f32)) -> Result<(), ConfigError> {
    if !lo.is_finite() {
        return Err(ConfigError::NonFinite("pinch_domain.0"));
    }
    if !hi.is_finite() {
        return Err(ConfigError::NonFinite("pinch_domain.1"));
    }
    if lo >= hi {
        return Err(ConfigError::EmptyPinchDomain(lo, hi));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn smoothness_below_one_rejected() {
        let cfg = EngineConfig { smoothness: 0.5, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::SmoothnessTooLow(0.5)));
    }

    #[test]
    fn smoothness_of_one_accepted() {
        let cfg = EngineConfig { smoothness: 1.0, ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn equal_thresholds_rejected() {
        let cfg = EngineConfig { fist_threshold: 100.0, open_threshold: 100.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::ThresholdsInverted { .. })));
    }

    #[test]
    fn reversed_domain_rejected() {
        let cfg = EngineConfig { pinch_domain: (250.0, 20.0), ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyPinchDomain(250.0, 20.0)));
    }

    #[test]
    fn nan_rejected() {
        let cfg = EngineConfig { smoothness: f32::NAN, ..Default::default() };
        assert_eq!(cfg.validate(), Err(ConfigError::NonFinite("smoothness")));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{ "smoothness": 8.0 }"#).unwrap();
        assert_eq!(cfg.smoothness, 8.0);
        assert_eq!(cfg.fist_threshold, 60.0);
        assert_eq!(cfg.pinch_domain, (20.0, 250.0));
    }
}
