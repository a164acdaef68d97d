//! Pinch distance → smoothed volume level, plus instantaneous display values.
//!
//! The level written to the sink goes through a single-pole low-pass
//! filter so the audio glides; the percentage and bar height shown to the
//! user follow the hand immediately.

use crate::config::{check_pinch_domain, check_smoothness, ConfigError, EngineConfig};
use crate::geometry::{distance, interp_clamped};
use crate::landmark::{LandmarkFrame, LandmarkId};
use crate::sink::VolumeRange;

/// Bar-height pixel rows: bottom (silent) and top (full) of the volume bar.
pub const BAR_BOTTOM: f32 = 400.0;
pub const BAR_TOP:    f32 = 150.0;

/// Result of one hand frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeReading {
    /// Thumb-tip ↔ index-tip distance in pixels.
    pub length:  f32,
    /// Smoothed level in sink units; this is what the sink receives.
    pub level:   f32,
    /// 0–100, unsmoothed.
    pub percent: u8,
    /// Pixel row of the bar's top edge, 150–400, unsmoothed.
    pub bar:     u32,
}

#[derive(Clone, Debug)]
pub struct VolumeMapper {
    range:      VolumeRange,
    domain:     (f32, f32),
    smoothness: f32,
    previous:   f32,
}

impl VolumeMapper {
    /// `smoothness` of 1 disables smoothing entirely; below 1 is rejected.
    /// The filter starts at the bottom of `range`.
    pub fn new(range: VolumeRange, domain: (f32, f32), smoothness: f32) -> Result<Self, ConfigError> {
        check_smoothness(smoothness)?;
        check_pinch_domain(domain)?;
        Ok(VolumeMapper { range, domain, smoothness, previous: range.min })
    }

    pub fn from_config(cfg: &EngineConfig, range: VolumeRange) -> Result<Self, ConfigError> {
        Self::new(range, cfg.pinch_domain, cfg.smoothness)
    }

    /// Last smoothed level.
    pub fn previous(&self) -> f32 { self.previous }

    pub fn range(&self) -> VolumeRange { self.range }

    /// Drop the filter history back to the bottom of the range.
    pub fn reset(&mut self) {
        self.previous = self.range.min;
    }

    /// Process one frame.  `None` (and no state change) when the thumb or
    /// index tip is missing.
    pub fn process(&mut self, frame: &LandmarkFrame) -> Option<VolumeReading> {
        let thumb = frame.get(LandmarkId::THUMB_TIP)?;
        let index = frame.get(LandmarkId::INDEX_TIP)?;
        Some(self.update(distance(thumb, index)))
    }

    /// Feed a raw pinch length.
    pub fn update(&mut self, length: f32) -> VolumeReading {
        let mapped  = interp_clamped(length, self.domain, self.range.as_tuple());
        let percent = interp_clamped(length, self.domain, (0.0, 100.0));
        let bar     = interp_clamped(length, self.domain, (BAR_BOTTOM, BAR_TOP));

        let level = self.previous + (mapped - self.previous) / self.smoothness;
        self.previous = level;

        VolumeReading {
            length,
            level,
            percent: percent as u8,
            bar:     bar as u32,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DB: VolumeRange = VolumeRange::new(-65.25, 0.0);

    fn unsmoothed() -> VolumeMapper {
        VolumeMapper::new(DB, (20.0, 250.0), 1.0).unwrap()
    }

    #[test]
    fn short_pinch_is_floor() {
        for d in [0.0, 5.0, 19.9, 20.0] {
            let r = unsmoothed().update(d);
            assert_eq!(r.level, DB.min, "d = {}", d);
            assert_eq!(r.percent, 0);
            assert_eq!(r.bar, 400);
        }
    }

    #[test]
    fn wide_pinch_is_ceiling() {
        for d in [250.0, 251.0, 400.0, 10_000.0] {
            let r = unsmoothed().update(d);
            assert_eq!(r.level, DB.max, "d = {}", d);
            assert_eq!(r.percent, 100);
            assert_eq!(r.bar, 150);
        }
    }

    #[test]
    fn first_step_moves_one_fifth() {
        let mut m = VolumeMapper::new(VolumeRange::new(0.0, 100.0), (20.0, 250.0), 5.0).unwrap();
        let r = m.update(250.0);
        assert_relative_eq!(r.level, 20.0);
        assert_relative_eq!(m.previous(), 20.0);
        // Display values ignore the filter.
        assert_eq!(r.percent, 100);
        assert_eq!(r.bar, 150);
    }

    #[test]
    fn smoothing_converges_for_any_factor() {
        for smoothness in [1.0, 1.5, 2.0, 5.0, 10.0, 40.0] {
            let mut m = VolumeMapper::new(DB, (20.0, 250.0), smoothness).unwrap();
            let mut r = m.update(135.0);
            for _ in 0..2000 { r = m.update(135.0); }
            let target = interp_clamped(135.0, (20.0, 250.0), DB.as_tuple());
            assert_relative_eq!(r.level, target, epsilon = 1e-3);
        }
    }

    #[test]
    fn percent_is_monotonic() {
        let mut m = unsmoothed();
        let mut last = 0u8;
        for d in 0..=300 {
            let p = m.update(d as f32).percent;
            assert!(p >= last, "percent fell from {} to {} at d = {}", last, p, d);
            last = p;
        }
    }

    #[test]
    fn missing_tip_leaves_state() {
        let mut m = VolumeMapper::new(DB, (20.0, 250.0), 5.0).unwrap();
        m.update(250.0);
        let before = m.previous();
        let frame = LandmarkFrame::from_triples([(4, 100, 100)]);
        assert_eq!(m.process(&frame), None);
        assert_eq!(m.previous(), before);
    }

    #[test]
    fn pinch_of_twenty_pixels() {
        let mut m = unsmoothed();
        let frame = LandmarkFrame::from_triples([(4, 100, 100), (8, 100, 120)]);
        let r = m.process(&frame).unwrap();
        assert_relative_eq!(r.length, 20.0);
        assert_eq!(r.level, DB.min);
        assert_eq!(r.percent, 0);
    }

    #[test]
    fn zero_smoothness_rejected() {
        let err = VolumeMapper::new(DB, (20.0, 250.0), 0.0).unwrap_err();
        assert_eq!(err, ConfigError::SmoothnessTooLow(0.0));
        assert!(VolumeMapper::new(DB, (20.0, 250.0), 0.99).is_err());
    }

    #[test]
    fn reversed_domain_rejected() {
        assert_eq!(
            VolumeMapper::new(DB, (250.0, 20.0), 5.0).unwrap_err(),
            ConfigError::EmptyPinchDomain(250.0, 20.0),
        );
    }

    #[test]
    fn from_config_checks_smoothness() {
        let cfg = EngineConfig { smoothness: 0.5, ..Default::default() };
        assert!(VolumeMapper::from_config(&cfg, DB).is_err());
        assert!(VolumeMapper::from_config(&EngineConfig::default(), DB).is_ok());
    }

    #[test]
    fn reset_returns_to_floor() {
        let mut m = unsmoothed();
        m.update(250.0);
        assert_eq!(m.previous(), DB.max);
        m.reset();
        assert_eq!(m.previous(), DB.min);
    }
}
