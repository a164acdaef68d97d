//! Frame driver: feeds each landmark frame to both stages and forwards the
//! results to an [`AudioSink`].

use crate::config::{ConfigError, EngineConfig};
use crate::landmark::LandmarkFrame;
use crate::mute::{MuteSignal, MuteState, MuteStateMachine};
use crate::sink::{AudioSink, VolumeRange};
use crate::volume::{VolumeMapper, VolumeReading};

/// Everything one frame produced.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUpdate {
    /// `None` when no hand (or no thumb/index tip) was seen.
    pub volume:     Option<VolumeReading>,
    pub mute:       MuteSignal,
    /// Mute state after this frame, for the renderer.
    pub mute_state: MuteState,
}

impl FrameUpdate {
    /// True when the frame asks nothing of the sink.
    pub fn is_empty(&self) -> bool {
        self.volume.is_none() && self.mute == MuteSignal::Unchanged
    }
}

pub struct GestureEngine {
    config: EngineConfig,
    volume: VolumeMapper,
    mute:   MuteStateMachine,
}

impl GestureEngine {
    /// Validate `config` and build both stages.  `range` is the sink's
    /// native volume range.
    pub fn new(config: EngineConfig, range: VolumeRange) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GestureEngine {
            config,
            volume: VolumeMapper::from_config(&config, range)?,
            mute:   MuteStateMachine::from_config(&config)?,
        })
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn mute_state(&self) -> MuteState { self.mute.state() }
    pub fn previous_volume(&self) -> f32 { self.volume.previous() }

    /// Process one video frame.  `None` means no hand was detected; both
    /// stages are left untouched.
    pub fn process(&mut self, frame: Option<&LandmarkFrame>) -> FrameUpdate {
        let Some(frame) = frame else {
            return FrameUpdate { mute_state: self.mute.state(), ..Default::default() };
        };
        let volume = self.volume.process(frame);
        let mute   = self.mute.process(frame);
        FrameUpdate { volume, mute, mute_state: self.mute.state() }
    }

    /// Write a frame's results to the sink: one volume write per hand
    /// frame, one mute write per transition.
    pub fn apply<S: AudioSink + ?Sized>(&self, update: &FrameUpdate, sink: &mut S) {
        if let Some(reading) = update.volume {
            sink.set_volume(reading.level);
        }
        if let Some(muted) = update.mute.as_mute() {
            sink.set_mute(muted);
        }
    }
}
