//! The audio-output boundary.  Implementations live in the front-end crate
//! (MIDI, null); tests use in-memory recorders.

/// Volume range in the sink's native units (dB, MIDI 0–127, …).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeRange {
    pub min: f32,
    pub max: f32,
}

impl VolumeRange {
    pub const fn new(min: f32, max: f32) -> Self {
        VolumeRange { min, max }
    }

    pub fn as_tuple(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

/// Anything that can receive volume and mute writes.
pub trait AudioSink {
    /// Range the sink accepts in [`AudioSink::set_volume`].
    fn volume_range(&self) -> VolumeRange;
    fn set_volume(&mut self, level: f32);
    fn set_mute(&mut self, muted: bool);
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn volume_range(&self) -> VolumeRange { (**self).volume_range() }
    fn set_volume(&mut self, level: f32)  { (**self).set_volume(level) }
    fn set_mute(&mut self, muted: bool)   { (**self).set_mute(muted) }
}
