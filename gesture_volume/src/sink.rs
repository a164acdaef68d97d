//! Audio sinks the engine writes to.
//!
//! The OS mixer is out of reach from portable code, so the default real
//! sink drives a MIDI synthesiser's channel volume (Control Change 7).
//! When no MIDI port is available we fall back to [`NullSink`], which only
//! logs.

use gesture_engine::{AudioSink, VolumeRange};
use tracing::{debug, info, warn};

/// MIDI Control Change number for channel volume.
const CC_CHANNEL_VOLUME: u8 = 7;

/// Typical Windows endpoint range, in dB.
pub const DEFAULT_DB_RANGE: VolumeRange = VolumeRange::new(-65.25, 0.0);

// ════════════════════════════════════════════════════════════════════════════
// ControlPort — abstraction over midir / in-memory (for testing)
// ════════════════════════════════════════════════════════════════════════════

/// Raw MIDI byte output.
pub trait ControlPort: Send {
    fn send(&mut self, message: &[u8]);
}

impl ControlPort for midir::MidiOutputConnection {
    fn send(&mut self, message: &[u8]) {
        if let Err(e) = midir::MidiOutputConnection::send(self, message) {
            warn!(error = %e, "MIDI send failed");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MidiSink
// ════════════════════════════════════════════════════════════════════════════

/// Channel-volume sink.  Accepts 0–127; muting sends volume 0 and holds
/// later writes back until unmuted.
pub struct MidiSink<P: ControlPort> {
    port:    P,
    channel: u8,
    level:   u8,
    sent:    Option<u8>,
    muted:   bool,
}

impl<P: ControlPort> MidiSink<P> {
    pub fn new(port: P, channel: u8) -> Self {
        MidiSink { port, channel: channel & 0x0F, level: 0, sent: None, muted: false }
    }

    pub fn port(&self) -> &P { &self.port }

    fn send_volume(&mut self, value: u8) {
        if self.sent == Some(value) { return; }
        self.port.send(&[0xB0 | self.channel, CC_CHANNEL_VOLUME, value]);
        self.sent = Some(value);
    }
}

impl<P: ControlPort> AudioSink for MidiSink<P> {
    fn volume_range(&self) -> VolumeRange {
        VolumeRange::new(0.0, 127.0)
    }

    fn set_volume(&mut self, level: f32) {
        self.level = level.round().clamp(0.0, 127.0) as u8;
        if !self.muted {
            self.send_volume(self.level);
        }
    }

    fn set_mute(&mut self, muted: bool) {
        self.muted = muted;
        let value = if muted { 0 } else { self.level };
        self.send_volume(value);
        info!(muted, channel = self.channel, "MIDI mute");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NullSink — used when no MIDI port is available
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct NullSink {
    range: VolumeRange,
}

impl NullSink {
    pub fn new(range: VolumeRange) -> Self {
        NullSink { range }
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new(DEFAULT_DB_RANGE)
    }
}

impl AudioSink for NullSink {
    fn volume_range(&self) -> VolumeRange { self.range }

    fn set_volume(&mut self, level: f32) {
        debug!(level, "volume");
    }

    fn set_mute(&mut self, muted: bool) {
        info!(muted, "mute");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// open_midi_sink — enumerate ports and pick first available
// ════════════════════════════════════════════════════════════════════════════

/// Try to open a MIDI output port, preferring a software synth.
/// Falls back to [`NullSink`] with a warning if none can be opened.
pub fn open_midi_sink(channel: u8) -> Box<dyn AudioSink + Send> {
    let midi_out = match midir::MidiOutput::new("gesture_volume") {
        Ok(m)  => m,
        Err(e) => {
            warn!(error = %e, "MIDI init failed, using null sink");
            return Box::new(NullSink::default());
        }
    };

    let ports = midi_out.ports();
    if ports.is_empty() {
        warn!("no MIDI output ports found, using null sink");
        return Box::new(NullSink::default());
    }

    let port_idx = ports.iter().enumerate()
        .find(|(_, p)| {
            midi_out.port_name(p).map(|n| {
                let n = n.to_lowercase();
                n.contains("fluid") || n.contains("timidity") ||
                n.contains("microsoft") || n.contains("synth")
            }).unwrap_or(false)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let port = &ports[port_idx];
    let name = midi_out.port_name(port)
        .unwrap_or_else(|_| "Unknown".to_string());
    info!(port = %name, channel, "opening MIDI port");

    match midi_out.connect(port, "gesture-volume") {
        Ok(conn) => Box::new(MidiSink::new(conn, channel)),
        Err(e) => {
            warn!(error = %e, "MIDI connect failed, using null sink");
            Box::new(NullSink::default())
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CapturePort(Vec<Vec<u8>>);

    impl ControlPort for CapturePort {
        fn send(&mut self, message: &[u8]) { self.0.push(message.to_vec()); }
    }

    fn sink() -> MidiSink<CapturePort> {
        MidiSink::new(CapturePort::default(), 2)
    }

    #[test]
    fn volume_becomes_cc7() {
        let mut s = sink();
        s.set_volume(99.6);
        assert_eq!(s.port().0, vec![vec![0xB2, 7, 100]]);
    }

    #[test]
    fn out_of_range_levels_clamp() {
        let mut s = sink();
        s.set_volume(500.0);
        s.set_volume(-3.0);
        assert_eq!(s.port().0, vec![vec![0xB2, 7, 127], vec![0xB2, 7, 0]]);
    }

    #[test]
    fn repeated_level_sent_once() {
        let mut s = sink();
        s.set_volume(64.0);
        s.set_volume(64.2);
        assert_eq!(s.port().0.len(), 1);
    }

    #[test]
    fn mute_holds_volume_until_unmute() {
        let mut s = sink();
        s.set_volume(80.0);
        s.set_mute(true);
        s.set_volume(90.0);
        s.set_mute(false);
        assert_eq!(
            s.port().0,
            vec![vec![0xB2, 7, 80], vec![0xB2, 7, 0], vec![0xB2, 7, 90]],
        );
    }

    #[test]
    fn channel_is_masked() {
        let mut s = MidiSink::new(CapturePort::default(), 0x13);
        s.set_volume(1.0);
        assert_eq!(s.port().0[0][0], 0xB3);
    }

    #[test]
    fn null_sink_reports_its_range() {
        assert_eq!(NullSink::default().volume_range(), DEFAULT_DB_RANGE);
    }
}
