//! Top-level application loop.
//!
//! `AppState` owns the `GestureEngine`, the audio sink and the overlay.  It
//! feeds each landmark frame through the engine, writes the results to the
//! sink and keeps the overlay current for the visualizer.

use std::fs;
use std::path::Path;
use std::sync::mpsc::TryRecvError;
use std::time::Instant;

use gesture_engine::{AudioSink, ConfigError, EngineConfig, GestureEngine, LandmarkFrame, MuteSignal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::overlay::Overlay;
use crate::sink::{open_midi_sink, NullSink};
use crate::source::{spawn_landmark_source, SourceEvent};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkChoice {
    /// MIDI channel volume on the first available port.
    #[default]
    Midi,
    /// Log only.
    Null,
}

pub const MAX_CHANNEL: u8 = 15;

/// Configuration for the full application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine:  EngineConfig,
    pub sink:    SinkChoice,
    /// MIDI channel 0–15 (MidiSink only).
    pub channel: u8,
}

impl AppConfig {
    /// Load a JSON config file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: AppConfig = serde_json::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Engine invariants plus a MIDI channel that fits in four bits.
    pub fn validate(&self) -> Result<(), AppError> {
        self.engine.validate()?;
        if self.channel > MAX_CHANNEL {
            return Err(AppError::InvalidChannel(self.channel));
        }
        Ok(())
    }

    pub fn open_sink(&self) -> Box<dyn AudioSink + Send> {
        match self.sink {
            SinkChoice::Midi => open_midi_sink(self.channel),
            SinkChoice::Null => Box::new(NullSink::default()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState<S: AudioSink = Box<dyn AudioSink + Send>> {
    engine:  GestureEngine,
    sink:    S,
    overlay: Overlay,

    pub status: String,
}

impl<S: AudioSink> AppState<S> {
    pub fn new(cfg: EngineConfig, sink: S) -> Result<Self, ConfigError> {
        let range  = sink.volume_range();
        let engine = GestureEngine::new(cfg, range)?;
        info!(min = range.min, max = range.max, ?cfg, "engine ready");
        Ok(AppState {
            engine,
            sink,
            overlay: Overlay::default(),
            status:  "Show your hand".to_string(),
        })
    }

    // ── process one frame ────────────────────────────────────────────────

    pub fn handle_frame(&mut self, frame: Option<LandmarkFrame>) {
        let update = self.engine.process(frame.as_ref());
        self.engine.apply(&update, &mut self.sink);
        self.overlay.update(frame.as_ref(), &update);

        match update.mute {
            MuteSignal::SetMuted   => info!("fist detected, muted"),
            MuteSignal::SetUnmuted => info!("open hand detected, unmuted"),
            MuteSignal::Unchanged  => {}
        }

        self.status = match update.volume {
            Some(r) => {
                debug!(length = r.length, level = r.level, percent = r.percent, "volume");
                format!("PINCH {:.0}PX  LEVEL {:.1}", r.length, r.level)
            }
            None => "NO HAND".to_string(),
        };
    }

    /// Per-frame bookkeeping that does not depend on landmarks.
    pub fn tick(&mut self, now: Instant) {
        self.overlay.fps.tick(now);
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn overlay(&self) -> &Overlay         { &self.overlay }
    pub fn engine(&self)  -> &GestureEngine   { &self.engine }
    pub fn sink(&self)    -> &S               { &self.sink }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the landmark source (simulation by default, hardware with
/// `--features leap`), and drives the frame/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Landmark source + visualizer ──────────────────────────────────────
    #[cfg(not(feature = "leap"))]
    let (frame_rx, mut vis) = {
        use crate::source::{SimInput, SimLandmarkSource};
        let (sim_tx, sim_rx) = std::sync::mpsc::channel::<SimInput>();
        let rx = spawn_landmark_source(SimLandmarkSource::new(sim_rx));
        (rx, Visualizer::new(Some(sim_tx))?)
    };
    #[cfg(feature = "leap")]
    let (frame_rx, mut vis) = {
        use crate::source::LeapLandmarkSource;
        (spawn_landmark_source(LeapLandmarkSource), Visualizer::new(None)?)
    };

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(cfg.engine, cfg.open_sink())?;

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → SimInput (+ frame tick)
        if !vis.poll_input() { break; }

        // 2. Drain landmark frames, oldest first
        loop {
            match frame_rx.try_recv() {
                Ok(SourceEvent::Frame(frame))  => app.handle_frame(frame),
                Ok(SourceEvent::Quit)          => return Ok(()),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        // 3. Per-frame logic
        app.tick(Instant::now());

        // 4. Render
        vis.render(app.overlay(), &app.status);
    }

    info!("window closed");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
