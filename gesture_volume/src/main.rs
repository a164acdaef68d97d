//! gesture_volume — interactive entry point.
//!
//! ```text
//! gesture_volume               # prompt for settings
//! gesture_volume --quick       # defaults, MIDI sink
//! gesture_volume --config f    # settings from a JSON file
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use gesture_engine::EngineConfig;
use gesture_volume::app::{run, AppConfig, SinkChoice, MAX_CHANNEL};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Gesture Volume — pinch, fist, open hand             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let config_path = config_path(&args)?;

    let cfg = if let Some(path) = config_path {
        println!("  Loading {}\n", path.display());
        AppConfig::load(&path)?
    } else if args.iter().any(|a| a == "--quick") {
        println!("  Quick-start: default thresholds, MIDI sink\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    info!(version = env!("CARGO_PKG_VERSION"), ?cfg, "gesture_volume starting");

    println!();
    println!("  Opening visualizer window…");
    println!();

    run(cfg).context("gesture_volume failed")
}

const USAGE: &str = "usage: gesture_volume [--quick | --config <file>]";

/// The path following `--config`, if the flag is present.
fn config_path(args: &[String]) -> anyhow::Result<Option<PathBuf>> {
    let Some(i) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(path) if !path.starts_with("--") => Ok(Some(PathBuf::from(path))),
        _ => bail!("--config needs a file path\n{}", USAGE),
    }
}

fn configure_interactively() -> AppConfig {
    let defaults = EngineConfig::default();

    let smoothness: f32 = read_line("  Smoothness ≥ 1 (default 5, 1 = none): ")
        .trim().parse().unwrap_or(defaults.smoothness)
        .max(1.0);

    let (fist_threshold, open_threshold) = loop {
        let fist: f32 = read_line("  Fist threshold px (default 60): ")
            .trim().parse().unwrap_or(defaults.fist_threshold);
        let open: f32 = read_line("  Open-hand threshold px (default 150): ")
            .trim().parse().unwrap_or(defaults.open_threshold);
        if fist < open { break (fist, open); }
        println!("  ⚠  Fist threshold must be below the open-hand threshold.");
    };

    println!("  Sink: 1=MIDI channel volume  2=Log only");
    let sink = match read_line("  Choice (default 1): ").trim() {
        "2" => SinkChoice::Null,
        _   => SinkChoice::Midi,
    };
    let channel: u8 = if sink == SinkChoice::Midi {
        read_line("  MIDI channel 0–15 (default 0): ")
            .trim().parse::<u8>().unwrap_or(0).min(MAX_CHANNEL)
    } else {
        0
    };

    AppConfig {
        engine: EngineConfig {
            smoothness,
            fist_threshold,
            open_threshold,
            ..defaults
        },
        sink,
        channel,
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_flag_takes_following_path() {
        let path = config_path(&args(&["gesture_volume", "--config", "vol.json"])).unwrap();
        assert_eq!(path, Some(PathBuf::from("vol.json")));
    }

    #[test]
    fn no_config_flag_is_none() {
        assert_eq!(config_path(&args(&["gesture_volume", "--quick"])).unwrap(), None);
    }

    #[test]
    fn config_flag_without_path_is_an_error() {
        assert!(config_path(&args(&["gesture_volume", "--config"])).is_err());
        assert!(config_path(&args(&["gesture_volume", "--config", "--quick"])).is_err());
    }
}
