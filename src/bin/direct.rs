//! codevoice-direct: direct notifier
//!
//! Delivers one notification without going through the fallback chain.
//! Honors the per-project voice_enabled gate, temporarily forces an
//! effective full mode so the alert is actually heard, and degrades every
//! failure to a console message. Always exits zero.

use clap::Parser;
use codevoice::assistant::Assistant;
use codevoice::config::{Config, Mode};

#[derive(Parser, Debug)]
#[command(
    name = "codevoice-direct",
    version,
    about = "Deliver one voice notification directly"
)]
struct Cli {
    /// Message to deliver
    message: String,

    /// Tone prefix (urgent, gentle, excited, worried, thinking)
    tone: Option<String>,
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    println!("Sending voice notification: {}", cli.message);
    if let Some(tone) = &cli.tone {
        println!("Tone: {}", tone);
    }

    let config = match Config::load(None) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: failed to load config ({}), using defaults", e);
            Config::default()
        }
    };

    // Per-project gate: a disabled project stays quiet
    if !config.voice_enabled {
        println!("Voice notifications are disabled for this project, skipping");
        return;
    }

    let mut assistant = Assistant::new(config);

    // Force an effective full mode for this one delivery; silent projects
    // still want to hear an explicit direct notification. The stored config
    // is not touched because nothing is saved here.
    if assistant.config.mode == Mode::Silent {
        assistant.config.mode = Mode::Full;
    }

    assistant.notify(Some(&cli.message), None, cli.tone.as_deref(), None);
    println!("Voice notification delivered");
}
