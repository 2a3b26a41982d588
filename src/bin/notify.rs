//! codevoice-notify: thin fallback-chain entry point
//!
//! Picks the best available direct notifier and hands the message off. Each
//! candidate gets a short timeout; if all of them fail a report is printed
//! and nothing is delivered. Always exits zero so callers never break.

use clap::Parser;
use codevoice::chain::{self, ChainOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "codevoice-notify",
    version,
    about = "Send a voice notification through the best available notifier"
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

    let candidates = chain::default_candidates();
    match chain::run(&candidates, &cli.message, cli.tone.as_deref()) {
        ChainOutcome::Delivered { label, stdout } => {
            println!("Voice notification sent ({}): {}", label, cli.message);
            if !stdout.trim().is_empty() {
                print!("{}", stdout);
            }
        }
        ChainOutcome::Failed => {
            println!("Voice notification could not be sent");
            println!("Hint: install the direct notifier with: cargo install codevoice");
        }
    }
}
