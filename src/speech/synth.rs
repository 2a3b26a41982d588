//! Speech synthesizer abstraction
//!
//! Provides a unified interface for text-to-speech across platforms. Each
//! backend is a blocking one-shot invocation of an external OS command; the
//! call returns when the speech finishes or the command fails.

use super::backends;
use crate::platform::is_wsl;
use crate::{Result, VoiceError};
use log::info;

/// Speech synthesizer trait
///
/// Backends speak a string at a given rate (words per minute) and block
/// until the external command returns.
pub trait Synth {
    /// Backend name for logging and diagnostics
    fn name(&self) -> &'static str;

    /// Speak text, blocking until done
    fn speak(&mut self, text: &str, rate: u32) -> Result<()>;
}

/// Create a platform-appropriate speech synthesizer
///
/// Automatically detects the environment and selects the best backend:
///
/// **macOS:**
/// - The `say` command, with a voice picked from the configured language.
///
/// **WSL (Windows Subsystem for Linux):**
/// 1. espeak-ng / espeak (direct audio through WSLg)
/// 2. Windows SAPI via PowerShell interop
///
/// **Native Linux:**
/// - espeak-ng / espeak
///
/// **Windows:**
/// - SAPI via PowerShell
///
/// The language tag selects a voice where the backend supports one.
pub fn create_synth(language: &str) -> Result<Box<dyn Synth>> {
    let platform = std::env::consts::OS;

    match platform {
        "macos" => {
            info!("Creating macOS 'say' backend");
            let synth = backends::say::SaySynth::new(language)?;
            Ok(Box::new(synth))
        }
        "linux" if is_wsl() => {
            info!("Detected WSL environment");

            info!("Trying espeak backend...");
            match backends::espeak::EspeakSynth::new() {
                Ok(synth) => return Ok(Box::new(synth)),
                Err(e) => info!("espeak backend unavailable: {}", e),
            }

            info!("Trying Windows SAPI backend...");
            match backends::sapi::SapiSynth::new() {
                Ok(synth) => Ok(Box::new(synth)),
                Err(e) => Err(VoiceError::Speech(format!(
                    "No speech backend available on WSL. Tried:\n\
                     1. espeak-ng (install: sudo apt install espeak-ng)\n\
                     2. Windows SAPI (PowerShell interop not available)\n\
                     Error: {}",
                    e
                ))),
            }
        }
        "linux" => {
            info!("Creating espeak backend for native Linux");
            match backends::espeak::EspeakSynth::new() {
                Ok(synth) => Ok(Box::new(synth)),
                Err(e) => Err(VoiceError::Speech(format!(
                    "No speech backend available on Linux.\n\
                     Install espeak-ng: sudo apt install espeak-ng\n\
                     Error: {}",
                    e
                ))),
            }
        }
        "windows" => {
            info!("Creating Windows SAPI backend");
            let synth = backends::sapi::SapiSynth::new()?;
            Ok(Box::new(synth))
        }
        other => Err(VoiceError::Speech(format!(
            "No speech backend for platform '{}'",
            other
        ))),
    }
}
