//! Linux espeak backend
//!
//! Uses espeak-ng (or the older espeak) for text-to-speech. Works on native
//! Linux and on WSL with WSLg audio.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::speech::Synth;
use crate::{Result, VoiceError};
use log::{debug, error};
use std::process::{Command, Stdio};

/// Backend shelling out to espeak-ng / espeak
pub struct EspeakSynth {
    /// Path to the espeak executable found at startup
    espeak_path: String,
}

impl EspeakSynth {
    /// Create a new espeak backend
    ///
    /// Verifies that an espeak executable is runnable.
    pub fn new() -> Result<Self> {
        let espeak_path = Self::find_espeak()?;
        debug!("Found espeak at: {}", espeak_path);
        Ok(Self { espeak_path })
    }

    /// Find an espeak executable
    fn find_espeak() -> Result<String> {
        let paths = ["espeak-ng", "/usr/bin/espeak-ng", "espeak", "/usr/bin/espeak"];

        for path in paths {
            if let Ok(status) = Command::new(path)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
            {
                if status.success() {
                    return Ok(path.to_string());
                }
            }
        }

        Err(VoiceError::Speech(
            "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
        ))
    }
}

impl Synth for EspeakSynth {
    fn name(&self) -> &'static str {
        "espeak"
    }

    fn speak(&mut self, text: &str, rate: u32) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        debug!("Speaking via {}: {}", self.espeak_path, text);

        let status = Command::new(&self.espeak_path)
            .arg("-s")
            .arg(rate.to_string())
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                error!("Failed to run espeak: {}", e);
                VoiceError::Speech(format!("Failed to run espeak: {}", e))
            })?;

        if !status.success() {
            return Err(VoiceError::Speech(format!(
                "espeak exited with status {}",
                status
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_espeak_synth() {
        match EspeakSynth::new() {
            Ok(_) => println!("espeak backend available"),
            Err(e) => println!("espeak backend not available: {}", e),
        }
    }
}
