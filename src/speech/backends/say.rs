//! macOS `say` backend
//!
//! Invokes the system speech synthesizer directly. The configured language
//! tag selects a named voice; unrecognized tags use the system default.

use crate::speech::Synth;
use crate::{Result, VoiceError};
use log::{debug, error};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::process::Command;

/// Language tag -> macOS voice name
static VOICES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("zh-TW", "Mei-Jia"),
        ("zh-CN", "Ting-Ting"),
        ("en-US", "Samantha"),
        ("ja-JP", "Kyoko"),
    ])
});

/// Backend shelling out to /usr/bin/say
pub struct SaySynth {
    /// Voice name, None for the system default
    voice: Option<String>,
}

impl SaySynth {
    /// Create a new `say` backend for the given language tag
    pub fn new(language: &str) -> Result<Self> {
        let voice = Self::voice_for_language(language);
        debug!("say backend: language {} -> voice {:?}", language, voice);
        Ok(Self { voice })
    }

    /// Resolve a language tag to a voice name
    fn voice_for_language(language: &str) -> Option<String> {
        VOICES.get(language).map(|v| v.to_string())
    }
}

impl Synth for SaySynth {
    fn name(&self) -> &'static str {
        "say"
    }

    fn speak(&mut self, text: &str, rate: u32) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        debug!("Speaking via say: {}", text);

        let mut cmd = Command::new("say");
        if let Some(voice) = &self.voice {
            cmd.arg("-v").arg(voice);
        }
        cmd.arg("-r").arg(rate.to_string());
        cmd.arg(text);

        let status = cmd.status().map_err(|e| {
            error!("Failed to run say: {}", e);
            VoiceError::Speech(format!("Failed to run say: {}", e))
        })?;

        if !status.success() {
            return Err(VoiceError::Speech(format!(
                "say exited with status {}",
                status
            )));
        }
        Ok(())
    }
}
