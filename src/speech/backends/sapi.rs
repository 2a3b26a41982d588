//! Windows SAPI backend via PowerShell
//!
//! Used on Windows and on WSL through the PowerShell interop. Each call is
//! a one-shot synchronous `System.Speech` invocation; the process blocks
//! until the utterance finishes.

use crate::speech::Synth;
use crate::{Result, VoiceError};
use log::{debug, error};
use std::process::{Command, Stdio};

/// Backend driving Windows SAPI through powershell.exe
pub struct SapiSynth {
    /// Path to powershell.exe
    powershell_path: String,
}

impl SapiSynth {
    /// Create a new SAPI backend
    ///
    /// Verifies PowerShell is reachable and System.Speech loads.
    pub fn new() -> Result<Self> {
        let powershell_path = Self::find_powershell()?;
        debug!("Found PowerShell at: {}", powershell_path);

        Self::test_sapi(&powershell_path)?;
        Ok(Self { powershell_path })
    }

    /// Find PowerShell executable (native or WSL interop)
    fn find_powershell() -> Result<String> {
        let paths = [
            "powershell.exe",
            "/mnt/c/Windows/System32/WindowsPowerShell/v1.0/powershell.exe",
        ];

        for path in paths {
            if let Ok(status) = Command::new(path)
                .arg("-Command")
                .arg("$PSVersionTable.PSVersion")
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
            "PowerShell not found. WSL interop may not be enabled.".to_string(),
        ))
    }

    /// Test that Windows SAPI is available
    fn test_sapi(powershell_path: &str) -> Result<()> {
        let output = Command::new(powershell_path)
            .arg("-NoProfile")
            .arg("-NonInteractive")
            .arg("-Command")
            .arg("Add-Type -AssemblyName System.Speech")
            .output()
            .map_err(|e| VoiceError::Speech(format!("Failed to test SAPI: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Speech(format!(
                "Windows SAPI not available: {}",
                stderr
            )));
        }
        Ok(())
    }

    /// Convert words-per-minute to SAPI's -10..10 rate scale
    ///
    /// 200 wpm maps to 0, the SAPI default.
    fn rate_to_sapi(wpm: u32) -> i32 {
        ((wpm / 20) as i32 - 10).clamp(-10, 10)
    }

    /// Escape text for embedding in a PowerShell double-quoted string
    fn escape_text(text: &str) -> String {
        text.replace('`', "``")
            .replace('"', "`\"")
            .replace('$', "`$")
            .replace(['\n', '\r'], " ")
    }
}

impl Synth for SapiSynth {
    fn name(&self) -> &'static str {
        "sapi"
    }

    fn speak(&mut self, text: &str, rate: u32) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let escaped = Self::escape_text(text);
        let sapi_rate = Self::rate_to_sapi(rate);
        debug!("Speaking via SAPI at rate {}: {}", sapi_rate, escaped);

        let script = format!(
            "Add-Type -AssemblyName System.Speech\n\
             $synth = New-Object System.Speech.Synthesis.SpeechSynthesizer\n\
             $synth.Rate = {}\n\
             $synth.Speak(\"{}\")",
            sapi_rate, escaped
        );

        let status = Command::new(&self.powershell_path)
            .arg("-NoProfile")
            .arg("-NonInteractive")
            .arg("-Command")
            .arg(script)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                error!("Failed to run PowerShell: {}", e);
                VoiceError::Speech(format!("Failed to run PowerShell: {}", e))
            })?;

        if !status.success() {
            return Err(VoiceError::Speech(format!(
                "PowerShell speech exited with status {}",
                status
            )));
        }
        Ok(())
    }
}
