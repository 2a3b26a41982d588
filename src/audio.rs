//! Audio-device-aware auto-unmute heuristic
//!
//! In silent mode the assistant normally stays quiet. When one of the
//! user's recognized output devices (typically headphones) is connected,
//! speech can be enabled without disturbing anyone nearby. Device listing
//! goes through system_profiler on macOS and pactl on Linux; any probe
//! failure leaves voice disabled.

use crate::Result;
use log::debug;
use std::process::Command;

/// Result of the auto-unmute check
#[derive(Debug, Clone)]
pub struct AudioCheck {
    /// Whether speech should be enabled
    pub enable: bool,
    /// Human-readable reason, shown alongside the auto-unmute notice
    pub reason: String,
}

/// Detector matching connected output devices against a configured list
pub struct AudioDetector {
    /// Device names that count as "safe to speak"
    known_devices: Vec<String>,
}

impl AudioDetector {
    pub fn new(known_devices: Vec<String>) -> Self {
        Self { known_devices }
    }

    /// Decide whether voice should be auto-enabled
    pub fn should_enable_voice(&self) -> AudioCheck {
        if self.known_devices.is_empty() {
            return AudioCheck {
                enable: false,
                reason: "no recognized devices configured".to_string(),
            };
        }

        let connected = match list_output_devices() {
            Ok(devices) => devices,
            Err(e) => {
                debug!("Audio device probe failed: {}", e);
                return AudioCheck {
                    enable: false,
                    reason: format!("device probe failed: {}", e),
                };
            }
        };
        debug!("Connected output devices: {:?}", connected);

        match self.match_device(&connected) {
            Some(name) => AudioCheck {
                enable: true,
                reason: format!("{} is connected", name),
            },
            None => AudioCheck {
                enable: false,
                reason: "no recognized device connected".to_string(),
            },
        }
    }

    /// First configured device appearing in the connected list, by substring
    fn match_device(&self, connected: &[String]) -> Option<&str> {
        let connected_lower: Vec<String> =
            connected.iter().map(|d| d.to_lowercase()).collect();
        self.known_devices
            .iter()
            .find(|known| {
                let known_lower = known.to_lowercase();
                connected_lower.iter().any(|c| c.contains(&known_lower))
            })
            .map(String::as_str)
    }
}

/// List the names of current audio output devices
#[cfg(target_os = "macos")]
fn list_output_devices() -> Result<Vec<String>> {
    let output = Command::new("system_profiler")
        .arg("SPAudioDataType")
        .output()
        .map_err(|e| crate::VoiceError::Other(format!("system_profiler failed: {}", e)))?;

    if !output.status.success() {
        return Err(crate::VoiceError::Other(
            "system_profiler exited with an error".into(),
        ));
    }

    // Device names are the indented lines ending with a colon, e.g.
    //         AirPods Pro:
    let text = String::from_utf8_lossy(&output.stdout);
    let devices = text
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let depth = line.len() - line.trim_start().len();
            if depth == 8 && trimmed.ends_with(':') {
                Some(trimmed.trim_end_matches(':').to_string())
            } else {
                None
            }
        })
        .collect();
    Ok(devices)
}

/// List the names of current audio output devices
#[cfg(not(target_os = "macos"))]
fn list_output_devices() -> Result<Vec<String>> {
    let output = Command::new("pactl")
        .args(["list", "short", "sinks"])
        .output()
        .map_err(|e| crate::VoiceError::Other(format!("pactl failed: {}", e)))?;

    if !output.status.success() {
        return Err(crate::VoiceError::Other("pactl exited with an error".into()));
    }

    // Second tab-separated column is the sink name
    let text = String::from_utf8_lossy(&output.stdout);
    let devices = text
        .lines()
        .filter_map(|line| line.split('\t').nth(1).map(str::to_string))
        .collect();
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_device_list_disables() {
        let detector = AudioDetector::new(vec![]);
        let check = detector.should_enable_voice();
        assert!(!check.enable);
    }

    #[test]
    fn test_match_device_substring() {
        let detector = AudioDetector::new(vec!["AirPods".to_string()]);
        let connected = vec!["alsa_output.airpods-pro.a2dp-sink".to_string()];
        assert_eq!(detector.match_device(&connected), Some("AirPods"));

        let none: Vec<String> = vec!["Built-in Speakers".to_string()];
        assert_eq!(detector.match_device(&none), None);
    }

    #[test]
    fn test_probe_failure_keeps_voice_off() {
        // Detector with devices configured but (possibly) no audio stack;
        // must never panic, and a failed probe reports enable = false.
        let detector = AudioDetector::new(vec!["Headset".to_string()]);
        let check = detector.should_enable_voice();
        assert!(!check.reason.is_empty());
        let _ = check.enable;
    }
}
