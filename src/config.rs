//! Configuration management
//!
//! The configuration is a flat JSON record stored per-project. It is loaded
//! once at startup, mutated in place by setter calls, and written back to
//! the same file. An absent file is treated as all-defaults and created.

use crate::{Result, VoiceError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default config file name, looked up in the project directory
pub const CONFIG_FILE: &str = ".codevoice.json";

/// Notification mode, globally gating speech output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Speak and notify
    #[default]
    Full,
    /// Suppress speech unless a recognized audio device is connected
    Silent,
    /// Never speak; console echo still happens
    Off,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Full => write!(f, "full"),
            Mode::Silent => write!(f, "silent"),
            Mode::Off => write!(f, "off"),
        }
    }
}

impl FromStr for Mode {
    type Err = VoiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(Mode::Full),
            "silent" => Ok(Mode::Silent),
            "off" => Ok(Mode::Off),
            other => Err(VoiceError::Config(format!(
                "Invalid mode '{}'. Use: full, silent, or off",
                other
            ))),
        }
    }
}

/// Application configuration for the voice assistant
///
/// Holds the assistant's display name, the tone-prefix and message-template
/// tables, speech parameters, and the recognized audio device list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name substituted into message templates
    pub assistant_name: String,

    /// Notification mode (full, silent, off)
    pub mode: Mode,

    /// Per-project gate read by the direct notifier
    pub voice_enabled: bool,

    /// Speech rate in words per minute
    pub voice_rate: u32,

    /// BCP-47 language tag, used to pick a platform voice
    pub voice_language: String,

    /// Whether tone prefixes are prepended at all
    pub emotional_prefix: bool,

    /// Whether silent mode auto-unmutes when a known device is connected
    pub auto_detect_audio: bool,

    /// Tone -> textual prefix (e.g. urgent -> "Come look at this!")
    pub prefixes: BTreeMap<String, String>,

    /// Context key -> message template with a {name} placeholder
    pub contextual_messages: BTreeMap<String, String>,

    /// Audio output device names that count as "headphones are on"
    pub my_devices: Vec<String>,

    /// Config file path, not serialized
    #[serde(skip)]
    path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assistant_name: "Codey".to_string(),
            mode: Mode::Full,
            voice_enabled: true,
            voice_rate: 180,
            voice_language: "en-US".to_string(),
            emotional_prefix: true,
            auto_detect_audio: true,
            prefixes: default_prefixes(),
            contextual_messages: default_messages(),
            my_devices: Vec::new(),
            path: PathBuf::from(CONFIG_FILE),
        }
    }
}

fn default_prefixes() -> BTreeMap<String, String> {
    [
        ("urgent", "Come look at this! "),
        ("gentle", "Hi, sorry to interrupt. "),
        ("excited", "Great news! "),
        ("worried", "Uh oh. "),
        ("thinking", "Hmm, let me think. "),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_messages() -> BTreeMap<String, String> {
    [
        // Generic messages
        ("blocked", "{name} is blocked and needs your help"),
        ("need_help", "{name} needs your help"),
        ("task_completed", "{name} has finished the task"),
        ("error", "{name} hit an error and needs you to take a look"),
        // Situation-specific messages
        ("git_conflict", "Git conflict found, your decision is needed"),
        ("test_failed", "Tests failed, please check the error output"),
        ("build_error", "The build broke, settings may need adjusting"),
        ("dependency_issue", "Dependency problem, please confirm versions"),
        ("permission_denied", "Permission denied, authorization needed"),
        ("file_not_found", "A required file is missing, please provide the path"),
        ("need_user_input", "More information is needed to continue"),
        ("review_required", "Code changes are ready for your review"),
        ("deployment_ready", "Deployment is ready, please confirm"),
        ("long_running", "This task is taking a while, please be patient"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Config {
    /// Load configuration from disk or create default
    ///
    /// User values are deep-merged over the defaults so that a file holding
    /// a single overridden prefix keeps every other default entry. If the
    /// file does not exist, the defaults are written out.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        debug!("Loading config from {:?}", path);

        let mut config = if path.exists() {
            match Self::read_merged(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to load config, falling back to defaults: {}", e);
                    Config::default()
                }
            }
        } else {
            info!("Config file not found, creating default at {:?}", path);
            let config = Config {
                path: path.clone(),
                ..Config::default()
            };
            config.save()?;
            config
        };

        config.path = path;
        Ok(config)
    }

    /// Read a config file and merge its values over the defaults
    fn read_merged(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&contents)?;

        let mut base = serde_json::to_value(Config::default())?;
        merge_value(&mut base, user);

        let config: Config = serde_json::from_value(base)?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&self.path, json)
            .map_err(|e| VoiceError::Config(format!("Failed to save config: {}", e)))
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Resolve a context key to its message template
    ///
    /// Unknown keys fall back to the generic need_help template.
    pub fn template(&self, context: &str) -> &str {
        self.contextual_messages
            .get(context)
            .or_else(|| self.contextual_messages.get("need_help"))
            .map(String::as_str)
            .unwrap_or("{name} needs your help")
    }

    /// Tone prefix for an emotion, empty when unknown
    pub fn prefix(&self, emotion: &str) -> &str {
        self.prefixes.get(emotion).map(String::as_str).unwrap_or("")
    }

    /// Set the notification mode and persist
    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        self.mode = mode;
        self.save()?;
        info!("Mode switched to {}", mode);
        Ok(())
    }

    /// Update a single top-level key and persist
    ///
    /// The value goes through the JSON representation so string, boolean and
    /// integer settings all work from the CLI.
    pub fn set_key(&mut self, key: &str, value: Value) -> Result<()> {
        let mut as_value = serde_json::to_value(&*self)?;
        let obj = as_value
            .as_object_mut()
            .ok_or_else(|| VoiceError::Config("config is not a JSON object".to_string()))?;
        if !obj.contains_key(key) {
            return Err(VoiceError::Config(format!("Unknown setting: {}", key)));
        }
        obj.insert(key.to_string(), value);

        let path = self.path.clone();
        let mut updated: Config = serde_json::from_value(as_value)
            .map_err(|e| VoiceError::Config(format!("Invalid value for {}: {}", key, e)))?;
        updated.path = path;
        *self = updated;
        self.save()
    }

    /// Add an audio device name and persist
    ///
    /// Returns false if the device was already present.
    pub fn add_device(&mut self, device: &str) -> Result<bool> {
        if self.my_devices.iter().any(|d| d == device) {
            return Ok(false);
        }
        self.my_devices.push(device.to_string());
        self.save()?;
        Ok(true)
    }

    /// Remove an audio device name and persist
    ///
    /// Returns false if the device was not in the list.
    pub fn remove_device(&mut self, device: &str) -> Result<bool> {
        let before = self.my_devices.len();
        self.my_devices.retain(|d| d != device);
        if self.my_devices.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}

/// Coerce a CLI string into a JSON value
///
/// "true"/"false" become booleans, digit strings become integers, anything
/// else stays a string.
pub fn coerce_value(raw: &str) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<u64>() {
            return Value::from(n);
        }
    }
    Value::String(raw.to_string())
}

/// Merge user values over a base JSON value
///
/// Objects merge recursively per key; everything else replaces.
fn merge_value(base: &mut Value, user: Value) {
    match (base, user) {
        (Value::Object(base_map), Value::Object(user_map)) => {
            for (key, user_val) in user_map {
                match base_map.get_mut(&key) {
                    Some(base_val) => merge_value(base_val, user_val),
                    None => {
                        base_map.insert(key, user_val);
                    }
                }
            }
        }
        (base_slot, user_val) => *base_slot = user_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_full() {
        let config = Config::default();
        assert_eq!(config.mode, Mode::Full);
        assert!(config.voice_enabled);
    }

    #[test]
    fn test_template_fallback() {
        let config = Config::default();
        assert_eq!(config.template("no_such_context"), config.template("need_help"));
    }

    #[test]
    fn test_prefix_unknown_is_empty() {
        let config = Config::default();
        assert_eq!(config.prefix("bored"), "");
        assert_eq!(config.prefix("urgent"), "Come look at this! ");
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("full".parse::<Mode>().unwrap(), Mode::Full);
        assert_eq!("silent".parse::<Mode>().unwrap(), Mode::Silent);
        assert_eq!("off".parse::<Mode>().unwrap(), Mode::Off);
        assert!("loud".parse::<Mode>().is_err());
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value("true"), Value::Bool(true));
        assert_eq!(coerce_value("False"), Value::Bool(false));
        assert_eq!(coerce_value("180"), Value::from(180u64));
        assert_eq!(coerce_value("en-US"), Value::String("en-US".into()));
    }

    #[test]
    fn test_merge_keeps_unmentioned_defaults() {
        let mut base = serde_json::to_value(Config::default()).unwrap();
        let user: Value = serde_json::json!({
            "prefixes": { "urgent": "NOW! " },
            "voice_rate": 200
        });
        merge_value(&mut base, user);
        let merged: Config = serde_json::from_value(base).unwrap();

        assert_eq!(merged.prefixes["urgent"], "NOW! ");
        assert_eq!(merged.prefixes["gentle"], "Hi, sorry to interrupt. ");
        assert_eq!(merged.voice_rate, 200);
        assert!(merged.contextual_messages.contains_key("git_conflict"));
    }
}
