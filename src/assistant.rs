//! The voice assistant
//!
//! Holds the configuration record and implements message composition and
//! two-channel dispatch: text-to-speech plus the OS notification popup.
//! Each channel is wrapped so a failure is logged and the other channel is
//! still attempted; nothing here aborts the process.

use crate::audio::AudioDetector;
use crate::config::{Config, Mode};
use crate::dialog::{self, Choice};
use crate::speech::{create_synth, Synth};
use crate::{notify, Result};
use chrono::Local;
use log::{info, warn};

/// Phrases that end an interactive session
const QUIT_PHRASES: &[&str] = &["quit", "exit", "bye", "goodbye", "stop"];

pub struct Assistant {
    pub config: Config,

    /// Lazily created speech backend; creation is deferred so that
    /// notification-only paths never probe for speech commands
    synth: Option<Box<dyn Synth>>,
}

impl Assistant {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            synth: None,
        }
    }

    /// Construct with a prebuilt speech backend, bypassing platform probing
    #[cfg(test)]
    pub(crate) fn with_synth(config: Config, synth: Box<dyn Synth>) -> Self {
        Self {
            config,
            synth: Some(synth),
        }
    }

    /// Compose the outgoing message
    ///
    /// A literal message wins over a context key; with neither, the generic
    /// need_help template is used. The {name} placeholder is substituted
    /// and, when emotional prefixes are enabled, the tone prefix prepended.
    /// Unknown tones compose unprefixed.
    pub fn compose(
        &self,
        message: Option<&str>,
        context: Option<&str>,
        emotion: Option<&str>,
    ) -> String {
        let template = match message {
            Some(m) => m.to_string(),
            None => self.config.template(context.unwrap_or("need_help")).to_string(),
        };

        let mut composed = template.replace("{name}", &self.config.assistant_name);

        if self.config.emotional_prefix {
            if let Some(emotion) = emotion {
                let prefix = self.config.prefix(emotion);
                if !prefix.is_empty() {
                    composed = format!("{}{}", prefix, composed);
                }
            }
        }

        composed
    }

    /// Resolve the mode for this delivery
    ///
    /// Silent mode auto-unmutes when a recognized audio device is connected
    /// and auto-detection is enabled; the stored mode is never changed.
    fn effective_mode(&self) -> Mode {
        if self.config.mode != Mode::Silent || !self.config.auto_detect_audio {
            return self.config.mode;
        }

        let detector = AudioDetector::new(self.config.my_devices.clone());
        let check = detector.should_enable_voice();
        if check.enable {
            println!("Auto-enabling voice: {}", check.reason);
            info!("Silent mode auto-unmuted: {}", check.reason);
            Mode::Full
        } else {
            Mode::Silent
        }
    }

    /// Speak text, creating the platform backend on first use
    pub fn speak(&mut self, text: &str) -> Result<()> {
        if self.synth.is_none() {
            let synth = create_synth(&self.config.voice_language)?;
            info!("Speech backend: {}", synth.name());
            self.synth = Some(synth);
        }
        let rate = self.config.voice_rate;
        let synth = self
            .synth
            .as_mut()
            .ok_or_else(|| crate::VoiceError::Speech("no speech backend".to_string()))?;
        synth.speak(text, rate)
    }

    /// Send a full notification: console banner, popup, and speech
    ///
    /// The banner is printed in every mode; `off` only suppresses the
    /// speech channel.
    pub fn notify(
        &mut self,
        message: Option<&str>,
        context: Option<&str>,
        emotion: Option<&str>,
        details: Option<&str>,
    ) {
        let composed = self.compose(message, context, emotion);
        self.print_banner("Notification", &composed, details);

        if let Err(e) = notify::send(&self.config.assistant_name, &composed) {
            warn!("System notification failed: {}", e);
        }

        if self.effective_mode() == Mode::Full {
            if let Err(e) = self.speak(&composed) {
                warn!("Speech failed: {}", e);
            }
        }
    }

    /// Speak a literal message without a system notification
    pub fn say(&mut self, message: &str, emotion: Option<&str>, voice_only: bool) {
        let composed = self.compose(Some(message), None, emotion);

        if !voice_only {
            let header = format!("{} says", self.config.assistant_name);
            self.print_banner(&header, &composed, None);
        }

        if self.effective_mode() == Mode::Full {
            if let Err(e) = self.speak(&composed) {
                warn!("Speech failed: {}", e);
            }
        }
    }

    /// Console banner for every delivered message
    fn print_banner(&self, header: &str, message: &str, details: Option<&str>) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        println!("\n{}", "=".repeat(50));
        println!("{} - {}", header, timestamp);
        println!("Message: {}", message);
        if let Some(details) = details {
            println!("Details: {}", details);
        }
        println!("{}\n", "=".repeat(50));
    }

    /// Canned reply for the talk command
    ///
    /// Keyword-matched, intentionally simple; real conversation happens in
    /// the coding assistant, not here.
    pub fn reply_to(&self, input: &str) -> (String, &'static str) {
        let lower = input.to_lowercase();
        let name = &self.config.assistant_name;

        if lower.contains("hello") || lower.contains("hi ") || lower == "hi" {
            (format!("Hello! I'm {}, good to hear from you!", name), "excited")
        } else if lower.contains("thank") {
            ("You're welcome! Happy to help!".to_string(), "gentle")
        } else if lower.contains("how are you") {
            ("I'm doing fine, thanks for asking!".to_string(), "gentle")
        } else if lower.contains("who are you") {
            (format!("I'm {}, your voice assistant!", name), "excited")
        } else if lower.contains("test") {
            ("Test in progress. Voice output is working!".to_string(), "gentle")
        } else if QUIT_PHRASES.iter().any(|q| lower.contains(q)) {
            ("Goodbye! Call me any time.".to_string(), "gentle")
        } else {
            (format!("You said: {}. Interesting!", input), "thinking")
        }
    }

    /// One round of dialog-based input
    pub fn listen(&self) -> Result<Option<String>> {
        dialog::prompt(&self.config.assistant_name, "What would you like to say?")
    }

    /// Interactive conversation loop
    ///
    /// Reads input rounds until the user enters a quit phrase or input is
    /// exhausted.
    pub fn chat(&mut self) -> Result<()> {
        let greeting = format!(
            "Hello! I'm {}. Let's talk - say 'quit' to leave.",
            self.config.assistant_name
        );
        self.say(&greeting, Some("gentle"), false);

        loop {
            let Some(input) = self.listen()? else {
                // Dismissed dialog or stdin EOF - nothing more to read
                println!("No input, ending chat");
                return Ok(());
            };

            if is_quit_phrase(&input) {
                self.say("Goodbye! Nice talking to you!", Some("gentle"), false);
                return Ok(());
            }

            let (reply, emotion) = self.reply_to(&input);
            self.say(&reply, Some(emotion), false);
        }
    }

    /// Repeating input loop for hands-free operation
    ///
    /// Like chat, but announces itself once and keeps going on empty input
    /// until a quit phrase arrives.
    pub fn hotkey_loop(&mut self) -> Result<()> {
        println!("{} is listening. Say 'quit' to stop.", self.config.assistant_name);

        loop {
            match self.listen()? {
                Some(input) if is_quit_phrase(&input) => {
                    println!("Leaving listen mode");
                    return Ok(());
                }
                Some(input) => {
                    println!("Heard: {}", input);
                    let (reply, emotion) = self.reply_to(&input);
                    println!("{}: {}", self.config.assistant_name, reply);
                    self.say(&reply, Some(emotion), true);
                }
                None => {
                    // Dialog dismissed or empty input ends the loop to avoid
                    // an unclosable dialog storm
                    println!("No input, leaving listen mode");
                    return Ok(());
                }
            }
        }
    }

    /// Speak a short test phrase
    pub fn test_voice(&mut self) {
        println!("Testing voice output...");
        let text = format!(
            "Voice test. I am the {} voice assistant.",
            self.config.assistant_name
        );
        if let Err(e) = self.speak(&text) {
            println!("Voice test failed: {}", e);
        }
    }

    /// Interactive notification test via an OK/Cancel dialog
    pub fn test_notification(&mut self) {
        println!("Sending a test dialog, check your screen...");
        match dialog::confirm(
            &self.config.assistant_name,
            "This is a test notification. Click OK if you can see it.",
        ) {
            Ok(Choice::Ok) => {
                println!("Notification system works!");
                self.say("Great, the notification system works!", Some("excited"), false);
            }
            Ok(Choice::Cancel) => {
                println!("You clicked Cancel - at least the dialog showed up!");
            }
            Err(e) => {
                println!("Notification test failed: {}", e);
                println!("Hint: notification permissions may need to be granted");
            }
        }
    }
}

/// Does this input end an interactive session?
fn is_quit_phrase(input: &str) -> bool {
    let lower = input.to_lowercase();
    QUIT_PHRASES.iter().any(|q| lower == *q)
}
