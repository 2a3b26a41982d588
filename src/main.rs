//! codevoice main entry point
//!
//! The full assistant CLI. Every sub-command maps to a canned message
//! template or a raw pass-through message; all delivery failures degrade to
//! console output and the process exits zero.

use clap::{Parser, Subcommand, ValueEnum};
use codevoice::assistant::Assistant;
use codevoice::config::{coerce_value, Config, Mode};
use log::debug;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codevoice", version, about = "Voice and desktop alerts for coding-assistant sessions")]
struct Cli {
    /// Path to the config file (default: ./.codevoice.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Tone selecting a textual prefix
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Emotion {
    Urgent,
    Gentle,
    Excited,
    Worried,
    Thinking,
}

impl Emotion {
    fn as_str(self) -> &'static str {
        match self {
            Emotion::Urgent => "urgent",
            Emotion::Gentle => "gentle",
            Emotion::Excited => "excited",
            Emotion::Worried => "worried",
            Emotion::Thinking => "thinking",
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a custom notification
    Notify {
        /// Literal message; omitted means the context template is used
        message: Option<String>,

        /// Context key selecting a canned template
        #[arg(long)]
        context: Option<String>,

        /// Tone prefix
        #[arg(long)]
        emotion: Option<Emotion>,

        /// Extra details shown in the console banner
        #[arg(long)]
        details: Option<String>,
    },

    /// Notify that the assistant is blocked
    Blocked { emotion: Option<Emotion> },

    /// Notify that the assistant needs help
    HelpMe { emotion: Option<Emotion> },

    /// Notify that the task is completed
    Completed,

    /// Notify about an error
    Error { details: Option<String> },

    /// Notify about a git conflict
    GitConflict,

    /// Notify about failing tests
    TestFailed { details: Option<String> },

    /// Notify about a broken build
    BuildError,

    /// Notify that changes are ready for review
    Review,

    /// Speak a free-form message
    Say {
        /// Words to speak
        #[arg(required = true)]
        message: Vec<String>,

        /// Tone prefix
        #[arg(long)]
        emotion: Option<Emotion>,

        /// Voice only, skip the console banner
        #[arg(long)]
        voice_only: bool,
    },

    /// Say something to the assistant and hear a canned reply
    Talk {
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Interactive conversation loop
    Chat,

    /// One round of dialog-based input
    Listen {
        /// Direct message instead of a dialog (for testing)
        message: Vec<String>,
    },

    /// Repeating hands-free input loop
    Hotkey,

    /// Test voice output
    TestVoice,

    /// Test the interactive notification dialog
    TestNotification,

    /// Show or set the notification mode
    Mode {
        /// full, silent, or off; omitted shows the current mode
        mode: Option<Mode>,
    },

    /// Show or change configuration
    Config {
        /// Print the current configuration
        #[arg(long)]
        show: bool,

        /// Set a single top-level key
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,

        /// Add a recognized audio device
        #[arg(long, value_name = "DEVICE")]
        add_device: Option<String>,

        /// Remove a recognized audio device
        #[arg(long, value_name = "DEVICE")]
        remove_device: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger; debug flag raises the filter level
    if cli.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Warn)
            .init();
    }
    debug!("codevoice {} starting", codevoice::VERSION);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Delivery still works with defaults; report and carry on
            eprintln!("Warning: failed to load config ({}), using defaults", e);
            Config::default()
        }
    };

    if let Err(e) = run(cli.command, config) {
        eprintln!("Error: {}", e);
    }
}

fn run(command: Command, config: Config) -> codevoice::Result<()> {
    let mut assistant = Assistant::new(config);

    match command {
        Command::Notify {
            message,
            context,
            emotion,
            details,
        } => {
            assistant.notify(
                message.as_deref(),
                context.as_deref(),
                emotion.map(Emotion::as_str),
                details.as_deref(),
            );
        }

        Command::Blocked { emotion } => {
            assistant.notify(None, Some("blocked"), emotion.map(Emotion::as_str), None);
        }
        Command::HelpMe { emotion } => {
            assistant.notify(None, Some("need_help"), emotion.map(Emotion::as_str), None);
        }
        Command::Completed => {
            assistant.notify(None, Some("task_completed"), Some("excited"), None);
        }
        Command::Error { details } => {
            assistant.notify(None, Some("error"), Some("worried"), details.as_deref());
        }
        Command::GitConflict => {
            assistant.notify(None, Some("git_conflict"), Some("urgent"), None);
        }
        Command::TestFailed { details } => {
            assistant.notify(None, Some("test_failed"), Some("worried"), details.as_deref());
        }
        Command::BuildError => {
            assistant.notify(None, Some("build_error"), Some("worried"), None);
        }
        Command::Review => {
            assistant.notify(None, Some("review_required"), Some("gentle"), None);
        }

        Command::Say {
            message,
            emotion,
            voice_only,
        } => {
            let message = message.join(" ");
            assistant.say(&message, emotion.map(Emotion::as_str), voice_only);
        }

        Command::Talk { message } => {
            let message = message.join(" ");
            println!("You said: {}", message);
            let (reply, emotion) = assistant.reply_to(&message);
            assistant.say(&reply, Some(emotion), false);
        }

        Command::Chat => assistant.chat()?,

        Command::Listen { message } => {
            if !message.is_empty() {
                // Pass-through for scripted testing
                let message = message.join(" ");
                println!("Received: {}", message);
            } else {
                match assistant.listen()? {
                    Some(input) => println!("Heard: {}", input),
                    None => println!("Nothing received"),
                }
            }
        }

        Command::Hotkey => assistant.hotkey_loop()?,

        Command::TestVoice => assistant.test_voice(),

        Command::TestNotification => assistant.test_notification(),

        Command::Mode { mode } => match mode {
            Some(mode) => {
                assistant.config.set_mode(mode)?;
                println!("Mode switched to: {}", mode);
            }
            None => println!("Current mode: {}", assistant.config.mode),
        },

        Command::Config {
            show,
            set,
            add_device,
            remove_device,
        } => {
            let nothing_selected = set.is_none() && add_device.is_none() && remove_device.is_none();

            if show || nothing_selected {
                println!("Current configuration:");
                println!("{}", serde_json::to_string_pretty(&assistant.config)?);
            }

            if let Some(pair) = set {
                // num_args = 2 guarantees exactly key and value
                let (key, value) = (&pair[0], &pair[1]);
                assistant.config.set_key(key, coerce_value(value))?;
                println!("Updated {} = {}", key, value);
            }

            if let Some(device) = add_device {
                if assistant.config.add_device(&device)? {
                    println!("Added device: {}", device);
                } else {
                    println!("Device already present: {}", device);
                }
            }

            if let Some(device) = remove_device {
                if assistant.config.remove_device(&device)? {
                    println!("Removed device: {}", device);
                } else {
                    println!("No such device: {}", device);
                }
            }
        }
    }

    Ok(())
}
