//! codevoice - voice and desktop alerts for unattended coding sessions
//!
//! Lets an automated coding assistant surface attention-requiring events to
//! a human through text-to-speech and OS notification popups. Everything is
//! synchronous, best-effort glue around external OS commands.

pub mod assistant;
pub mod audio;
pub mod chain;
pub mod config;
pub mod dialog;
pub mod error;
pub mod notify;
pub mod platform;
pub mod speech;

pub use error::{Result, VoiceError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "codevoice";
