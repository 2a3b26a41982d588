//! System notification channel
//!
//! Posts a popup in the OS notification center. On macOS this tries
//! terminal-notifier first and falls back to osascript; on Linux it goes
//! through D-Bus via notify-rust. Failures never propagate past the
//! dispatch site.

use crate::Result;

/// Send a system notification popup
///
/// Title is the assistant's display name, message is the composed alert.
pub fn send(title: &str, message: &str) -> Result<()> {
    send_impl(title, message)
}

#[cfg(target_os = "macos")]
fn send_impl(title: &str, message: &str) -> Result<()> {
    use crate::VoiceError;
    use log::debug;
    use std::process::{Command, Stdio};

    // Method one: terminal-notifier, if installed
    let status = Command::new("terminal-notifier")
        .args(["-title", title, "-message", message, "-sound", "default"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    if let Ok(status) = status {
        if status.success() {
            debug!("Notification sent via terminal-notifier");
            return Ok(());
        }
    }

    // Method two: osascript display notification
    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(message),
        escape_applescript(title)
    );
    let output = Command::new("osascript")
        .args(["-e", &script])
        .output()
        .map_err(|e| VoiceError::Notify(format!("Failed to run osascript: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VoiceError::Notify(format!(
            "osascript notification failed: {}",
            stderr.trim()
        )));
    }
    debug!("Notification sent via osascript");
    Ok(())
}

#[cfg(target_os = "linux")]
fn send_impl(title: &str, message: &str) -> Result<()> {
    use crate::VoiceError;
    use log::debug;
    use notify_rust::Notification;

    Notification::new()
        .summary(title)
        .body(message)
        .icon("dialog-information")
        .timeout(5000)
        .show()
        .map_err(|e| VoiceError::Notify(format!("Failed to show notification: {}", e)))?;
    debug!("Notification sent via D-Bus");
    Ok(())
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn send_impl(title: &str, message: &str) -> Result<()> {
    log::warn!("No notification backend for this platform: {}: {}", title, message);
    Ok(())
}

/// Escape text for embedding in an AppleScript double-quoted string
#[cfg(any(target_os = "macos", test))]
pub(crate) fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_applescript() {
        assert_eq!(escape_applescript("plain"), "plain");
        assert_eq!(escape_applescript("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_applescript("back\\slash"), "back\\\\slash");
    }
}
