//! Interactive dialogs and dialog-based text input
//!
//! Wraps the OS dialog command (osascript on macOS, zenity on Linux) for
//! the two interactive surfaces: an OK/Cancel confirmation box and a text
//! entry prompt. When no dialog command works, text entry falls back to
//! reading a line from stdin.

use crate::{Result, VoiceError};
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::process::Command;

/// Outcome of a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Ok,
    Cancel,
}

/// Show an OK/Cancel dialog and report which button was pressed
pub fn confirm(title: &str, message: &str) -> Result<Choice> {
    confirm_impl(title, message)
}

/// Show a text entry dialog, falling back to stdin
///
/// Returns None when the user entered nothing or dismissed the dialog.
pub fn prompt(title: &str, message: &str) -> Result<Option<String>> {
    match prompt_impl(title, message) {
        Ok(answer) => Ok(answer),
        Err(e) => {
            warn!("Dialog input failed, falling back to stdin: {}", e);
            prompt_stdin(message)
        }
    }
}

/// Read a line from stdin as the last-resort input path
fn prompt_stdin(message: &str) -> Result<Option<String>> {
    print!("{} ", message);
    io::stdout().flush()?;

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Ok(None); // EOF
    }
    let trimmed = line.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

#[cfg(target_os = "macos")]
fn confirm_impl(title: &str, message: &str) -> Result<Choice> {
    use crate::notify::escape_applescript;

    let script = format!(
        "set userResponse to display dialog \"{}\" with title \"{}\" \
         buttons {{\"Cancel\", \"OK\"}} default button \"OK\"\n\
         return button returned of userResponse",
        escape_applescript(message),
        escape_applescript(title)
    );
    let output = run_osascript(&script)?;
    debug!("Dialog response: {}", output);
    if output == "OK" {
        Ok(Choice::Ok)
    } else {
        Ok(Choice::Cancel)
    }
}

#[cfg(target_os = "macos")]
fn prompt_impl(title: &str, message: &str) -> Result<Option<String>> {
    use crate::notify::escape_applescript;

    let script = format!(
        "try\n\
         set userResponse to (display dialog \"{}\" default answer \"\" with title \"{}\")\n\
         return text returned of userResponse\n\
         on error\n\
         return \"\"\n\
         end try",
        escape_applescript(message),
        escape_applescript(title)
    );
    let output = run_osascript(&script)?;
    if output.is_empty() {
        Ok(None)
    } else {
        Ok(Some(output))
    }
}

#[cfg(target_os = "macos")]
fn run_osascript(script: &str) -> Result<String> {
    let output = Command::new("osascript")
        .args(["-e", script])
        .output()
        .map_err(|e| VoiceError::Dialog(format!("Failed to run osascript: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VoiceError::Dialog(format!(
            "osascript dialog failed: {}",
            stderr.trim()
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(not(target_os = "macos"))]
fn confirm_impl(title: &str, message: &str) -> Result<Choice> {
    let status = Command::new("zenity")
        .args(["--question", "--title", title, "--text", message])
        .status()
        .map_err(|e| VoiceError::Dialog(format!("Failed to run zenity: {}", e)))?;
    debug!("zenity question exit: {}", status);
    if status.success() {
        Ok(Choice::Ok)
    } else {
        Ok(Choice::Cancel)
    }
}

#[cfg(not(target_os = "macos"))]
fn prompt_impl(title: &str, message: &str) -> Result<Option<String>> {
    let output = Command::new("zenity")
        .args(["--entry", "--title", title, "--text", message])
        .output()
        .map_err(|e| VoiceError::Dialog(format!("Failed to run zenity: {}", e)))?;

    // Non-zero status means the dialog was dismissed
    if !output.status.success() {
        return Ok(None);
    }
    let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer))
    }
}
