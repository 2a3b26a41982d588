//! Platform detection
//!
//! The speech ladder cares about one distinction beyond the OS name: WSL,
//! where audio may only be reachable through the Windows side (PowerShell
//! SAPI) even though the process believes it is on Linux.

use std::fs;

/// Detect if running in WSL (Windows Subsystem for Linux)
///
/// Looks for the Microsoft kernel tag in /proc/version and the distro
/// environment variable WSL sets for every session.
pub fn is_wsl() -> bool {
    if let Ok(contents) = fs::read_to_string("/proc/version") {
        let lower = contents.to_lowercase();
        if lower.contains("microsoft") || lower.contains("wsl") {
            return true;
        }
    }

    std::env::var("WSL_DISTRO_NAME").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wsl_never_panics() {
        // The answer depends on where the tests run; only the probe
        // itself is being exercised here
        let _ = is_wsl();
    }
}
