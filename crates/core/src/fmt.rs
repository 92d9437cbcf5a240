// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Human-readable byte and duration formatting for CLI output.

use std::time::Duration;

const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

/// Format a byte count with a binary-unit suffix, one decimal place.
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

/// Coarse duration formatting: seconds under a minute, then minutes,
/// then hours with minutes.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
#[path = "fmt_tests.rs"]
mod tests;
