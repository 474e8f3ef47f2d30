//! Shared formatting helpers for chat replies and atomic file writes.

use chrono::Duration;
use std::io::{self, Write};
use std::path::Path;

/// Formats a count with thousands separators, e.g. `12,345`.
pub fn format_number(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a remaining cooldown as `1h 5m`, `4m 10s` or `9s`.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Renders a fixed-width text progress bar.
///
/// A `total` of zero renders as a full bar.
pub fn progress_bar(current: u64, total: u64, width: usize) -> String {
    let filled = if total == 0 {
        width
    } else {
        let ratio = (u128::from(current.min(total)) * width as u128) / u128::from(total);
        usize::try_from(ratio).unwrap_or(width)
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Writes `contents` to `path` through a temporary file in the same
/// directory, so readers only ever see the old or the new file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
