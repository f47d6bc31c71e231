use crate::provider::metadata::TrackMetadata;

/// Upper bound on lines a poster excerpt may hold.
pub const MAX_SELECTED_LINES: usize = 5;

/// Shown in place of lyrics for instrumental tracks.
pub const INSTRUMENTAL_PLACEHOLDER: &str =
    "This track is instrumental.\nLet the melody speak\nwhere the words are missing.";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LyricsError {
    #[error("no lyrics available for '{0}'")]
    NoLyricsAvailable(String),

    #[error("invalid line selection '{selection}': {reason}")]
    InvalidSelection { selection: String, reason: String },
}

/// Source of a track's lyric lines.
pub trait LyricsProvider: Send + Sync {
    /// Lyric lines in order. Instrumental or unknown tracks report
    /// [`LyricsError::NoLyricsAvailable`].
    fn lyrics(&self, track: &TrackMetadata) -> Result<Vec<String>, LyricsError>;
}

/// Join lines `start..=end` (1-based, from a `"start-end"` selection) with newlines.
pub fn select_lines(lines: &[String], selection: &str) -> Result<String, LyricsError> {
    let invalid = |reason: String| LyricsError::InvalidSelection {
        selection: selection.to_string(),
        reason,
    };

    let (start, end) = selection
        .split_once('-')
        .ok_or_else(|| invalid("expected 'start-end'".to_string()))?;
    let start: usize = start
        .trim()
        .parse()
        .map_err(|_| invalid(format!("'{start}' is not a line number")))?;
    let end: usize = end
        .trim()
        .parse()
        .map_err(|_| invalid(format!("'{end}' is not a line number")))?;

    if start == 0 || end < start {
        return Err(invalid("range must satisfy 1 <= start <= end".to_string()));
    }
    if end > lines.len() {
        return Err(invalid(format!("lyrics only have {} lines", lines.len())));
    }
    if end - start + 1 > MAX_SELECTED_LINES {
        return Err(invalid(format!(
            "at most {MAX_SELECTED_LINES} lines can be selected"
        )));
    }

    Ok(lines[start - 1..end]
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[cfg(test)]
#[path = "../../tests/unit/provider/lyrics.rs"]
mod tests;
