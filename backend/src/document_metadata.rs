use serde::{Serialize, Deserialize};

pub const SUBTITLE_MARKER: char = '*';
pub const TEXT_TYPE_MARKER: char = '+';
pub const GENRE_MARKER: char = '-';

/// Metadata shared by a document and the extracts taken from it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub date: String,
    pub text_type: Option<String>,
    pub genre: Option<String>,
    // citation or URL, the last line of the file
    pub source: String,
}

/// Returns the marker-stripped content of a line which begins with `marker`.
///
/// A marker followed by nothing is treated as an absent field.
pub fn marked_field(line: &str, marker: char) -> Option<String> {
    let content = line.trim().strip_prefix(marker)?.trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Subtitle lines are written as `*Subtitle*`. The closing marker is optional,
/// a line with only markers has no subtitle.
pub fn subtitle_field(line: &str) -> Option<String> {
    let rest = line.trim().strip_prefix(SUBTITLE_MARKER)?;
    let rest = rest.strip_suffix(SUBTITLE_MARKER).unwrap_or(rest).trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

/// Format a marked metadata slot for writing. Absent fields are written as a
/// blank line, so the slot position is preserved.
pub fn format_marked_field(value: Option<&str>, marker: char) -> String {
    match value {
        Some(v) => format!("{}{}", marker, v),
        None => String::new(),
    }
}
