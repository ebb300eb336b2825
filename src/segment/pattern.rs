//! Entry boundary detection.

use std::borrow::Cow;

use regex::Regex;

/// Compiled regular expression that marks the first line of a log entry.
///
/// The pattern is anchored at the start of the line, so `\d{4}-` only matches
/// lines that begin with a four digit year. The line terminator is not part of
/// the match, so a trailing `$` works. Invalid UTF-8 is replaced with U+FFFD
/// for matching only; the line itself is never altered.
#[derive(Debug, Clone)]
pub struct BoundaryPattern {
    source: String,
    regex: Regex,
}

impl BoundaryPattern {
    /// Compile `source` as a start-of-line boundary pattern.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        // Flags set inside the group (e.g. `(?m)`) stay scoped to it.
        let regex = Regex::new(&format!("^(?:{})", source))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written in the profile.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether `line` starts a new entry.
    pub fn is_entry_start(&self, line: &[u8]) -> bool {
        let text: Cow<'_, str> = String::from_utf8_lossy(strip_terminator(line));
        self.regex.is_match(&text)
    }
}

/// Drop a trailing `\n` or `\r\n`.
fn strip_terminator(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}
