//! The pending-translation marker.

use std::fmt;

pub const DEFAULT_PENDING_MARKER: &str = "[SRC] ";

/// Prefix marking a locale value that still holds untranslated seed text.
///
/// The same marker is used when writing, detecting and stripping, so a
/// project never mixes two spellings of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMarker(String);

impl PendingMarker {
    pub fn new(marker: impl Into<String>) -> Self {
        Self(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix `text` with the marker. Already-marked text is not marked twice.
    pub fn wrap(&self, text: &str) -> String {
        format!("{}{}", self.0, self.strip(text))
    }

    /// The seed text without the marker; unmarked values come back unchanged.
    pub fn strip<'a>(&self, value: &'a str) -> &'a str {
        value.strip_prefix(self.0.as_str()).unwrap_or(value)
    }

    pub fn is_pending(&self, value: &str) -> bool {
        value.starts_with(self.0.as_str())
    }
}

impl Default for PendingMarker {
    fn default() -> Self {
        Self::new(DEFAULT_PENDING_MARKER)
    }
}

impl fmt::Display for PendingMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
