//! Cache key derivation

use std::fmt;

/// Canonical form of input text used to address the result cache
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Cache key derived from raw input text.
///
/// Inputs that differ only in letter case or surrounding whitespace share a
/// key. The key is never shown to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn from_text(text: &str) -> Self {
        Self(normalize(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
