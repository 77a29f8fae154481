//! Field extraction from the player's web interface status document.
//!
//! The web interface serves `variables.html`, a flat page of
//! `<p id="...">value</p>` elements. We only ever need four of them.

use regex::Regex;

/// Raw field values scraped from one poll of the status document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawStatus {
    pub filepath: String,
    pub state_code: String,
    pub duration: String,
    pub position: String,
}

/// Extracts the named status fields out of a status document.
///
/// Patterns are compiled once and reused across poll cycles.
pub struct StatusExtractor {
    filepath: Regex,
    state: Regex,
    duration: Regex,
    position: Regex,
}

impl StatusExtractor {
    pub fn new() -> Self {
        Self {
            filepath: field_pattern("filepath"),
            state: field_pattern("state"),
            duration: field_pattern("durationstring"),
            position: field_pattern("positionstring"),
        }
    }

    /// Pull all four fields out of a status document.
    ///
    /// A malformed or partial document yields empty fields, never an error;
    /// the first occurrence wins if an id is duplicated.
    pub fn extract(&self, document: &str) -> RawStatus {
        RawStatus {
            filepath: first_capture(&self.filepath, document),
            state_code: first_capture(&self.state, document),
            duration: first_capture(&self.duration, document),
            position: first_capture(&self.position, document),
        }
    }
}

impl Default for StatusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn field_pattern(id: &str) -> Regex {
    Regex::new(&format!(r#"<p id="{id}">([^<]*)</p>"#)).expect("field pattern is valid")
}

fn first_capture(re: &Regex, document: &str) -> String {
    re.captures(document)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
