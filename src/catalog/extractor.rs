//! Index page entry extraction
//!
//! Each entry on an index page looks like:
//!
//! ```text
//! <div class="comictitle"><strong><a target="_blank" onclick="..." href="http://collegepros.comicgenesis.com">Adventures of the College Pros</a>
//! ...
//! Number of Days: 412
//! ```
//!
//! The count marker has to follow its title before the next entry starts.

use std::iter::Peekable;

use regex::{CaptureMatches, Regex};
use thiserror::Error;

/// How far past a title the count marker is searched for
pub const COUNT_SCAN_WINDOW: usize = 2048;

/// Amount of following text kept in an anomaly report
pub const ANOMALY_CONTEXT_LEN: usize = 300;

/// One title link and its count, before name normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Link target as written on the page
    pub url: String,
    /// Visible link text, still entity-escaped
    pub name: String,
    pub count: u64,
}

/// What is wrong with the count following a title
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnomalyKind {
    #[error("No count marker")]
    MissingCount,
    #[error("Count {0} out of range")]
    CountOutOfRange(String),
}

/// A title matched but the page deviates from the expected template around it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} after {name:?}: {context:?}")]
pub struct StructuralAnomaly {
    pub kind: AnomalyKind,
    pub name: String,
    /// Text following the title, truncated to [`ANOMALY_CONTEXT_LEN`] bytes
    pub context: String,
}

/// Extractor for entries on a single index page
pub struct EntryExtractor {
    /// Regex for the title block: marker div, then the link with an absolute href
    entry_re: Regex,
    /// Regex for the count marker: `Number of Days: 123`
    count_re: Regex,
}

impl EntryExtractor {
    pub fn new() -> Self {
        Self {
            // Match: <div class="comictitle"><strong><a ... href="http://...">Title</a>
            entry_re: Regex::new(
                r#"<div class="comictitle"><strong><\s*(?i:a)\s+(?:[^>]*\s+)?(?i:href)\s*=\s*"(https?://[^"]+)"[^>]*>([^<]+)</a>"#,
            )
            .unwrap(),
            // Match: Number of Days: 123
            count_re: Regex::new(r"Number of Days: (\d+)").unwrap(),
        }
    }

    /// Lazily extract entries from `page` in document order
    pub fn extract<'e, 'h>(&'e self, page: &'h str) -> Entries<'e, 'h> {
        Entries {
            extractor: self,
            page,
            matches: self.entry_re.captures_iter(page).peekable(),
        }
    }
}

impl Default for EntryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the entries of one page, see [`EntryExtractor::extract`]
pub struct Entries<'e, 'h> {
    extractor: &'e EntryExtractor,
    page: &'h str,
    matches: Peekable<CaptureMatches<'e, 'h>>,
}

impl Iterator for Entries<'_, '_> {
    type Item = Result<RawEntry, StructuralAnomaly>;

    fn next(&mut self) -> Option<Self::Item> {
        let caps = self.matches.next()?;
        let end = caps.get(0)?.end();
        let url = caps.get(1)?.as_str().to_string();
        let name = caps.get(2)?.as_str().to_string();

        // Never look past the start of the next title
        let next_start = self
            .matches
            .peek()
            .and_then(|next| next.get(0))
            .map_or(self.page.len(), |m| m.start());
        let limit = floor_char_boundary(self.page, (end + COUNT_SCAN_WINDOW).min(next_start));

        let digits = self
            .extractor
            .count_re
            .captures(&self.page[end..limit])
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());

        let kind = match digits {
            Some(digits) => match digits.parse::<u64>() {
                Ok(count) => return Some(Ok(RawEntry { url, name, count })),
                Err(_) => AnomalyKind::CountOutOfRange(digits.to_string()),
            },
            None => AnomalyKind::MissingCount,
        };

        let context_end = floor_char_boundary(self.page, end + ANOMALY_CONTEXT_LEN);
        Some(Err(StructuralAnomaly {
            kind,
            name,
            context: self.page[end..context_end].to_string(),
        }))
    }
}

/// Largest char boundary of `s` that is <= `index`
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
