//! Catalog entries keyed by normalized name

use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    /// Absolute reference to the entry's archive
    pub url: String,
    /// Number of strips advertised at `url`
    pub count: u64,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            count,
        }
    }
}

/// Result of inserting into a [`Catalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// Same exact name already present; the first entry is kept
    Duplicate,
    /// A name differing only in case is already present
    Collision { existing: String },
}

/// Entries keyed by exact name, iterated in sorted order.
///
/// No two names may be equal ignoring case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
    /// lowercase name -> exact name
    folded: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` unless its name, compared case-insensitively, is taken
    pub fn insert(&mut self, entry: CatalogEntry) -> InsertOutcome {
        if self.entries.contains_key(&entry.name) {
            return InsertOutcome::Duplicate;
        }

        let folded = entry.name.to_lowercase();
        if let Some(existing) = self.folded.get(&folded) {
            return InsertOutcome::Collision {
                existing: existing.clone(),
            };
        }

        self.folded.insert(folded, entry.name.clone());
        self.entries.insert(entry.name.clone(), entry);
        InsertOutcome::Inserted
    }

    /// Exact name stored under the same lowercase form as `name`, if any
    pub fn find_case_insensitive(&self, name: &str) -> Option<&str> {
        self.folded.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }
}
