//! Persisted catalog
//!
//! The catalog is stored as one flat JSON object, keys sorted:
//!
//! ```json
//! {
//!   "Alpha": ["http://alpha.comicgenesis.com/", 120],
//!   "Zeta": ["http://zeta.comicgenesis.com/", 8]
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::catalog::entry::{Catalog, CatalogEntry, InsertOutcome};
use crate::catalog::error::CatalogError;

pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `catalog` into its on-disk form
    pub fn encode(catalog: &Catalog) -> Result<Vec<u8>, CatalogError> {
        let document: BTreeMap<&str, (&str, u64)> = catalog
            .iter()
            .map(|entry| (entry.name.as_str(), (entry.url.as_str(), entry.count)))
            .collect();

        let mut bytes = serde_json::to_vec_pretty(&document)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Write the catalog atomically: readers see either the old file or the new one
    pub fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        let bytes = Self::encode(catalog)?;
        let write_error = |source| CatalogError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_error)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_error)?;
        tmp.write_all(&bytes).map_err(write_error)?;
        tmp.as_file().sync_all().map_err(write_error)?;
        tmp.persist(&self.path).map_err(|e| write_error(e.error))?;

        info!("Saved {} entries to {:?}", catalog.len(), self.path);
        Ok(())
    }

    /// Load the whole catalog
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let unreadable = |reason: String| CatalogError::Unreadable {
            path: self.path.clone(),
            reason,
        };

        let raw = std::fs::read_to_string(&self.path).map_err(|e| unreadable(e.to_string()))?;
        let document: BTreeMap<String, (String, u64)> =
            serde_json::from_str(&raw).map_err(|e| unreadable(e.to_string()))?;

        let mut catalog = Catalog::new();
        for (name, (url, count)) in document {
            if name.is_empty() {
                warn!("Ignoring entry with empty name in {:?}", self.path);
                continue;
            }
            if let InsertOutcome::Collision { existing } =
                catalog.insert(CatalogEntry::new(name.clone(), url, count))
            {
                warn!("Ignoring {} in {:?}: collides with {}", name, self.path, existing);
            }
        }

        debug!("Loaded {} entries from {:?}", catalog.len(), self.path);
        Ok(catalog)
    }
}
