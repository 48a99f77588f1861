//! Lookup of scrapers that already exist in the consuming registry

use std::collections::HashSet;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::catalog::error::CatalogError;

/// Trait for asking whether the registry already has a scraper
#[cfg_attr(test, automock)]
pub trait KnownRegistry {
    /// Whether a scraper with exactly this name exists, ignoring case
    fn contains(&self, name: &str) -> bool;
}

/// Whether the registry knows `name` under any of `prefixes` (`Prefix/name`)
pub fn has_equivalent(registry: &dyn KnownRegistry, prefixes: &[String], name: &str) -> bool {
    prefixes
        .iter()
        .any(|prefix| registry.contains(&format!("{}/{}", prefix, name)))
}

/// KnownRegistry backed by a list of scraper names
#[derive(Debug, Clone, Default)]
pub struct ListedRegistry {
    /// Lowercased names
    names: HashSet<String>,
}

impl ListedRegistry {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    /// Read one name per line; blank lines and `#` comments are skipped
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::RegistryList {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_names(
            raw.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }
}

impl KnownRegistry for ListedRegistry {
    fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> Vec<String> {
        vec!["Creators".to_string(), "GoComics".to_string()]
    }

    #[test]
    fn has_equivalent_checks_each_prefix() {
        let mut registry = MockKnownRegistry::new();
        registry
            .expect_contains()
            .withf(|name| name == "Creators/Zeta")
            .times(1)
            .return_const(false);
        registry
            .expect_contains()
            .withf(|name| name == "GoComics/Zeta")
            .times(1)
            .return_const(true);

        assert!(has_equivalent(&registry, &prefixes(), "Zeta"));
    }

    #[test]
    fn has_equivalent_is_false_for_unprefixed_match() {
        let registry = ListedRegistry::from_names(["Zeta"]);

        assert!(!has_equivalent(&registry, &prefixes(), "Zeta"));
    }

    #[test]
    fn listed_registry_matches_case_insensitively() {
        let registry = ListedRegistry::from_names(["GoComics/BlueMoon"]);

        assert!(registry.contains("gocomics/bluemoon"));
        assert!(has_equivalent(&registry, &prefixes(), "BLUEMOON"));
    }

    #[test]
    fn load_skips_comments_and_blank_lines() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("scrapers.txt");
        std::fs::write(&path, "# known scrapers\nCreators/Alpha\n\n  GoComics/Beta  \n").unwrap();

        let registry = ListedRegistry::load(&path).unwrap();

        assert!(registry.contains("Creators/Alpha"));
        assert!(registry.contains("GoComics/Beta"));
        assert!(!registry.contains("# known scrapers"));
    }

    #[test]
    fn load_fails_for_missing_list() {
        let result = ListedRegistry::load(Path::new("/nonexistent/scrapers.txt"));

        assert!(matches!(result, Err(CatalogError::RegistryList { .. })));
    }
}
