//! Registration statements generated from the persisted catalog

use std::fmt;

use tracing::debug;

use crate::catalog::entry::Catalog;
use crate::catalog::error::CatalogError;
use crate::catalog::registry::{KnownRegistry, has_equivalent};
use crate::catalog::store::CatalogStore;
use crate::config::{CatalogPolicy, ReportConfig};

/// One `add(name, url)` registration call.
///
/// Rendered commented out when the registry already has the scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: String,
    pub url: String,
    pub already_known: bool,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.already_known {
            f.write_str("#")?;
        }
        write!(
            f,
            "add({}, {})",
            quote_literal(&self.name),
            quote_literal(&self.url)
        )
    }
}

/// Single-quoted string literal with `\` and `'` escaped
fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

pub struct ReportGenerator<'a> {
    policy: &'a CatalogPolicy,
    config: &'a ReportConfig,
    registry: &'a dyn KnownRegistry,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(
        policy: &'a CatalogPolicy,
        config: &'a ReportConfig,
        registry: &'a dyn KnownRegistry,
    ) -> Self {
        Self {
            policy,
            config,
            registry,
        }
    }

    /// Load the persisted catalog and generate statements for entries with at
    /// least `minimum_count` strips.
    pub fn report(
        &self,
        store: &CatalogStore,
        minimum_count: u64,
    ) -> Result<Vec<Statement>, CatalogError> {
        let catalog = store.load()?;
        Ok(self.statements(&catalog, minimum_count))
    }

    /// Generate statements for `catalog`, sorted by name
    pub fn statements(&self, catalog: &Catalog, minimum_count: u64) -> Vec<Statement> {
        catalog
            .iter()
            .filter(|entry| !self.policy.is_excluded(&entry.name))
            .filter(|entry| {
                let keep = entry.count >= minimum_count;
                if !keep {
                    debug!(
                        "Dropping {}: {} strips below {}",
                        entry.name, entry.count, minimum_count
                    );
                }
                keep
            })
            .map(|entry| Statement {
                name: entry.name.clone(),
                url: self.rewrite_url(&entry.url),
                already_known: has_equivalent(
                    self.registry,
                    &self.config.registry_prefixes,
                    &entry.name,
                ),
            })
            .collect()
    }

    fn rewrite_url(&self, url: &str) -> String {
        if self.config.legacy_domain.is_empty() {
            return url.to_string();
        }
        url.replace(&self.config.legacy_domain, &self.config.current_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::CatalogEntry;
    use crate::catalog::registry::ListedRegistry;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert(CatalogEntry::new("Zeta", "http://zeta.comicgenesis.com/", 80));
        catalog.insert(CatalogEntry::new("Alpha", "http://alpha.comicgen.com/", 120));
        catalog.insert(CatalogEntry::new("Tiny", "http://tiny.comicgenesis.com/", 3));
        catalog.insert(CatalogEntry::new("Gone", "http://gone.comicgenesis.com/", 500));
        catalog
    }

    #[test]
    fn statements_filter_sort_and_mark_known_entries() {
        let policy = CatalogPolicy::new(["Gone"], Vec::<(String, String)>::new());
        let config = ReportConfig::default();
        let registry = ListedRegistry::from_names(["gocomics/zeta"]);

        let statements = ReportGenerator::new(&policy, &config, &registry)
            .statements(&catalog(), 20)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        assert_eq!(
            statements,
            vec![
                "add('Alpha', 'http://alpha.comicgenesis.com/')",
                "#add('Zeta', 'http://zeta.comicgenesis.com/')",
            ]
        );
    }

    #[test]
    fn statements_keep_entries_exactly_at_threshold() {
        let policy = CatalogPolicy::new(Vec::<String>::new(), Vec::<(String, String)>::new());
        let config = ReportConfig::default();
        let registry = ListedRegistry::default();

        let names: Vec<_> = ReportGenerator::new(&policy, &config, &registry)
            .statements(&catalog(), 80)
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["Alpha", "Gone", "Zeta"]);
    }

    #[test]
    fn rewrite_url_replaces_every_legacy_occurrence_once() {
        let policy = CatalogPolicy::default();
        let config = ReportConfig::default();
        let registry = ListedRegistry::default();
        let generator = ReportGenerator::new(&policy, &config, &registry);

        assert_eq!(
            generator.rewrite_url("http://a.comicgen.com/?r=comicgen.com"),
            "http://a.comicgenesis.com/?r=comicgenesis.com"
        );
        assert_eq!(
            generator.rewrite_url("http://a.comicgenesis.com/"),
            "http://a.comicgenesis.com/"
        );
    }

    #[test]
    fn statement_escapes_quotes_in_literals() {
        let statement = Statement {
            name: "Odd".to_string(),
            url: r"http://odd.example/it's\here".to_string(),
            already_known: false,
        };

        assert_eq!(
            statement.to_string(),
            r"add('Odd', 'http://odd.example/it\'s\\here')"
        );
    }
}
