//! Catalog construction from the paginated index

use tracing::{debug, error, info, warn};

use crate::catalog::entry::{Catalog, CatalogEntry, InsertOutcome};
use crate::catalog::error::CatalogError;
use crate::catalog::extractor::EntryExtractor;
use crate::catalog::normalize::normalize_name;
use crate::catalog::store::CatalogStore;
use crate::config::CatalogPolicy;
use crate::fetch::PageFetcher;

/// Counters for one merged page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStats {
    pub added: usize,
    pub excluded: usize,
    pub duplicates: usize,
    pub collisions: usize,
    pub anomalies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionOutcome {
    Merged(PageStats),
    FetchFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionReport {
    pub key: String,
    pub url: String,
    pub outcome: PartitionOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub catalog: Catalog,
    pub partitions: Vec<PartitionReport>,
}

impl BuildReport {
    pub fn failed_partitions(&self) -> impl Iterator<Item = &PartitionReport> {
        self.partitions
            .iter()
            .filter(|p| matches!(p.outcome, PartitionOutcome::FetchFailed(_)))
    }
}

/// Page reference for one partition; `{}` in `base_pattern` is replaced by `key`
pub fn partition_url(base_pattern: &str, key: &str) -> String {
    base_pattern.replace("{}", key)
}

pub struct CatalogBuilder<'a> {
    policy: &'a CatalogPolicy,
    extractor: EntryExtractor,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(policy: &'a CatalogPolicy) -> Self {
        Self {
            policy,
            extractor: EntryExtractor::new(),
        }
    }

    /// Fetch every partition in order and merge its entries into a fresh catalog.
    ///
    /// A partition whose page cannot be fetched is logged and skipped.
    pub async fn build(
        &self,
        fetcher: &dyn PageFetcher,
        base_pattern: &str,
        partition_keys: &[String],
    ) -> BuildReport {
        let mut catalog = Catalog::new();
        let mut partitions = Vec::with_capacity(partition_keys.len());

        for key in partition_keys {
            let url = partition_url(base_pattern, key);
            info!("Parsing {}", url);

            let outcome = match fetcher.fetch_page(&url).await {
                Ok(page) => PartitionOutcome::Merged(self.merge_page(&page, &mut catalog)),
                Err(e) => {
                    error!("Failed to fetch {}: {}", url, e);
                    PartitionOutcome::FetchFailed(e.to_string())
                }
            };

            partitions.push(PartitionReport {
                key: key.clone(),
                url,
                outcome,
            });
        }

        BuildReport {
            catalog,
            partitions,
        }
    }

    /// Build the catalog and persist it; nothing is written if persisting fails midway.
    pub async fn run(
        &self,
        fetcher: &dyn PageFetcher,
        base_pattern: &str,
        partition_keys: &[String],
        store: &CatalogStore,
    ) -> Result<BuildReport, CatalogError> {
        let report = self.build(fetcher, base_pattern, partition_keys).await;
        store.save(&report.catalog)?;
        Ok(report)
    }

    /// Merge the entries of one page into `catalog`
    pub fn merge_page(&self, page: &str, catalog: &mut Catalog) -> PageStats {
        let mut stats = PageStats::default();

        for raw in self.extractor.extract(page) {
            let raw = match raw {
                Ok(raw) => raw,
                Err(anomaly) => {
                    error!("{}", anomaly);
                    stats.anomalies += 1;
                    continue;
                }
            };

            let name = normalize_name(&raw.name);
            if name.is_empty() || self.policy.is_excluded(&name) {
                debug!("Excluding {:?}", raw.name);
                stats.excluded += 1;
                continue;
            }

            let url = match self.policy.override_for(&name) {
                Some(url) => url.to_string(),
                None => format!("{}/", raw.url),
            };

            match catalog.insert(CatalogEntry::new(name.clone(), url, raw.count)) {
                InsertOutcome::Inserted => stats.added += 1,
                InsertOutcome::Duplicate => {
                    warn!("Skipping duplicate {}", name);
                    stats.duplicates += 1;
                }
                InsertOutcome::Collision { existing } => {
                    // The registry cannot hold two names differing only in case
                    warn!("Skipping possible duplicate {} (already have {})", name, existing);
                    stats.collisions += 1;
                }
            }
        }

        stats
    }
}
