use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Fetch-related constants
// =============================================================================

/// Timeout for a single page or release fetch in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("stripscan/", env!("CARGO_PKG_VERSION"));

/// Index page pattern; `{}` is replaced by the partition key
pub const DEFAULT_BASE_PATTERN: &str = "http://guide.comicgenesis.com/Keenspace_{}.html";

/// One index page per leading digit/letter
pub const DEFAULT_PARTITION_KEYS: &str = "0ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const DEFAULT_RELEASE_ENDPOINT: &str =
    "https://api.github.com/repos/webcomics/dosage/releases/latest";

/// Offered to installer platforms when the release ships no installer asset
pub const DEFAULT_FALLBACK_URL: &str = "https://dosage.rocks/";

pub const INSTALLER_CONTENT_TYPE: &str = "application/x-msdos-program";

/// Entries that are dead or malformed upstream
const DEFAULT_EXCLUSIONS: &[&str] = &[
    "10", // page is gone
    "54sinRed", // 403 forbidden
    "6D4", // redirected to another page
    "AaaSoCAwesomenessandaSliceofCheese", // broken images
    "AcrossthePond", // page moved
    "ACDeceptibotscomic", // no images
    "AdamandSei", // 403 forbidden
    "AdamsRoadGang", // page is gone
    "ADVENTURERS", // page is gone
    "AiYaiYai", // page moved
    "AlltheCommies", // missing images
    "AltaModaMetro", // redirected
    "AltarGirl", // redirected
    "Amerika", // no images
    "Angels", // 403 forbidden
    "AngryDMonkey", // redirected
    "Angst", // redirected
    "Animenifesto", // too few images
    "Anna", // no images
    "Arcana", // archive broken
    "Area15", // no images
    "BaidheTu", // no images
    "BasilFlint", // redirected
    "beerkada", // no images
    "BelovedLeader", // broken images
    "BigMouthComics", // non-standard layout
    "BlueZombie", // broken page
    "BoomerExpress", // redirected
    "DungeonDamage", // non-standard layout
    "EarthRiser", // redirected
    "FaultyLogic", // non-standard layout
    "GoForIt", // page is gone
    "JuvenileDiversion", // page moved
    "JustWeird", // 403 forbidden
    "Michikomonogatari", // non-standard layout
    "MobileMadness", // non-standard layout
    "KnightsOfTheNexus", // non-standard layout
    "RogerAndDominic", // non-standard layout
    "SaveMeGebus", // non-standard layout
    "TheAvatar", // non-standard layout
];

/// Last valid strips for entries whose index link went stale
const DEFAULT_OVERRIDES: &[(&str, &str)] = &[
    ("BallofYarn", "http://ballofyarn.comicgenesis.com/d/20020624.html"),
    ("AmazonSpaceRangers", "http://amazons.comicgenesis.com/d/20051015.html"),
    ("ArroganceinSimplicity", "http://arrogance.comicgenesis.com/d/20030217.html"),
    ("ATasteofEvil", "http://atasteofevil.comicgenesis.com/d/20050314.html"),
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level settings, loaded once per run
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub catalog: CatalogConfig,
    pub policy: CatalogPolicy,
    pub release: ReleaseConfig,
    pub report: ReportConfig,
}

impl Settings {
    /// Reads settings from a JSON file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Where the index lives and where the catalog is written
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    pub base_pattern: String,
    pub partition_keys: Vec<String>,
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Catalog file location, falling back to the data directory
    pub fn catalog_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(catalog_path)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_pattern: DEFAULT_BASE_PATTERN.to_string(),
            partition_keys: DEFAULT_PARTITION_KEYS
                .chars()
                .map(|c| c.to_string())
                .collect(),
            path: None,
        }
    }
}

/// Curated exclusion set and reference overrides.
///
/// Shared read-only by the builder and the report generator.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogPolicy {
    pub exclusions: HashSet<String>,
    pub overrides: HashMap<String, String>,
}

impl CatalogPolicy {
    pub fn new<E, N, U>(
        exclusions: impl IntoIterator<Item = E>,
        overrides: impl IntoIterator<Item = (N, U)>,
    ) -> Self
    where
        E: Into<String>,
        N: Into<String>,
        U: Into<String>,
    {
        Self {
            exclusions: exclusions.into_iter().map(Into::into).collect(),
            overrides: overrides
                .into_iter()
                .map(|(name, url)| (name.into(), url.into()))
                .collect(),
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclusions.contains(name)
    }

    pub fn override_for(&self, name: &str) -> Option<&str> {
        self.overrides.get(name).map(String::as_str)
    }
}

impl Default for CatalogPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied(), DEFAULT_OVERRIDES.iter().copied())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReleaseConfig {
    /// URL of the latest-release descriptor
    pub endpoint: String,
    pub fallback_url: String,
    pub installer_content_type: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RELEASE_ENDPOINT.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            installer_content_type: INSTALLER_CONTENT_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportConfig {
    /// Retired host name rewritten in every emitted reference
    pub legacy_domain: String,
    pub current_domain: String,
    /// Name prefixes under which the registry may already know an entry
    pub registry_prefixes: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            legacy_domain: "comicgen.com".to_string(),
            current_domain: "comicgenesis.com".to_string(),
            registry_prefixes: vec!["Creators".to_string(), "GoComics".to_string()],
        }
    }
}

/// Returns the path to the data directory for stripscan.
/// Uses $XDG_DATA_HOME/stripscan if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/stripscan,
/// or ./stripscan if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default path of the persisted catalog.
pub fn catalog_path() -> PathBuf {
    data_dir().join("catalog.json")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("stripscan")
}
