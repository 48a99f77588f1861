//! Comic catalog built from the paginated index
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Fetcher   │────▶│   Builder   │────▶│    Store    │
//! │  (pages)    │     │  (merge)    │     │   (JSON)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Extractor  │     │   Report    │◀── Registry
//!                     │ (page scan) │     │ (add(...))  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`extractor`]: Title/count scanning of one index page
//! - [`normalize`]: Display name to identifier normalization
//! - [`entry`]: Catalog entries and collision-aware insertion
//! - [`builder`]: Partition loop, exclusion and override policy
//! - [`store`]: Atomic, sorted JSON persistence
//! - [`registry`]: Lookup of scrapers that already exist
//! - [`report`]: Registration statement generation
//! - [`error`]: Error types for storage and registry lists

pub mod builder;
pub mod entry;
pub mod error;
pub mod extractor;
pub mod normalize;
pub mod registry;
pub mod report;
pub mod store;

pub use builder::{BuildReport, CatalogBuilder};
pub use entry::{Catalog, CatalogEntry};
pub use error::CatalogError;
pub use registry::{KnownRegistry, ListedRegistry};
pub use report::{ReportGenerator, Statement};
pub use store::CatalogStore;
