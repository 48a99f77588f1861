//! Release checking for the host application
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ GitHub API   │────▶│   Resolver   │────▶│ UpdateStatus │
//! │ (descriptor) │     │ (asset pick) │     │  (4-way)     │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │    semver    │
//!                      │ (strict cmp) │
//!                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`github`]: Latest-release descriptor source
//! - [`resolver`]: Asset selection and update status classification
//! - [`semver`]: Strict semantic-version comparison
//! - [`error`]: Error types for version parsing and release fetching

pub mod error;
pub mod github;
pub mod resolver;
pub mod semver;

pub use github::{GitHubReleaseSource, ReleaseSource};
pub use resolver::{Platform, UpdateStatus, check_update, resolve};
