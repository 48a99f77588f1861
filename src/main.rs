use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use stripscan::catalog::{CatalogBuilder, CatalogStore, ListedRegistry, ReportGenerator};
use stripscan::config::Settings;
use stripscan::fetch::HttpFetcher;
use stripscan::logging::{self, LogOptions};
use stripscan::release::{GitHubReleaseSource, Platform, check_update};

#[derive(Parser)]
#[command(name = "stripscan")]
#[command(version, about = "Comic catalog builder and release checker")]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (overrides the settings)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Log to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan every index page and save the catalog
    Build,
    /// Print registration statements for entries with at least MIN strips
    Report {
        min: u64,
        /// Known scraper names, one per line
        #[arg(long)]
        known: Option<PathBuf>,
    },
    /// Check whether a newer release is available
    CheckUpdate {
        #[arg(long, default_value = env!("CARGO_PKG_VERSION"))]
        local_version: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(&LogOptions {
        json: cli.log_json,
        file: cli.log_file.clone(),
    })?;

    let settings = Settings::load(cli.config.as_deref())?;
    let store = CatalogStore::new(
        cli.catalog
            .clone()
            .unwrap_or_else(|| settings.catalog.catalog_path()),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Command::Build => runtime.block_on(async {
            let fetcher = HttpFetcher::new()?;
            let report = CatalogBuilder::new(&settings.policy)
                .run(
                    &fetcher,
                    &settings.catalog.base_pattern,
                    &settings.catalog.partition_keys,
                    &store,
                )
                .await?;

            let failed = report.failed_partitions().count();
            if failed > 0 {
                warn!("{} of {} pages could not be fetched", failed, report.partitions.len());
            }
            info!("Catalog has {} entries", report.catalog.len());
            anyhow::Ok(())
        }),
        Command::Report { min, known } => {
            let registry = match known {
                Some(path) => ListedRegistry::load(&path)?,
                None => ListedRegistry::default(),
            };
            let statements = ReportGenerator::new(&settings.policy, &settings.report, &registry)
                .report(&store, min)
                .with_context(|| format!("Cannot report from {:?}", store.path()))?;

            for statement in statements {
                println!("{}", statement);
            }
            Ok(())
        }
        Command::CheckUpdate { local_version } => runtime.block_on(async {
            let source = GitHubReleaseSource::new(&settings.release.endpoint)?;
            let status = check_update(
                &source,
                &local_version,
                Platform::current(),
                &settings.release,
            )
            .await;
            println!("{}", status);
            anyhow::Ok(())
        }),
    }
}
