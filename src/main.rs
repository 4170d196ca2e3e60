use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use composer_status::config::{AppConfig, manifest_path};
use composer_status::report::output::{OutputFormat, render, retain_outdated};
use composer_status::report::reporter::PackageReporter;
use composer_status::version::registries::PackagistRegistry;

#[derive(Parser, Debug)]
#[command(name = "composer-status")]
#[command(
    version,
    about = "Report installed Composer packages against their latest stable release"
)]
struct Cli {
    /// Project root containing vendor/composer/installed.json
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    /// Explicit path to installed.json (overrides --project-root)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Packagist-compatible registry base URL
    #[arg(long)]
    registry_url: Option<String>,

    /// Per-package lookup timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Only list packages with a newer stable release
    #[arg(long)]
    outdated: bool,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long)]
    debug: bool,
}

/// Initialize the tracing subscriber.
///
/// Log level is controlled by `--debug`, then `RUST_LOG`, defaulting to INFO.
/// Logs never go to stdout so the report stays machine-readable.
fn init_tracing(debug: bool, log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = if debug {
        EnvFilter::new("composer_status=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("composer_status=info"))
    };

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .init();
        return Ok(None);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .with(filter)
        .init();

    Ok(Some(guard))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(url) = cli.registry_url {
        config.registry.url = url;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.registry.timeout_ms = timeout_ms;
    }
    tracing::debug!("Effective config: {:?}", config);

    let manifest = cli
        .manifest
        .unwrap_or_else(|| manifest_path(&cli.project_root));

    let registry = PackagistRegistry::new(&config.registry.url, config.fetch_timeout())
        .context("failed to create registry client")?;
    let reporter = PackageReporter::new(Arc::new(registry))
        .with_fetch_timeout(config.fetch_timeout())
        .with_stagger_delay(config.stagger_delay());

    let mut reports = reporter.build_report(&manifest).await?;
    if cli.outdated {
        reports = retain_outdated(reports);
    }

    println!("{}", render(&reports, cli.format)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.debug, cli.log_file.as_deref())?;

    tracing::debug!("composer-status starting with args: {:?}", cli);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}
