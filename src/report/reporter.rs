//! Package report assembly
//!
//! One registry lookup per installed package. Lookups run concurrently with
//! staggered start times; each is bounded by a timeout and a failed lookup
//! only drops the newest-version fields of its own entry.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::{FETCH_STAGGER_DELAY_MS, FETCH_TIMEOUT_MS};
use crate::manifest::error::ManifestError;
use crate::manifest::installed_json::load_installed_packages;
use crate::manifest::types::InstalledPackage;
use crate::report::types::PackageReport;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::selector::select_latest_stable;
use crate::version::types::VersionRecord;

pub struct PackageReporter {
    registry: Arc<dyn Registry>,
    fetch_timeout: Duration,
    stagger_delay: Duration,
}

impl PackageReporter {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            fetch_timeout: Duration::from_millis(FETCH_TIMEOUT_MS),
            stagger_delay: Duration::from_millis(FETCH_STAGGER_DELAY_MS),
        }
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    pub fn with_stagger_delay(mut self, stagger_delay: Duration) -> Self {
        self.stagger_delay = stagger_delay;
        self
    }

    /// Fetch all versions of a package and select the newest stable one
    ///
    /// `Ok(None)` means the package exists but has no stable release.
    pub async fn lookup_latest(
        &self,
        package_name: &str,
    ) -> Result<Option<VersionRecord>, RegistryError> {
        let records = timeout(
            self.fetch_timeout,
            self.registry.fetch_all_versions(package_name),
        )
        .await
        .map_err(|_| RegistryError::Timeout(self.fetch_timeout))??;

        let latest = select_latest_stable(&records).cloned();
        debug!(
            "Selected {:?} from {} versions of {}",
            latest.as_ref().map(|r| r.version.as_str()),
            records.len(),
            package_name
        );

        Ok(latest)
    }

    /// Newest stable release of a package, or `None` if it cannot be determined
    pub async fn latest_package(&self, package_name: &str) -> Option<VersionRecord> {
        self.lookup_latest(package_name)
            .await
            .inspect_err(|e| warn!("Failed to look up {}: {}", package_name, e))
            .ok()
            .flatten()
    }

    /// Version string of the newest stable release of a package
    pub async fn latest_version(&self, package_name: &str) -> Option<String> {
        self.latest_package(package_name)
            .await
            .map(|record| record.version)
    }

    /// Start offset of the `index`-th lookup, saturating at `Duration::MAX`
    fn start_delay(&self, index: usize) -> Duration {
        u32::try_from(index)
            .ok()
            .and_then(|index| self.stagger_delay.checked_mul(index))
            .unwrap_or(Duration::MAX)
    }

    /// Resolve the newest stable release for every package, keeping input order
    pub async fn report_packages(&self, packages: Vec<InstalledPackage>) -> Vec<PackageReport> {
        let futures = packages.into_iter().enumerate().map(|(i, package)| {
            let delay = self.start_delay(i);
            async move {
                sleep(delay).await;
                let newest = self.latest_package(&package.name).await;
                PackageReport::new(package, newest)
            }
        });

        join_all(futures).await
    }

    /// Build the report for the manifest at `manifest_path`
    ///
    /// Fails only when the manifest itself cannot be loaded.
    pub async fn build_report(
        &self,
        manifest_path: &Path,
    ) -> Result<Vec<PackageReport>, ManifestError> {
        let packages = load_installed_packages(manifest_path)?;
        let total = packages.len();

        let reports = self.report_packages(packages).await;

        let resolved = reports
            .iter()
            .filter(|r| r.newest_version.is_some())
            .count();
        info!(
            "Resolved newest stable version for {}/{} packages",
            resolved, total
        );

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::registry::MockRegistry;

    fn installed(name: &str, version: &str) -> InstalledPackage {
        InstalledPackage {
            name: name.to_string(),
            version: version.to_string(),
            license: vec!["MIT".to_string()],
            version_normalized: None,
        }
    }

    fn widget_versions() -> Vec<VersionRecord> {
        vec![
            VersionRecord::new("0.9.0", "0.9.0.0", &["MIT"]),
            VersionRecord::new("1.0.0", "1.0.0.0", &["MIT"]),
            VersionRecord::new("1.1.0-beta", "1.1.0.0-beta", &["MIT"]),
            VersionRecord::new("2.0.0", "2.0.0.0", &["Apache-2.0"]),
        ]
    }

    fn reporter(registry: MockRegistry) -> PackageReporter {
        PackageReporter::new(Arc::new(registry)).with_stagger_delay(Duration::ZERO)
    }

    /// Registry that never answers within a reasonable time
    struct SlowRegistry;

    #[async_trait::async_trait]
    impl Registry for SlowRegistry {
        async fn fetch_all_versions(
            &self,
            _package_name: &str,
        ) -> Result<Vec<VersionRecord>, RegistryError> {
            sleep(Duration::from_secs(30)).await;
            Ok(vec![])
        }
    }

    #[test]
    fn start_delay_grows_with_index() {
        let reporter = PackageReporter::new(Arc::new(MockRegistry::new()))
            .with_stagger_delay(Duration::from_millis(10));

        assert_eq!(reporter.start_delay(0), Duration::ZERO);
        assert_eq!(reporter.start_delay(3), Duration::from_millis(30));
    }

    #[test]
    fn start_delay_saturates_instead_of_overflowing() {
        let reporter = PackageReporter::new(Arc::new(MockRegistry::new()))
            .with_stagger_delay(Duration::MAX);

        assert_eq!(reporter.start_delay(0), Duration::ZERO);
        assert_eq!(reporter.start_delay(2), Duration::MAX);
        assert_eq!(reporter.start_delay(usize::MAX), Duration::MAX);
    }

    #[tokio::test]
    async fn latest_version_returns_newest_stable_release() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_all_versions()
            .withf(|name| name == "acme/widget")
            .times(1)
            .returning(|_| Ok(widget_versions()));

        let result = reporter(registry).latest_version("acme/widget").await;

        assert_eq!(result, Some("2.0.0".to_string()));
    }

    #[tokio::test]
    async fn latest_package_returns_none_on_registry_error() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_all_versions()
            .returning(|name| Err(RegistryError::NotFound(name.to_string())));

        let result = reporter(registry).latest_package("acme/missing").await;

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn lookup_latest_returns_none_without_stable_release() {
        let mut registry = MockRegistry::new();
        registry.expect_fetch_all_versions().returning(|_| {
            Ok(vec![
                VersionRecord::new("dev-master", "9999999-dev", &[]),
                VersionRecord::new("1.0.0-RC1", "1.0.0.0-RC1", &[]),
            ])
        });

        let result = reporter(registry).lookup_latest("acme/widget").await;

        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn lookup_latest_times_out_slow_registry() {
        let reporter = PackageReporter::new(Arc::new(SlowRegistry))
            .with_fetch_timeout(Duration::from_millis(20));

        let result = reporter.lookup_latest("acme/widget").await;

        assert!(matches!(result, Err(RegistryError::Timeout(_))));
    }

    #[tokio::test]
    async fn report_packages_merges_newest_release() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_all_versions()
            .returning(|_| Ok(widget_versions()));

        let reports = reporter(registry)
            .report_packages(vec![installed("acme/widget", "1.0.0")])
            .await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].name, "acme/widget");
        assert_eq!(reports[0].installed_version, "1.0.0");
        assert_eq!(reports[0].newest_version, Some("2.0.0".to_string()));
        assert_eq!(
            reports[0].newest_version_licences,
            Some(vec!["Apache-2.0".to_string()])
        );
    }

    #[tokio::test]
    async fn report_packages_isolates_failed_lookups() {
        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_all_versions()
            .returning(|name| match name {
                "acme/broken" => Err(RegistryError::InvalidResponse("boom".to_string())),
                _ => Ok(widget_versions()),
            });

        let reports = reporter(registry)
            .report_packages(vec![
                installed("acme/first", "1.0.0"),
                installed("acme/broken", "0.1.0"),
                installed("acme/last", "2.0.0"),
            ])
            .await;

        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["acme/first", "acme/broken", "acme/last"]);
        assert_eq!(reports[0].newest_version, Some("2.0.0".to_string()));
        assert_eq!(reports[1].installed_version, "0.1.0");
        assert_eq!(reports[1].newest_version, None);
        assert_eq!(reports[1].newest_version_licences, None);
        assert_eq!(reports[2].newest_version, Some("2.0.0".to_string()));
    }

    #[tokio::test]
    async fn report_packages_treats_timeout_as_failed_lookup() {
        let reporter = PackageReporter::new(Arc::new(SlowRegistry))
            .with_fetch_timeout(Duration::from_millis(20))
            .with_stagger_delay(Duration::ZERO);

        let reports = reporter
            .report_packages(vec![installed("acme/widget", "1.0.0")])
            .await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].newest_version, None);
    }

    #[tokio::test]
    async fn build_report_fails_for_missing_manifest() {
        let registry = MockRegistry::new();
        let dir = tempfile::TempDir::new().unwrap();

        let result = reporter(registry)
            .build_report(&dir.path().join("installed.json"))
            .await;

        assert!(matches!(result, Err(ManifestError::Read { .. })));
    }

    #[tokio::test]
    async fn build_report_reads_manifest_and_queries_each_package() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("installed.json");
        std::fs::write(
            &path,
            r#"{"packages": [
                {"name": "acme/widget", "version": "1.0.0", "license": ["MIT"]},
                {"name": "acme/gadget", "version": "3.0.0", "license": []}
            ]}"#,
        )
        .unwrap();

        let mut registry = MockRegistry::new();
        registry
            .expect_fetch_all_versions()
            .times(2)
            .returning(|_| Ok(widget_versions()));

        let reports = reporter(registry).build_report(&path).await.unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1].name, "acme/gadget");
        assert_eq!(reports[1].newest_version, Some("2.0.0".to_string()));
    }
}
