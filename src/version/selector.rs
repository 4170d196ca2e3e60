//! Latest stable version selection

use tracing::debug;

use crate::version::normalized::NormalizedVersion;
use crate::version::types::VersionRecord;

/// Select the highest stable record from registry order.
///
/// Unstable records (alpha, beta, RC, dev) are never selected, and records
/// whose normalized version cannot be parsed are skipped. When two stable
/// records normalize equal, the one seen later wins.
pub fn select_latest_stable<'a, I>(records: I) -> Option<&'a VersionRecord>
where
    I: IntoIterator<Item = &'a VersionRecord>,
{
    let mut best: Option<(&VersionRecord, NormalizedVersion)> = None;

    for record in records {
        let stability = record.stability();
        if !stability.is_stable() {
            debug!("Skipping {} release {}", stability, record.version);
            continue;
        }

        let Some(candidate) = record.normalized() else {
            debug!(
                "Skipping unparseable normalized version {} for {}",
                record.version_normalized, record.version
            );
            continue;
        };

        let replace = match &best {
            None => true,
            Some((_, current)) => candidate >= *current,
        };

        if replace {
            best = Some((record, candidate));
        }
    }

    best.map(|(record, _)| record)
}
