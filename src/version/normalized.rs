//! Comparison of Composer normalized version strings
//!
//! Packagist reports a `version_normalized` next to each raw version, e.g.
//! `v1.10.0` -> `1.10.0.0` and `2.3.1-p2` -> `2.3.1.0-patch2`. Ordering is
//! numeric per segment, never lexicographic. For equal segments the modifier
//! decides: dev < alpha < beta < RC < release < patch.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareResult {
    Latest,
    Outdated,
    Newer,
    Invalid,
}

/// Suffix of a normalized version; variant order is precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Modifier {
    Dev,
    Alpha(u64),
    Beta(u64),
    RC(u64),
    Release,
    Patch(u64),
}

const MODIFIER_PREFIXES: [(&str, fn(u64) -> Modifier); 6] = [
    ("patch", Modifier::Patch),
    ("pl", Modifier::Patch),
    ("p", Modifier::Patch),
    ("alpha", Modifier::Alpha),
    ("beta", Modifier::Beta),
    ("rc", Modifier::RC),
];

/// A parsed, comparable normalized version
#[derive(Debug, Clone)]
pub struct NormalizedVersion {
    segments: Vec<u64>,
    modifier: Modifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVersion(pub String);

impl fmt::Display for InvalidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid normalized version: {}", self.0)
    }
}

impl std::error::Error for InvalidVersion {}

impl NormalizedVersion {
    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for NormalizedVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidVersion(s.to_string());

        let (release, suffix) = match s.split_once('-') {
            Some((release, suffix)) => (release, Some(suffix)),
            None => (s, None),
        };

        let segments = release
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        let modifier = match suffix {
            None => Modifier::Release,
            Some(suffix) => parse_modifier(suffix).ok_or_else(invalid)?,
        };

        Ok(Self { segments, modifier })
    }
}

/// Parse `dev`, `alpha2`, `beta1`, `RC3`, `patch4`, `pl4`, `p4` (number optional).
fn parse_modifier(suffix: &str) -> Option<Modifier> {
    let suffix = suffix.to_ascii_lowercase();
    if suffix == "dev" {
        return Some(Modifier::Dev);
    }

    let (digits, build) = MODIFIER_PREFIXES
        .iter()
        .find_map(|(prefix, build)| suffix.strip_prefix(prefix).map(|rest| (rest, build)))?;
    let digits = digits.trim_start_matches(['.', '-']);

    let number = if digits.is_empty() {
        0
    } else {
        digits.parse().ok()?
    };

    Some(build(number))
}

impl Ord for NormalizedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.modifier.cmp(&other.modifier))
    }
}

impl PartialOrd for NormalizedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NormalizedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NormalizedVersion {}

impl fmt::Display for NormalizedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let release: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        f.write_str(&release.join("."))?;
        match self.modifier {
            Modifier::Release => Ok(()),
            Modifier::Dev => f.write_str("-dev"),
            Modifier::Alpha(n) => write!(f, "-alpha{}", n),
            Modifier::Beta(n) => write!(f, "-beta{}", n),
            Modifier::RC(n) => write!(f, "-RC{}", n),
            Modifier::Patch(n) => write!(f, "-patch{}", n),
        }
    }
}

/// Best-effort normalization of a raw release version.
///
/// Strips a leading `v`, drops build metadata and pads the numeric release
/// to four segments. Returns `None` for dev branches and unknown suffixes.
///
/// Examples:
/// - "1" -> "1.0.0.0"
/// - "v1.2" -> "1.2.0.0"
/// - "1.2.3-p1" -> "1.2.3.0-patch1"
/// - "3.0.0-RC1" -> "3.0.0.0-RC1"
pub fn normalize_version(version: &str) -> Option<NormalizedVersion> {
    let version = version.trim();
    let version = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version);
    let version = version.split('+').next().unwrap_or(version);

    let (release, suffix) = match version.split_once('-') {
        Some((release, suffix)) => (release, Some(suffix)),
        None => (version, None),
    };

    let parts: Vec<&str> = release.split('.').collect();
    if parts.len() > 4 {
        return None;
    }

    let mut segments = parts
        .iter()
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    segments.resize(4, 0);

    let modifier = match suffix {
        None => Modifier::Release,
        Some(suffix) => parse_modifier(suffix)?,
    };

    Some(NormalizedVersion { segments, modifier })
}

/// Compare an installed normalized version against the newest available one.
pub fn compare_versions(current: &str, latest: &str) -> CompareResult {
    let (Ok(current), Ok(latest)) = (
        current.parse::<NormalizedVersion>(),
        latest.parse::<NormalizedVersion>(),
    ) else {
        return CompareResult::Invalid;
    };

    match current.cmp(&latest) {
        Ordering::Equal => CompareResult::Latest,
        Ordering::Less => CompareResult::Outdated,
        Ordering::Greater => CompareResult::Newer,
    }
}
