//! Release stability classification for Composer-style version strings
//!
//! Follows Composer's stability rules:
//! - `dev-master`, `1.0.x-dev` -> dev
//! - `1.0.0-alpha2`, `1.0.0a` -> alpha
//! - `1.0.0-beta1`, `1.0.0b` -> beta
//! - `1.0.0-RC2` -> RC
//! - `1.0.0`, `1.0.0-patch1`, `v2.3` -> stable

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static MODIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[-._]?(stable|beta|b|rc|alpha|a|patch|pl|p)((?:[.-]?\d+)*)?)?([.-]?dev)?(?:\+.*)?$")
        .expect("stability modifier pattern is valid")
});

/// Stability tag of a version string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Stable,
    RC,
    Beta,
    Alpha,
    Dev,
}

impl Stability {
    /// Returns the Composer spelling of the stability tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Stable => "stable",
            Stability::RC => "RC",
            Stability::Beta => "beta",
            Stability::Alpha => "alpha",
            Stability::Dev => "dev",
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Stability::Stable)
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw version string by its pre-release modifier.
pub fn parse_stability(version: &str) -> Stability {
    // Strip a trailing commit reference: "dev-master#abc123"
    let version = version.split('#').next().unwrap_or(version);
    let version = version.to_ascii_lowercase();

    if version.starts_with("dev-") || version.ends_with("-dev") {
        return Stability::Dev;
    }

    let Some(caps) = MODIFIER_RE.captures(&version) else {
        return Stability::Stable;
    };

    if caps.get(3).is_some() {
        return Stability::Dev;
    }

    match caps.get(1).map(|m| m.as_str()) {
        Some("beta" | "b") => Stability::Beta,
        Some("alpha" | "a") => Stability::Alpha,
        Some("rc") => Stability::RC,
        _ => Stability::Stable,
    }
}
