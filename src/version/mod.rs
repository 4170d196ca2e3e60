//! Version layer for Packagist lookups
//!
//! Fetches version records from a registry, classifies their stability and
//! picks the newest stable release.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Selector   │────▶│   Checker   │
//! │  (fetch)    │     │(latest pick)│     │  (status)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Registries  │     │ Stability / │
//! │ (packagist) │     │ Normalized  │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: Installed-vs-newest status
//! - [`error`]: Error types for registry operations
//! - [`normalized`]: Ordering of normalized version strings
//! - [`registry`]: Registry trait for fetching versions from remote sources
//! - [`registries`]: Concrete registry implementations (Packagist)
//! - [`selector`]: Latest stable version selection
//! - [`stability`]: Stability classification of raw version strings
//! - [`types`]: Common types like `VersionRecord`

pub mod checker;
pub mod error;
pub mod normalized;
pub mod registries;
pub mod registry;
pub mod selector;
pub mod stability;
pub mod types;
