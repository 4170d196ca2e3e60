//! Local Composer manifest handling
//!
//! # Modules
//!
//! - [`error`]: Errors raised while loading the manifest
//! - [`installed_json`]: `vendor/composer/installed.json` loading and schema detection
//! - [`types`]: Installed package records

pub mod error;
pub mod installed_json;
pub mod types;
