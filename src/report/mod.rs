//! Report assembly layer
//!
//! Joins the installed manifest with registry lookups and renders the result.
//!
//! # Modules
//!
//! - [`output`]: JSON and table rendering
//! - [`reporter`]: Per-package lookup fan-out and report assembly
//! - [`types`]: The `PackageReport` record

pub mod output;
pub mod reporter;
pub mod types;
