//! Shared types, error model, and configuration for keydoc.
//!
//! This crate is the foundation depended on by all other keydoc crates.
//! It provides:
//! - [`KeydocError`] — the unified error type
//! - Domain types ([`ConfigKeyDeclaration`], [`ConfigKeyMetadata`], [`RenderedEntry`])
//! - Recoverable scan diagnostics ([`ScanDiagnostic`])
//! - Configuration ([`AppConfig`], [`ConfigKeysConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, CommandsConfig, ConfigKeysConfig, init_config, load_config,
    load_config_from,
};
pub use error::{KeydocError, Result};
pub use types::{
    AccessorKind, ConfigKeyDeclaration, ConfigKeyMetadata, ReloadPolicy, RenderedEntry,
    ScanDiagnostic,
};
