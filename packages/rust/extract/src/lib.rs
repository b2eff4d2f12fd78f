//! Source scanning for configuration keys and commands.
//!
//! Sources are plain text read line by line. No syntax tree is built; a
//! declaration is recognized only when it fits on one physical line.
//!
//! All configured files are read before scanning starts, so a missing file
//! aborts the run without producing partial results.

pub mod commands;
pub mod metadata;
pub mod patterns;
pub mod prefix;
pub mod scanner;

use std::path::{Path, PathBuf};

use keydoc_shared::{ConfigKeysConfig, KeydocError, Result};
use tracing::{info, instrument};

pub use commands::{CommandCatalog, CommandEntry, CommandScanner};
pub use scanner::{ConfigKeyScanner, RealmScope, ReloadSection, ScanResult, ScanState};

/// A configured source file and its full content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as configured (relative to the project root).
    pub path: PathBuf,
    pub content: String,
}

/// Read every configured source, in order, relative to `root`.
pub fn read_sources(root: &Path, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    paths
        .iter()
        .map(|path| {
            let full = root.join(path);
            let content = std::fs::read_to_string(&full)
                .map_err(|e| KeydocError::input_read(&full, e))?;
            Ok(SourceFile {
                path: path.clone(),
                content,
            })
        })
        .collect()
}

/// Scan already-loaded sources for configuration keys.
pub fn scan_config_keys(sources: &[SourceFile], config: &ConfigKeysConfig) -> ScanResult {
    let mut scanner = ConfigKeyScanner::new(config);
    for source in sources {
        scanner.scan_file(&source.path, &source.content);
    }
    scanner.finish()
}

/// Read and scan the configured key sources under `root`.
#[instrument(skip_all, fields(root = %root.display(), files = config.sources.len()))]
pub fn scan_config_sources(root: &Path, config: &ConfigKeysConfig) -> Result<ScanResult> {
    let sources = read_sources(root, &config.sources)?;
    let result = scan_config_keys(&sources, config);

    info!(
        keys = result.declarations.len(),
        diagnostics = result.diagnostics.len(),
        "config sources scanned"
    );

    Ok(result)
}

/// Read and scan command sources under `root`.
#[instrument(skip_all, fields(root = %root.display(), files = paths.len()))]
pub fn scan_command_sources(root: &Path, paths: &[PathBuf]) -> Result<CommandCatalog> {
    let sources = read_sources(root, paths)?;
    let mut scanner = CommandScanner::new();
    for source in &sources {
        scanner.scan_file(&source.path, &source.content);
    }
    let catalog = scanner.finish();

    info!(commands = catalog.commands.len(), "command sources scanned");

    Ok(catalog)
}
