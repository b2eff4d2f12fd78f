//! End-to-end generation: sources → scan → interpret → filter/sort → document.

use std::path::Path;

use tracing::{info, instrument};

use keydoc_extract::ScanResult;
use keydoc_shared::{
    CommandsConfig, ConfigKeysConfig, KeydocError, RenderedEntry, Result, ScanDiagnostic,
};

use crate::commands::render_command_document;
use crate::document::{EntryFilter, render_config_document, select_entries};
use crate::interpret::ValueInterpreter;

/// Output of the configuration reference pipeline.
#[derive(Debug)]
pub struct ConfigReference {
    /// Retained entries, in document order.
    pub entries: Vec<RenderedEntry>,
    /// Final document text.
    pub document: String,
    /// Recoverable problems found while scanning and interpreting.
    pub diagnostics: Vec<ScanDiagnostic>,
}

/// Derive rendered entries from a finished scan and assemble the document.
pub fn build_config_reference(scan: ScanResult, config: &ConfigKeysConfig) -> ConfigReference {
    let interpreter = ValueInterpreter::new(config);
    let mut diagnostics = Vec::new();

    let rendered: Vec<RenderedEntry> = scan
        .declarations
        .iter()
        .map(|decl| interpreter.interpret(decl, scan.metadata_for(&decl.key_name), &mut diagnostics))
        .collect();
    let total = rendered.len();

    let entries = select_entries(rendered, EntryFilter::from(config));
    let document = render_config_document(&entries);

    let mut all_diagnostics = scan.diagnostics;
    all_diagnostics.extend(diagnostics);

    info!(
        declared = total,
        retained = entries.len(),
        diagnostics = all_diagnostics.len(),
        "config reference built"
    );

    ConfigReference {
        entries,
        document,
        diagnostics: all_diagnostics,
    }
}

/// Read the configured key sources under `root` and build the reference.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn generate_config_reference(root: &Path, config: &ConfigKeysConfig) -> Result<ConfigReference> {
    let scan = keydoc_extract::scan_config_sources(root, config)?;
    Ok(build_config_reference(scan, config))
}

/// Read the configured command sources under `root` and render their reference.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn generate_command_reference(root: &Path, config: &CommandsConfig) -> Result<String> {
    let catalog = keydoc_extract::scan_command_sources(root, &config.sources)?;
    Ok(render_command_document(&catalog))
}

/// Write a generated document, creating parent directories as needed.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| KeydocError::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| KeydocError::io(path, e))?;

    info!(path = %path.display(), bytes = contents.len(), "document written");

    Ok(())
}
