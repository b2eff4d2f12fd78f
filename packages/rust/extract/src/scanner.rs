//! Line-oriented configuration-key scanner.
//!
//! Each file is scanned top to bottom with a fresh [`ScanState`]. Sentinel
//! lines move the state; every other line is offered to the declaration
//! matcher, then to the fail-marker check. Declarations and metadata
//! accumulate across all files of a run.

use std::collections::HashMap;
use std::path::Path;

use keydoc_shared::{
    AccessorKind, ConfigKeyDeclaration, ConfigKeyMetadata, ConfigKeysConfig, ReloadPolicy,
    ScanDiagnostic,
};
use tracing::{debug, instrument, warn};

use crate::metadata::{MetadataAccumulator, is_fail_marker};
use crate::patterns::match_declaration;
use crate::prefix::PrefixRewriter;

/// Opens a region whose keys cannot be reloaded.
const NO_RELOAD_START: &str = "SECTION START: Cannot be reloaded";

/// Closes a no-reload region.
const NO_RELOAD_END: &str = "SECTION END";

/// Parameter that only the per-realm constructor takes.
const PER_REALM_CONSTRUCTOR: &str = "CRealmConfig* nRootConfig";

// ---------------------------------------------------------------------------
// Scan state
// ---------------------------------------------------------------------------

/// Whether the current line sits inside a no-reload section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadSection {
    #[default]
    Reloadable,
    NoReload,
}

/// Which realm namespace applies to prefix-built keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RealmScope {
    #[default]
    Global,
    /// Entered at the per-realm constructor; never left within a file.
    PerRealm,
}

/// Per-file scan context, changed only by sentinel lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub section: ReloadSection,
    pub realm: RealmScope,
}

impl ScanState {
    /// State after observing a trimmed `line`.
    pub fn advance(self, line: &str) -> Self {
        let mut next = self;
        if line.contains(NO_RELOAD_START) {
            next.section = ReloadSection::NoReload;
        } else if line.contains(NO_RELOAD_END) {
            next.section = ReloadSection::Reloadable;
        }
        if line.contains(PER_REALM_CONSTRUCTOR) {
            next.realm = RealmScope::PerRealm;
        }
        next
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Everything collected by a completed scan.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// One declaration per key name, in first-seen order; later
    /// declarations of a key replace the earlier data in place.
    pub declarations: Vec<ConfigKeyDeclaration>,
    pub metadata: HashMap<String, ConfigKeyMetadata>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

impl ScanResult {
    /// Metadata for `key`, or defaults if none was recorded.
    pub fn metadata_for(&self, key: &str) -> ConfigKeyMetadata {
        self.metadata.get(key).copied().unwrap_or_default()
    }
}

/// Accumulates declarations across the files of one run.
#[derive(Debug)]
pub struct ConfigKeyScanner<'c> {
    config: &'c ConfigKeysConfig,
    declarations: Vec<ConfigKeyDeclaration>,
    index: HashMap<String, usize>,
    metadata: MetadataAccumulator,
    diagnostics: Vec<ScanDiagnostic>,
}

impl<'c> ConfigKeyScanner<'c> {
    pub fn new(config: &'c ConfigKeysConfig) -> Self {
        Self {
            config,
            declarations: Vec::new(),
            index: HashMap::new(),
            metadata: MetadataAccumulator::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan one file's content. `source` is the configured path, used for
    /// file-role checks and diagnostics.
    #[instrument(skip_all, fields(source = %source.display()))]
    pub fn scan_file(&mut self, source: &Path, content: &str) {
        let config = self.config;
        let is_game = config.is_game_file(source);
        let rewriter = config.is_realm_file(source).then_some(PrefixRewriter {
            global_prefix: &config.global_prefix,
            realm_prefix: &config.realm_prefix,
        });

        let mut state = ScanState::default();
        let before = self.declarations.len();

        for (idx, raw) in content.lines().enumerate() {
            let trimmed = raw.trim();
            state = state.advance(trimmed);

            let line = match &rewriter {
                Some(r) => r.rewrite(trimmed, state.realm),
                None => trimmed.into(),
            };
            let location = format!("{}:{}", source.display(), idx + 1);

            if let Some(found) = match_declaration(&line) {
                let reload = match found.kind {
                    AccessorKind::Optional => None,
                    AccessorKind::Required if state.section == ReloadSection::NoReload => {
                        Some(ReloadPolicy::Never)
                    }
                    AccessorKind::Required if is_game => Some(ReloadPolicy::NextGame),
                    AccessorKind::Required => None,
                };
                self.metadata.record_declaration(&found.key_name, reload);
                self.record(ConfigKeyDeclaration {
                    key_name: found.key_name,
                    accessor_kind: found.kind,
                    accessor: found.accessor,
                    raw_arguments: found.raw_arguments,
                    source_file: source.to_path_buf(),
                    source_line: idx + 1,
                });
            } else if is_fail_marker(&line) {
                if let Some(diag) = self.metadata.record_fail_marker(&location) {
                    self.diagnostics.push(diag);
                }
            } else if !is_trivia(&line) {
                self.metadata.record_other_statement();
            }
        }

        debug!(
            new_keys = self.declarations.len() - before,
            "file scanned"
        );
    }

    /// Store a declaration, replacing any earlier one with the same key.
    fn record(&mut self, decl: ConfigKeyDeclaration) {
        match self.index.get(&decl.key_name) {
            Some(&pos) => {
                let location = decl.location();
                warn!(key = %decl.key_name, %location, "duplicate config key declaration");
                self.diagnostics.push(ScanDiagnostic::DuplicateDeclaration {
                    key: decl.key_name.clone(),
                    location,
                });
                self.declarations[pos] = decl;
            }
            None => {
                self.index.insert(decl.key_name.clone(), self.declarations.len());
                self.declarations.push(decl);
            }
        }
    }

    /// Finish the run.
    pub fn finish(self) -> ScanResult {
        ScanResult {
            declarations: self.declarations,
            metadata: self.metadata.into_entries(),
            diagnostics: self.diagnostics,
        }
    }
}

/// Lines that never separate a fail marker from its declaration:
/// blanks, comments, preprocessor lines, braces, and bare `if (...)` guards.
fn is_trivia(line: &str) -> bool {
    line.is_empty()
        || line.starts_with("//")
        || line.starts_with("/*")
        || line.starts_with('*')
        || line.starts_with('#')
        || line.chars().all(|c| matches!(c, '{' | '}' | ' '))
        || line == "} else {"
        || (line.starts_with("if (") && !line.ends_with(';'))
}
