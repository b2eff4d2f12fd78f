//! Core domain types for keydoc.
//!
//! These types describe what the scanner extracts from source files
//! (declarations and their side-channel metadata) and what the renderer
//! emits (one [`RenderedEntry`] per documented key).

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// How a declaration site reads its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    /// The accessor carries a default value (`CFG.GetUint16("key", 6112)`).
    Required,
    /// The accessor has no default (`CFG.GetMaybeUint16("key")`).
    Optional,
}

/// One recognized declaration occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigKeyDeclaration {
    /// Dot-delimited key name, after any namespace prefix rewriting.
    pub key_name: String,
    /// Whether this site provides a default.
    pub accessor_kind: AccessorKind,
    /// Accessor name as written, e.g. `GetUint16` or `GetMaybeBool`.
    pub accessor: String,
    /// Raw argument text following the key (Required declarations only).
    pub raw_arguments: Option<String>,
    /// File the declaration was found in, as configured.
    pub source_file: PathBuf,
    /// One-based line number within `source_file`.
    pub source_line: usize,
}

impl ConfigKeyDeclaration {
    /// `file:line` string for diagnostics.
    pub fn location(&self) -> String {
        format!("{}:{}", self.source_file.display(), self.source_line)
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Whether a live configuration reload affects a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Nothing is known about reload behavior. Renders no reload line.
    #[default]
    Unspecified,
    /// The key cannot be reloaded at all.
    Never,
    /// A reload applies immediately. No scan rule assigns this today.
    Instant,
    /// A reload applies only to games hosted after the change.
    NextGame,
}

impl ReloadPolicy {
    /// Human-readable phrasing for the reference document, if any.
    pub fn description(self) -> Option<&'static str> {
        match self {
            Self::Unspecified => None,
            Self::Never => Some("Cannot be reloaded."),
            Self::Instant => Some("Yes."),
            Self::NextGame => Some("Yes, but it doesn't affect currently hosted games."),
        }
    }
}

/// Side-channel state accumulated per key name during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigKeyMetadata {
    pub reload_policy: ReloadPolicy,
    /// Set when the declaration is followed by a "fail if error" marker.
    pub fails_on_error: bool,
}

// ---------------------------------------------------------------------------
// Rendered output
// ---------------------------------------------------------------------------

/// Final derived view of one documented key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedEntry {
    pub key_name: String,
    /// Lower-cased type label, e.g. `uint16`, `bool`, `enum`. Empty if unknown.
    pub type_label: String,
    /// Ordered constraint sentences (without trailing periods).
    pub constraints: Vec<String>,
    /// True for Optional declarations.
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_handling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload: Option<String>,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// A recoverable condition seen while scanning or interpreting.
///
/// Diagnostics are logged when raised and collected so callers can report
/// or assert on them. None of them stops the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanDiagnostic {
    /// A fail marker was seen before any key was declared.
    #[error("{location}: fail marker with no preceding key declaration")]
    MissingKeyContext { location: String },

    /// The same key was declared more than once; the later declaration wins.
    #[error("{location}: duplicate declaration of `{key}`")]
    DuplicateDeclaration { key: String, location: String },

    /// A fail marker was separated from the key it was attributed to.
    #[error("{location}: fail marker is not adjacent to the declaration of `{key}`")]
    NonAdjacentMarker { key: String, location: String },

    /// The accessor name carries neither known prefix.
    #[error("{location}: unrecognized accessor `{accessor}` for `{key}`")]
    UnrecognizedAccessorName {
        key: String,
        accessor: String,
        location: String,
    },
}

impl fmt::Display for AccessorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Optional => f.write_str("optional"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_policy_phrasing() {
        assert_eq!(ReloadPolicy::Unspecified.description(), None);
        assert_eq!(ReloadPolicy::Never.description(), Some("Cannot be reloaded."));
        assert!(
            ReloadPolicy::NextGame
                .description()
                .unwrap()
                .contains("doesn't affect currently hosted games")
        );
        assert_eq!(ReloadPolicy::Instant.description(), Some("Yes."));
    }

    #[test]
    fn metadata_defaults() {
        let meta = ConfigKeyMetadata::default();
        assert_eq!(meta.reload_policy, ReloadPolicy::Unspecified);
        assert!(!meta.fails_on_error);
    }

    #[test]
    fn rendered_entry_skips_absent_fields() {
        let entry = RenderedEntry {
            key_name: "game.version".into(),
            type_label: "uint8".into(),
            constraints: vec![],
            optional: true,
            default_value: None,
            error_handling: None,
            reload: None,
        };
        let json = serde_json::to_string(&entry).expect("serialize entry");
        assert!(json.contains("\"optional\":true"));
        assert!(!json.contains("default_value"));
    }

    #[test]
    fn diagnostic_display() {
        let diag = ScanDiagnostic::DuplicateDeclaration {
            key: "bot.latency".into(),
            location: "src/config/config_game.cpp:105".into(),
        };
        assert_eq!(
            diag.to_string(),
            "src/config/config_game.cpp:105: duplicate declaration of `bot.latency`"
        );
    }
}
