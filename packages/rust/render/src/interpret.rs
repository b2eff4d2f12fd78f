//! Derives type, default, and constraint descriptions for declarations.

use keydoc_shared::{
    AccessorKind, ConfigKeyDeclaration, ConfigKeyMetadata, ConfigKeysConfig, RenderedEntry,
    ScanDiagnostic,
};
use tracing::warn;

use crate::rules::{describe_default, split_arguments};

/// Accessor prefix for declarations with a default.
const REQUIRED_PREFIX: &str = "Get";

/// Accessor prefix for declarations without a default.
const OPTIONAL_PREFIX: &str = "GetMaybe";

/// Lower-cased accessor remainder that denotes an enumerated value.
const ENUM_ACCESSOR: &str = "stringindex";

/// Turns declarations plus their metadata into [`RenderedEntry`] values.
#[derive(Debug, Clone, Copy)]
pub struct ValueInterpreter<'a> {
    config: &'a ConfigKeysConfig,
}

impl<'a> ValueInterpreter<'a> {
    pub fn new(config: &'a ConfigKeysConfig) -> Self {
        Self { config }
    }

    /// Build the rendered entry for one declaration.
    ///
    /// An unrecognized accessor yields an empty type label and pushes a
    /// diagnostic; everything else is still derived.
    pub fn interpret(
        &self,
        decl: &ConfigKeyDeclaration,
        meta: ConfigKeyMetadata,
        diagnostics: &mut Vec<ScanDiagnostic>,
    ) -> RenderedEntry {
        let type_label = type_label(&decl.accessor, decl.accessor_kind).unwrap_or_else(|| {
            let location = decl.location();
            warn!(key = %decl.key_name, accessor = %decl.accessor, %location, "unrecognized accessor name");
            diagnostics.push(ScanDiagnostic::UnrecognizedAccessorName {
                key: decl.key_name.clone(),
                accessor: decl.accessor.clone(),
                location,
            });
            String::new()
        });

        match (decl.accessor_kind, decl.raw_arguments.as_deref()) {
            (AccessorKind::Required, Some(raw)) => RenderedEntry {
                constraints: constraints(&type_label, raw),
                default_value: Some(describe_default(&decl.key_name, raw, self.config)),
                error_handling: Some(error_handling(meta.fails_on_error).to_string()),
                reload: meta.reload_policy.description().map(str::to_string),
                optional: false,
                key_name: decl.key_name.clone(),
                type_label,
            },
            _ => RenderedEntry {
                constraints: Vec::new(),
                default_value: None,
                error_handling: None,
                reload: meta.reload_policy.description().map(str::to_string),
                optional: true,
                key_name: decl.key_name.clone(),
                type_label,
            },
        }
    }
}

/// Type label from the accessor name, or `None` if the prefix is unknown.
pub fn type_label(accessor: &str, kind: AccessorKind) -> Option<String> {
    let prefix = match kind {
        AccessorKind::Required => REQUIRED_PREFIX,
        AccessorKind::Optional => OPTIONAL_PREFIX,
    };
    let rest = accessor.strip_prefix(prefix)?;
    if rest.is_empty() {
        return None;
    }
    let lower = rest.to_lowercase();
    if lower == ENUM_ACCESSOR {
        return Some("enum".to_string());
    }
    Some(lower)
}

/// Length bounds for string keys declared as `("key", min, max, default)`.
fn constraints(type_label: &str, raw_arguments: &str) -> Vec<String> {
    if type_label != "string" {
        return Vec::new();
    }
    match split_arguments(raw_arguments).as_slice() {
        [min, max, _, ..] => vec![
            format!("Min length: {min}"),
            format!("Max length: {max}"),
        ],
        _ => Vec::new(),
    }
}

fn error_handling(fails_on_error: bool) -> &'static str {
    if fails_on_error {
        "Abort operation"
    } else {
        "Use default value"
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use keydoc_shared::ReloadPolicy;

    use super::*;

    fn decl(key: &str, accessor: &str, raw: Option<&str>) -> ConfigKeyDeclaration {
        ConfigKeyDeclaration {
            key_name: key.into(),
            accessor_kind: if raw.is_some() {
                AccessorKind::Required
            } else {
                AccessorKind::Optional
            },
            accessor: accessor.into(),
            raw_arguments: raw.map(str::to_string),
            source_file: PathBuf::from("src/config/config_bot.cpp"),
            source_line: 1,
        }
    }

    fn run(d: &ConfigKeyDeclaration, meta: ConfigKeyMetadata) -> (RenderedEntry, Vec<ScanDiagnostic>) {
        let config = ConfigKeysConfig::default();
        let mut diagnostics = Vec::new();
        let entry = ValueInterpreter::new(&config).interpret(d, meta, &mut diagnostics);
        (entry, diagnostics)
    }

    #[test]
    fn type_labels() {
        assert_eq!(type_label("GetUint16", AccessorKind::Required).as_deref(), Some("uint16"));
        assert_eq!(type_label("GetMaybeBool", AccessorKind::Optional).as_deref(), Some("bool"));
        assert_eq!(
            type_label("GetStringIndex", AccessorKind::Required).as_deref(),
            Some("enum")
        );
        assert_eq!(type_label("GetBool", AccessorKind::Optional), None);
        assert_eq!(type_label("ReadUint16", AccessorKind::Required), None);
    }

    #[test]
    fn required_entry() {
        let d = decl("net.bind_address", "GetAddressIPv4", Some("\"0.0.0.0\""));
        let meta = ConfigKeyMetadata {
            reload_policy: ReloadPolicy::Never,
            fails_on_error: true,
        };
        let (entry, diags) = run(&d, meta);
        assert!(diags.is_empty());
        assert_eq!(entry.type_label, "addressipv4");
        assert!(!entry.optional);
        assert_eq!(entry.default_value.as_deref(), Some("0.0.0.0"));
        assert_eq!(entry.error_handling.as_deref(), Some("Abort operation"));
        assert_eq!(entry.reload.as_deref(), Some("Cannot be reloaded."));
    }

    #[test]
    fn optional_entry_has_no_default() {
        let d = decl("game.version", "GetMaybeUint8", None);
        let (entry, _) = run(&d, ConfigKeyMetadata::default());
        assert!(entry.optional);
        assert_eq!(entry.type_label, "uint8");
        assert!(entry.default_value.is_none());
        assert!(entry.error_handling.is_none());
        assert!(entry.reload.is_none());
    }

    #[test]
    fn string_length_constraints() {
        let d = decl("map.w3hmc.player_name", "GetString", Some("1, 15, \"[HMC]Aura\""));
        let (entry, _) = run(&d, ConfigKeyMetadata::default());
        assert_eq!(entry.constraints, vec!["Min length: 1", "Max length: 15"]);
        assert_eq!(entry.default_value.as_deref(), Some("[HMC]Aura"));
        assert_eq!(entry.error_handling.as_deref(), Some("Use default value"));
    }

    #[test]
    fn constraints_only_for_strings_with_three_arguments() {
        let (entry, _) = run(
            &decl("bot.name", "GetString", Some("\"Aura\"")),
            ConfigKeyMetadata::default(),
        );
        assert!(entry.constraints.is_empty());

        let (entry, _) = run(
            &decl("bot.ids", "GetUint8Vector", Some("4, 4, {}")),
            ConfigKeyMetadata::default(),
        );
        assert!(entry.constraints.is_empty());
    }

    #[test]
    fn unrecognized_accessor_reports_and_continues() {
        let d = decl("bot.odd", "Get", Some("1"));
        let (entry, diags) = run(&d, ConfigKeyMetadata::default());
        assert_eq!(entry.type_label, "");
        assert_eq!(entry.default_value.as_deref(), Some("1"));
        assert!(matches!(
            diags.as_slice(),
            [ScanDiagnostic::UnrecognizedAccessorName { accessor, .. }] if accessor == "Get"
        ));
    }
}
