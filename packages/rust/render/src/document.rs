//! Reference document assembly.
//!
//! Output is Markdown-ish plain text assembled line by line, joined with
//! `\n`, then passed through [`escape_angle_brackets`] as a whole.

use std::sync::LazyLock;

use keydoc_shared::{ConfigKeysConfig, RenderedEntry};
use regex::Regex;

use crate::collation::locale_cmp;
use crate::heading;

/// Title block of the configuration reference.
const CONFIG_TITLE: [&str; 3] = ["Config", "==========", "# Supported config keys"];

/// Which entries the document leaves out.
#[derive(Debug, Clone, Copy)]
pub struct EntryFilter<'a> {
    pub hardcoded_suffix: &'a str,
    pub excluded_substrings: &'a [String],
}

impl<'a> From<&'a ConfigKeysConfig> for EntryFilter<'a> {
    fn from(config: &'a ConfigKeysConfig) -> Self {
        Self {
            hardcoded_suffix: &config.hardcoded_suffix,
            excluded_substrings: &config.excluded_substrings,
        }
    }
}

impl EntryFilter<'_> {
    /// Whether `key` belongs in the document.
    pub fn keeps(&self, key: &str) -> bool {
        if !self.hardcoded_suffix.is_empty() && key.ends_with(self.hardcoded_suffix) {
            return false;
        }
        !self
            .excluded_substrings
            .iter()
            .any(|s| !s.is_empty() && key.contains(s.as_str()))
    }
}

/// Drop filtered entries and sort the rest by key name.
pub fn select_entries(entries: Vec<RenderedEntry>, filter: EntryFilter<'_>) -> Vec<RenderedEntry> {
    let mut kept: Vec<RenderedEntry> = entries
        .into_iter()
        .filter(|e| filter.keeps(&e.key_name))
        .collect();
    kept.sort_by(|a, b| locale_cmp(&a.key_name, &b.key_name));
    kept
}

/// Render already-selected entries into the final document text.
pub fn render_config_document(entries: &[RenderedEntry]) -> String {
    let mut lines: Vec<String> = CONFIG_TITLE.iter().map(|s| s.to_string()).collect();

    for entry in entries {
        lines.push(heading(&entry.key_name));
        lines.push(format!("- Type: {}", entry.type_label));
        if !entry.constraints.is_empty() {
            let sentences: Vec<String> = entry.constraints.iter().map(|c| format!("{c}.")).collect();
            lines.push(format!("- Constraints: {}", sentences.join(" ")));
        }
        if entry.optional {
            lines.push("- Optional key: Yes".to_string());
        } else {
            lines.push(format!(
                "- Default value: {}",
                entry.default_value.as_deref().unwrap_or_default()
            ));
            lines.push(format!(
                "- Error handling: {}",
                entry.error_handling.as_deref().unwrap_or_default()
            ));
        }
        if let Some(reload) = &entry.reload {
            lines.push(format!("- Reloadable: {reload}"));
        }
        lines.push(String::new());
    }

    escape_angle_brackets(&lines.join("\n"))
}

/// Backslash-escape every `<` and `>`.
pub fn escape_angle_brackets(text: &str) -> String {
    static ANGLE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"([<>])").expect("valid regex"));

    ANGLE_RE.replace_all(text, r"\$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(key: &str) -> RenderedEntry {
        RenderedEntry {
            key_name: key.into(),
            type_label: "uint16".into(),
            constraints: vec![],
            optional: false,
            default_value: Some("6112".into()),
            error_handling: Some("Use default value".into()),
            reload: None,
        }
    }

    fn optional(key: &str) -> RenderedEntry {
        RenderedEntry {
            optional: true,
            default_value: None,
            error_handling: None,
            ..required(key)
        }
    }

    const NO_FILTER: EntryFilter<'static> = EntryFilter {
        hardcoded_suffix: "",
        excluded_substrings: &[],
    };

    #[test]
    fn title_block() {
        let doc = render_config_document(&[]);
        assert_eq!(doc, "Config\n==========\n# Supported config keys");
    }

    #[test]
    fn required_entry_lines() {
        let mut entry = required("net.udp_ipv6.port");
        entry.reload = Some("Cannot be reloaded.".into());
        let doc = render_config_document(&[entry]);
        let expected = "\
Config
==========
# Supported config keys
## \\`net.udp_ipv6.port\\`
- Type: uint16
- Default value: 6112
- Error handling: Use default value
- Reloadable: Cannot be reloaded.
";
        assert_eq!(doc, expected);
    }

    #[test]
    fn optional_entry_lines() {
        let doc = render_config_document(&[optional("net.host_port.only")]);
        assert!(doc.contains("- Optional key: Yes"));
        assert!(!doc.contains("Default value"));
        assert!(!doc.contains("Error handling"));
        assert!(!doc.contains("Reloadable"));
    }

    #[test]
    fn constraints_line() {
        let mut entry = required("hosting.commands.trigger");
        entry.type_label = "string".into();
        entry.constraints = vec!["Min length: 1".into(), "Max length: 15".into()];
        let doc = render_config_document(&[entry]);
        assert!(doc.contains("\n- Constraints: Min length: 1. Max length: 15.\n"));
    }

    #[test]
    fn angle_brackets_escaped() {
        let mut entry = required("bot.greeting");
        entry.default_value = Some("<none>".into());
        let doc = render_config_document(&[entry]);
        assert!(doc.contains("- Default value: \\<none\\>"));
        assert!(!doc.contains("- Default value: <none>"));
    }

    #[test]
    fn filter_drops_hardcoded_and_excluded() {
        let excluded = vec![".gameranger.".to_string()];
        let filter = EntryFilter {
            hardcoded_suffix: "--but_its_hardcoded",
            excluded_substrings: &excluded,
        };
        assert!(filter.keeps("net.bind_address"));
        assert!(filter.keeps("net.gameranger"));
        assert!(!filter.keeps("net.port_forwarding.upnp--but_its_hardcoded"));
        assert!(!filter.keeps("net.gameranger.cache"));
    }

    #[test]
    fn select_sorts_by_locale() {
        let entries = vec![required("net.udp.port"), required("Bot.x"), required("net.udp_ipv6.port")];
        let keys: Vec<_> = select_entries(entries, NO_FILTER)
            .into_iter()
            .map(|e| e.key_name)
            .collect();
        assert_eq!(keys, vec!["Bot.x", "net.udp_ipv6.port", "net.udp.port"]);
    }
}
