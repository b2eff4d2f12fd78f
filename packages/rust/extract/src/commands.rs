//! Command declaration scanner.
//!
//! Commands are dispatched through `switch` statements on hashed names:
//! - `case HashCode("name"): {` opens a main command
//! - `case HashCode("alias"):` (no brace) is an alias of the next main command
//! - `"Usage: " + cmdToken + "<syntax>");` documents the current command

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{instrument, warn};

/// Matches an alias (or main command) case label.
static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"case HashCode\("([a-zA-Z0-9]+)"\):"#).expect("alias regex")
});

/// Matches a main command case label opening a block.
static MAIN_COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"case HashCode\("([a-zA-Z0-9]+)"\): \{"#).expect("main command regex")
});

/// Matches a usage error reply.
static USAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""Usage: " \+ cmdToken \+ "([^"]+)"\);"#).expect("usage regex")
});

/// A documented command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandEntry {
    pub aliases: Vec<String>,
    /// Distinct usage strings, in first-seen order.
    pub usages: Vec<String>,
}

/// All commands found in a run, keyed (and therefore sorted) by name.
#[derive(Debug, Default)]
pub struct CommandCatalog {
    pub commands: BTreeMap<String, CommandEntry>,
}

/// Accumulates commands across the files of one run.
#[derive(Debug, Default)]
pub struct CommandScanner {
    commands: BTreeMap<String, CommandEntry>,
    seen: BTreeSet<String>,
}

impl CommandScanner {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(skip_all, fields(source = %source.display()))]
    pub fn scan_file(&mut self, source: &Path, content: &str) {
        let mut current = String::new();
        let mut pending_aliases: Vec<String> = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();

            if let Some(caps) = MAIN_COMMAND_RE.captures(line) {
                let name = caps[1].to_string();
                if !self.seen.insert(name.clone()) {
                    warn!(command = %name, line = idx + 1, "duplicate command");
                }
                let entry = self.commands.entry(name.clone()).or_default();
                entry.aliases = std::mem::take(&mut pending_aliases);
                current = name;
                continue;
            }

            if let Some(caps) = ALIAS_RE.captures(line) {
                current.clear();
                pending_aliases.push(caps[1].to_string());
                continue;
            }

            let Some(caps) = USAGE_RE.captures(line) else {
                continue;
            };
            if current.is_empty() {
                continue;
            }
            if !caps[0].contains(current.as_str()) {
                warn!(command = %current, line = idx + 1, "usage text does not match command name");
                continue;
            }
            let usage = caps[1].to_string();
            let entry = self.commands.entry(current.clone()).or_default();
            if !entry.usages.contains(&usage) {
                entry.usages.push(usage);
            }
        }
    }

    pub fn finish(self) -> CommandCatalog {
        CommandCatalog {
            commands: self.commands,
        }
    }
}
