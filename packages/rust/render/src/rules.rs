//! Default-value description rules.
//!
//! Each rule looks at one declaration's default and either produces a
//! description or passes. Rules run in [`DEFAULT_RULES`] order and the first
//! description wins; the final rule always answers.

use std::sync::LazyLock;

use keydoc_shared::ConfigKeysConfig;
use regex::Regex;

use crate::code_span;

/// Label for defaults that amount to "nothing".
const EMPTY_LABEL: &str = "Empty";

/// Label for the configured home directory.
const HOME_DIR_LABEL: &str = "Aura home directory";

/// Port range bounds whose default is the other bound.
const PORT_RANGE_BOUNDS: [(&str, &str); 2] = [
    ("net.host_port.min", "net.host_port.max"),
    ("net.host_port.max", "net.host_port.min"),
];

/// Source-level spellings of an empty default.
const EMPTY_SENTINELS: [&str; 2] = ["string()", "filesystem::path()"];

/// Prefix of a member variable used as its own default (`m_UserName`).
const MEMBER_PREFIX: &str = "m_";

/// `CFG.GetHomeDir()`, optionally joined with a relative path.
static HOME_DIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^CFG\.GetHomeDir\(\)(?:\s*/\s*filesystem::path\("([^"]*)"\))?$"#)
        .expect("home dir regex")
});

/// What a rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleInput<'a> {
    pub key_name: &'a str,
    /// Last top-level argument of the declaration, trimmed.
    pub candidate: &'a str,
    pub config: &'a ConfigKeysConfig,
}

/// One entry of the rule chain.
pub(crate) struct DefaultRule {
    pub name: &'static str,
    pub apply: fn(&RuleInput<'_>) -> Option<String>,
}

pub(crate) const DEFAULT_RULES: &[DefaultRule] = &[
    DefaultRule {
        name: "realm-inheritance",
        apply: realm_inheritance,
    },
    DefaultRule {
        name: "port-range",
        apply: port_range_cross_reference,
    },
    DefaultRule {
        name: "brace-list",
        apply: brace_list,
    },
    DefaultRule {
        name: "empty-sentinel",
        apply: empty_sentinel,
    },
    DefaultRule {
        name: "hex-literal",
        apply: hex_literal,
    },
    DefaultRule {
        name: "named-constant",
        apply: named_constant,
    },
    DefaultRule {
        name: "home-directory",
        apply: home_directory,
    },
    DefaultRule {
        name: "literal",
        apply: literal,
    },
];

/// Describe the default in `raw_arguments` for `key_name`.
pub(crate) fn describe_default(
    key_name: &str,
    raw_arguments: &str,
    config: &ConfigKeysConfig,
) -> String {
    let args = split_arguments(raw_arguments);
    let input = RuleInput {
        key_name,
        candidate: args.last().copied().unwrap_or(""),
        config,
    };

    DEFAULT_RULES
        .iter()
        .find_map(|rule| {
            let out = (rule.apply)(&input)?;
            tracing::trace!(key = key_name, rule = rule.name, "default rule applied");
            Some(out)
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Per-realm keys fall back to the matching global key.
fn realm_inheritance(input: &RuleInput<'_>) -> Option<String> {
    let config = input.config;
    if config.realm_prefix.is_empty() {
        return None;
    }
    let rest = input.key_name.strip_prefix(config.realm_prefix.as_str())?;
    Some(format!("<{}{rest}>", config.global_prefix))
}

fn port_range_cross_reference(input: &RuleInput<'_>) -> Option<String> {
    PORT_RANGE_BOUNDS
        .iter()
        .find(|(key, _)| *key == input.key_name)
        .map(|(_, other)| format!("Same as {}", code_span(other)))
}

fn brace_list(input: &RuleInput<'_>) -> Option<String> {
    let inner = input.candidate.strip_prefix('{')?.strip_suffix('}')?;
    Some(split_arguments(inner).join(" "))
}

fn empty_sentinel(input: &RuleInput<'_>) -> Option<String> {
    let is_empty = EMPTY_SENTINELS.contains(&input.candidate)
        || input.candidate.starts_with(MEMBER_PREFIX);
    is_empty.then(|| EMPTY_LABEL.to_string())
}

fn hex_literal(input: &RuleInput<'_>) -> Option<String> {
    let digits = input
        .candidate
        .strip_prefix("0x")
        .or_else(|| input.candidate.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok().map(|n| n.to_string())
}

fn named_constant(input: &RuleInput<'_>) -> Option<String> {
    input.config.named_constants.get(input.candidate).cloned()
}

fn home_directory(input: &RuleInput<'_>) -> Option<String> {
    let caps = HOME_DIR_RE.captures(input.candidate)?;
    match caps.get(1) {
        Some(sub) if !sub.as_str().is_empty() => Some(format!("{HOME_DIR_LABEL}/{}", sub.as_str())),
        _ => Some(HOME_DIR_LABEL.to_string()),
    }
}

fn literal(input: &RuleInput<'_>) -> Option<String> {
    Some(strip_quotes(input.candidate).to_string())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split an argument list on top-level commas.
///
/// Commas inside `()`, `[]`, `{}`, or string and character literals do not
/// split. Each piece is trimmed; an empty input yields no pieces.
pub(crate) fn split_arguments(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(raw[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = raw[start..].trim();
    if !last.is_empty() || !parts.is_empty() {
        parts.push(last);
    }
    parts
}

/// Strip one pair of surrounding double quotes, if present.
fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
