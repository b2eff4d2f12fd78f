//! Declaration line patterns.
//!
//! Two single-line shapes are recognized, tried in this order:
//! - Optional: `CFG.GetMaybe<Type>("<key>"` (no default)
//! - Required: `CFG.Get<Type>("<key>", <rest>)` (default in `<rest>`)
//!
//! `<rest>` ends at the parenthesis that closes the accessor call, so
//! trailing operators, separators, or wrapping calls on the same line are
//! ignored. A call whose arguments continue on the next line matches neither.

use std::sync::LazyLock;

use keydoc_shared::AccessorKind;
use regex::Regex;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A declaration recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationMatch {
    pub kind: AccessorKind,
    /// Accessor name, e.g. `GetUint16`.
    pub accessor: String,
    pub key_name: String,
    /// Everything after the key up to the call's closing `)` (Required only).
    pub raw_arguments: Option<String>,
}

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches `CFG.GetMaybeBool("bot.toggle_every_realm"`.
static OPTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"CFG\.(GetMaybe[A-Za-z0-9]+)\("([^"]+)""#).expect("optional regex")
});

/// Matches the head of `CFG.GetUint16("net.host_port.min", 6112)`, up to
/// the first character of the remaining arguments.
static REQUIRED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"CFG\.(Get[A-Za-z0-9]+)\("([^"]+)",\s*"#).expect("required regex")
});

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Match one physical line against the declaration patterns.
pub fn match_declaration(line: &str) -> Option<DeclarationMatch> {
    if let Some(caps) = OPTIONAL_RE.captures(line) {
        return Some(DeclarationMatch {
            kind: AccessorKind::Optional,
            accessor: caps[1].to_string(),
            key_name: caps[2].to_string(),
            raw_arguments: None,
        });
    }

    let caps = REQUIRED_RE.captures(line)?;
    let head = caps.get(0)?;
    let rest = call_arguments(&line[head.end()..])?;

    Some(DeclarationMatch {
        kind: AccessorKind::Required,
        accessor: caps[1].to_string(),
        key_name: caps[2].to_string(),
        raw_arguments: Some(rest.to_string()),
    })
}

/// Text up to the `)` that closes the current call, or `None` if the call
/// is not closed on this line.
///
/// Brackets of any kind nest; parentheses inside string and character
/// literals are ignored.
fn call_arguments(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
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
            ')' if depth == 0 => return Some(text[..i].trim_end()),
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}
