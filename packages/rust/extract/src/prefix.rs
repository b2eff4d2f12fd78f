//! Realm key namespace rewriting.
//!
//! The realm source builds its keys as `m_CFGKeyPrefix + "suffix"`. The same
//! declarations are documented twice: once under the shared namespace and
//! once under the per-realm namespace, depending on which constructor the
//! line sits in.

use std::borrow::Cow;

use crate::scanner::RealmScope;

/// Prefix-construction fragment as it appears in realm source lines.
const PREFIX_FRAGMENT: &str = r#"m_CFGKeyPrefix + ""#;

/// Literal namespaces substituted for [`PREFIX_FRAGMENT`].
#[derive(Debug, Clone, Copy)]
pub struct PrefixRewriter<'a> {
    pub global_prefix: &'a str,
    pub realm_prefix: &'a str,
}

impl PrefixRewriter<'_> {
    /// Replace the prefix fragment in `line` with a quoted literal namespace.
    ///
    /// Lines without the fragment are returned borrowed and unchanged.
    pub fn rewrite<'l>(&self, line: &'l str, scope: RealmScope) -> Cow<'l, str> {
        if !line.contains(PREFIX_FRAGMENT) {
            return Cow::Borrowed(line);
        }
        let prefix = match scope {
            RealmScope::Global => self.global_prefix,
            RealmScope::PerRealm => self.realm_prefix,
        };
        Cow::Owned(line.replace(PREFIX_FRAGMENT, &format!("\"{prefix}")))
    }
}
