//! Per-key reload and error-handling metadata.
//!
//! Fail markers (`CFG.FailIfErrorLast();`) carry no key of their own; they
//! belong to the most recently declared key. That attribution assumes the
//! marker follows its declaration with no other statement in between.
//! Blank lines and comments do not break adjacency. When the assumption is
//! violated the marker is still attributed, and a
//! [`ScanDiagnostic::NonAdjacentMarker`] is recorded.

use std::collections::HashMap;

use keydoc_shared::{ConfigKeyMetadata, ReloadPolicy, ScanDiagnostic};
use tracing::{debug, warn};

/// Line suffix identifying a fail marker.
const FAIL_MARKER_SUFFIX: &str = "CFG.FailIfErrorLast();";

/// Whether a trimmed line is a fail marker.
pub fn is_fail_marker(line: &str) -> bool {
    line.ends_with(FAIL_MARKER_SUFFIX)
}

#[derive(Debug)]
struct LastDeclared {
    key: String,
    adjacent: bool,
}

/// Builds the key → metadata map across a whole scan.
#[derive(Debug, Default)]
pub struct MetadataAccumulator {
    entries: HashMap<String, ConfigKeyMetadata>,
    last: Option<LastDeclared>,
}

impl MetadataAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration of `key`, optionally overriding its reload policy.
    ///
    /// The metadata record is created on first sight; `None` leaves the
    /// current policy in place.
    pub fn record_declaration(&mut self, key: &str, reload: Option<ReloadPolicy>) {
        let meta = self.entries.entry(key.to_string()).or_default();
        if let Some(policy) = reload {
            meta.reload_policy = policy;
        }
        self.last = Some(LastDeclared {
            key: key.to_string(),
            adjacent: true,
        });
    }

    /// Apply a fail marker to the most recently declared key.
    ///
    /// Returns a diagnostic if there is no key to attribute it to, or if the
    /// marker is not adjacent to that key's declaration.
    pub fn record_fail_marker(&mut self, location: &str) -> Option<ScanDiagnostic> {
        let Some(last) = self.last.as_ref() else {
            warn!(location, "fail marker with no preceding key declaration, skipping");
            return Some(ScanDiagnostic::MissingKeyContext {
                location: location.to_string(),
            });
        };

        self.entries.entry(last.key.clone()).or_default().fails_on_error = true;

        if last.adjacent {
            return None;
        }
        debug!(location, key = %last.key, "fail marker not adjacent to its declaration");
        Some(ScanDiagnostic::NonAdjacentMarker {
            key: last.key.clone(),
            location: location.to_string(),
        })
    }

    /// Note a statement that is neither a declaration nor a fail marker.
    pub fn record_other_statement(&mut self) {
        if let Some(last) = self.last.as_mut() {
            last.adjacent = false;
        }
    }

    /// Consume the accumulator, returning the metadata map.
    pub fn into_entries(self) -> HashMap<String, ConfigKeyMetadata> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_detection() {
        assert!(is_fail_marker("CFG.FailIfErrorLast();"));
        assert!(is_fail_marker("if (m_UDPForwardTraffic) CFG.FailIfErrorLast();"));
        assert!(!is_fail_marker("CFG.SetFailed();"));
        assert!(!is_fail_marker("CFG.FailIfErrorLast(); // trailing"));
    }

    #[test]
    fn reload_policy_last_write_wins() {
        let mut acc = MetadataAccumulator::new();
        acc.record_declaration("bot.latency", Some(ReloadPolicy::Never));
        acc.record_declaration("bot.latency", Some(ReloadPolicy::NextGame));
        acc.record_declaration("bot.latency", None);
        let entries = acc.into_entries();
        assert_eq!(entries["bot.latency"].reload_policy, ReloadPolicy::NextGame);
    }

    #[test]
    fn marker_applies_to_most_recent_key() {
        let mut acc = MetadataAccumulator::new();
        acc.record_declaration("net.bind_address", None);
        acc.record_declaration("net.bind_address6", None);
        assert!(acc.record_fail_marker("config_net.cpp:10").is_none());
        let entries = acc.into_entries();
        assert!(entries["net.bind_address6"].fails_on_error);
        assert!(!entries["net.bind_address"].fails_on_error);
    }

    #[test]
    fn marker_without_context() {
        let mut acc = MetadataAccumulator::new();
        let diag = acc.record_fail_marker("config_net.cpp:3");
        assert_eq!(
            diag,
            Some(ScanDiagnostic::MissingKeyContext {
                location: "config_net.cpp:3".into()
            })
        );
        assert!(acc.into_entries().is_empty());
    }

    #[test]
    fn intervening_statement_is_reported() {
        let mut acc = MetadataAccumulator::new();
        acc.record_declaration("net.udp_redirect.port", None);
        acc.record_other_statement();
        let diag = acc.record_fail_marker("config_net.cpp:20");
        assert!(matches!(diag, Some(ScanDiagnostic::NonAdjacentMarker { ref key, .. }) if key == "net.udp_redirect.port"));
        assert!(acc.into_entries()["net.udp_redirect.port"].fails_on_error);
    }
}
