//! Reference document generation for keydoc.
//!
//! This crate turns scan results from `keydoc-extract` into the final
//! configuration and command reference documents: value interpretation,
//! filtering, ordering, and text assembly.

pub mod collation;
pub mod commands;
pub mod document;
pub mod interpret;
pub mod pipeline;
mod rules;

pub use collation::locale_cmp;
pub use commands::render_command_document;
pub use document::{EntryFilter, escape_angle_brackets, render_config_document, select_entries};
pub use interpret::{ValueInterpreter, type_label};
pub use pipeline::{
    ConfigReference, build_config_reference, generate_command_reference,
    generate_config_reference, write_document,
};

/// Key or command name in backslash-escaped backticks.
pub(crate) fn code_span(name: &str) -> String {
    format!("\\`{name}\\`")
}

/// Second-level heading for one documented name.
pub(crate) fn heading(name: &str) -> String {
    format!("## {}", code_span(name))
}
