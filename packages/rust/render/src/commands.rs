//! Command reference rendering.

use keydoc_extract::CommandCatalog;

use crate::document::escape_angle_brackets;
use crate::heading;

const COMMANDS_TITLE: [&str; 3] = ["Commands", "==========", "# Available commands"];

/// Render the command reference, commands in name order.
pub fn render_command_document(catalog: &CommandCatalog) -> String {
    let mut lines: Vec<String> = COMMANDS_TITLE.iter().map(|s| s.to_string()).collect();

    for (name, entry) in &catalog.commands {
        lines.push(heading(name));
        if !entry.aliases.is_empty() {
            lines.push(format!("- Aliases: {}", entry.aliases.join(", ")));
        }
        for usage in &entry.usages {
            lines.push(format!("- Syntax: {usage}"));
        }
        lines.push(String::new());
    }

    escape_angle_brackets(&lines.join("\n"))
}
