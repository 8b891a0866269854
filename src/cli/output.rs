//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::policy::Decision;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a decision as a colored string
pub fn format_decision(decision: &Decision) -> String {
    match decision {
        Decision::Allow => "allow".green().to_string(),
        Decision::Redirect(target) => format!("{} {}", "redirect".yellow(), target),
    }
}

/// Print the ordered rule table
pub fn print_rules_table(rows: &[(usize, &str, &str, &str)]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Rule").fg(Color::Cyan),
            Cell::new("Matches").fg(Color::Cyan),
            Cell::new("Outcome").fg(Color::Cyan),
        ]);

    for (order, name, matches, outcome) in rows {
        table.add_row(vec![
            Cell::new(order),
            Cell::new(name),
            Cell::new(matches),
            Cell::new(outcome),
        ]);
    }

    println!("{table}");
    info("Rules are evaluated top to bottom; the first match wins. Unmatched paths are allowed.");
}
