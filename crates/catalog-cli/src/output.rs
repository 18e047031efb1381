//! Table, tree, and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use catalog_core::error::AppError;
use catalog_entity::category::CategoryStatus;
use catalog_service::VisibleRow;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of items in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
    }
    Ok(())
}

/// Print a single item in the selected format
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

/// Render visible tree rows as indented text, one row per line.
pub fn render_tree(rows: &[VisibleRow]) -> String {
    if rows.is_empty() {
        return "No categories.\n".to_string();
    }

    let mut out = String::new();
    for row in rows {
        let marker = match (row.has_children, row.expanded) {
            (false, _) => '·',
            (true, true) => '▾',
            (true, false) => '▸',
        };
        let cursor = if row.selected { '>' } else { ' ' };
        let indent = "  ".repeat(row.depth as usize);
        let inactive = if row.status == CategoryStatus::Inactive {
            " [inactive]"
        } else {
            ""
        };

        out.push_str(&format!(
            "{cursor} {indent}{marker} {} ({}) {}{inactive}\n",
            row.name, row.id, row.product_count
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::types::CategoryId;

    fn row(id: &str, depth: u32, has_children: bool, expanded: bool) -> VisibleRow {
        VisibleRow {
            id: CategoryId::new(id).expect("valid id"),
            name: id.to_uppercase(),
            status: CategoryStatus::Active,
            product_count: 3,
            depth,
            has_children,
            expanded,
            selected: false,
        }
    }

    #[test]
    fn test_render_tree_markers_and_indent() {
        let mut child = row("b", 1, false, false);
        child.selected = true;
        let mut closed = row("c", 0, true, false);
        closed.status = CategoryStatus::Inactive;

        let text = render_tree(&[row("a", 0, true, true), child, closed]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "  ▾ A (a) 3");
        assert_eq!(lines[1], ">   · B (b) 3");
        assert_eq!(lines[2], "  ▸ C (c) 3 [inactive]");
    }

    #[test]
    fn test_render_empty_tree() {
        assert_eq!(render_tree(&[]), "No categories.\n");
    }
}
