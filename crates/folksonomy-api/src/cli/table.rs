//! Admin list tables.
//!
//! Every `list` command renders through the model's `list_display` columns
//! and the row's [`AdminRow`] implementation, so the terminal tables follow
//! the admin configuration.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use serde::Serialize;

use folksonomy_core::admin::{AdminRow, ModelAdmin};

use crate::state::AppState;

/// Look up a registered model, failing loudly if it is missing.
pub fn model<'a>(state: &'a AppState, name: &str) -> Result<&'a ModelAdmin> {
    state
        .admin
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("model '{name}' is not registered"))
}

/// Build a table for `rows` from the model's `list_display`.
pub fn build<R: AdminRow>(model: &ModelAdmin, rows: &[R]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        model
            .column_labels()
            .into_iter()
            .map(|label| Cell::new(label).fg(Color::White))
            .collect::<Vec<_>>(),
    );

    for cells in model.render(rows) {
        table.add_row(
            model
                .list_display
                .iter()
                .zip(cells)
                .map(|(column, text)| styled_cell(column, text))
                .collect::<Vec<_>>(),
        );
    }

    table
}

fn styled_cell(column: &str, text: String) -> Cell {
    match column {
        "state" => match text.as_str() {
            "Accepted" => Cell::new(format!("● {text}")).fg(Color::Green),
            "Rejected" => Cell::new(format!("✗ {text}")).fg(Color::Red),
            _ => Cell::new(format!("○ {text}")).fg(Color::Yellow),
        },
        "name" | "username" | "user" => Cell::new(text).fg(Color::Cyan),
        "created_at" | "updated_at" => Cell::new(text).fg(Color::DarkGrey),
        _ => Cell::new(text),
    }
}

/// Print a list as JSON or as an admin table with a count footer.
pub fn print_list<R: AdminRow + Serialize>(
    model: &ModelAdmin,
    rows: &[R],
    empty_hint: &str,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!();
        println!(
            "  {} No {} found. {}",
            style("i").blue().bold(),
            model.verbose_name_plural,
            style(empty_hint).yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", build(model, rows));
    println!();
    println!(
        "  {} {}",
        style(rows.len()).bold(),
        if rows.len() == 1 {
            model.verbose_name
        } else {
            model.verbose_name_plural
        }
    );
    println!();
    Ok(())
}

/// Green check line, as printed after a successful write.
pub fn print_done(message: &str) {
    println!();
    println!("  {} {}", style("✓").green().bold(), message);
    println!();
}
