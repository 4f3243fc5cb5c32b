//! `folk admin`: print the registered admin models.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};

use folksonomy_core::admin::{ListFilter, ModelAdmin};

use super::table;
use crate::state::AppState;

pub async fn show(state: &AppState, model: Option<String>, json: bool) -> Result<()> {
    let models: Vec<&ModelAdmin> = match model.as_deref() {
        Some(name) => vec![table::model(state, name)?],
        None => state.admin.models.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    println!();
    println!("{}", overview(&models));
    println!();
    Ok(())
}

fn filter_label(filter: &ListFilter) -> &'static str {
    match filter {
        ListFilter::State => "state",
        ListFilter::Category => "category",
        ListFilter::AliasOrRoot => "alias/root",
    }
}

fn joined(items: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    let parts: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}

fn overview(models: &[&ModelAdmin]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Model").fg(Color::White),
        Cell::new("List display").fg(Color::White),
        Cell::new("Filters").fg(Color::White),
        Cell::new("Search").fg(Color::White),
        Cell::new("Raw id").fg(Color::White),
        Cell::new("Read-only").fg(Color::White),
        Cell::new("Actions").fg(Color::White),
    ]);

    for model in models {
        table.add_row(vec![
            Cell::new(model.verbose_name_plural).fg(Color::Cyan),
            Cell::new(joined(&model.list_display)),
            Cell::new(joined(model.list_filter.iter().map(filter_label))),
            Cell::new(joined(&model.search_fields)),
            Cell::new(joined(&model.raw_id_fields)),
            Cell::new(joined(&model.readonly_fields)),
            Cell::new(joined(model.actions.iter().map(|a| a.description.as_str()))),
        ]);
    }

    table
}
