//! Skill category CLI commands.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use folksonomy_types::skill::CreateCategoryRequest;

use super::table;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum CategoryCommand {
    /// Create a category.
    Create { name: String },

    /// List categories by name.
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete a category. Skills linked to it lose the link.
    #[command(alias = "rm")]
    Delete {
        reference: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(state: &AppState, command: CategoryCommand, json: bool) -> Result<()> {
    match command {
        CategoryCommand::Create { name } => {
            let category = state
                .skill_service
                .create_category(CreateCategoryRequest { name })
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&category)?);
            } else {
                table::print_done(&format!("Category {} created.", style(&category.name).cyan()));
            }
            Ok(())
        }
        CategoryCommand::List { search } => {
            let categories = state.skill_service.list_categories(search).await?;
            let model = table::model(state, "skill_category")?;
            table::print_list(model, &categories, "Create one with: folk category create", json)
        }
        CategoryCommand::Delete { reference, force } => {
            let category = state.skill_service.resolve_category(&reference).await?;

            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Delete category '{}'?",
                        style(&category.name).red().bold()
                    ))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("  Cancelled.");
                    return Ok(());
                }
            }

            state.skill_service.delete_category(&category.id).await?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({"deleted": true, "id": category.id, "name": category.name})
                );
            } else {
                println!("  {} Category '{}' deleted.", style("✓").red().bold(), category.name);
            }
            Ok(())
        }
    }
}
