//! Skill CLI commands.
//!
//! Same verbs as tags, plus category filtering and `folk skill categories`
//! to inspect or edit the categories linked to a skill.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::{Confirm, Input};

use folksonomy_core::repository::skill::SkillFilter;
use folksonomy_core::service::approval::ApprovalAction;
use folksonomy_infra::config::resolve_list_limit;
use folksonomy_types::skill::{category_display, SkillCategory, SkillDetail};
use folksonomy_types::tag::{CreateTagRequest, UpdateTagRequest};

use super::table;
use super::tag::format_state;
use super::ListArgs;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum SkillCommand {
    /// Propose a new skill (prompts for the name when omitted).
    Create {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        excerpt: Option<String>,

        /// Make this skill an alias of another skill (name or id).
        #[arg(long)]
        parent: Option<String>,
    },

    /// List skills.
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        args: ListArgs,

        /// Only skills in this category (name or id).
        #[arg(long)]
        category: Option<String>,
    },

    /// Show a skill with its categories.
    Show { reference: String },

    /// Change a skill's name, excerpt or parent.
    Update {
        reference: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        excerpt: Option<String>,

        #[arg(long, conflicts_with = "clear_parent")]
        parent: Option<String>,

        #[arg(long)]
        clear_parent: bool,
    },

    /// Delete a skill, its category links and its user assignments.
    #[command(alias = "rm")]
    Delete {
        reference: String,

        #[arg(long)]
        force: bool,
    },

    /// Accept the selected skills.
    Accept {
        #[arg(required = true)]
        references: Vec<String>,
    },

    /// Reject the selected skills.
    Reject {
        #[arg(required = true)]
        references: Vec<String>,
    },

    /// Show or edit the categories of a skill.
    Categories {
        skill: String,

        /// Replace all categories with these.
        #[arg(long, num_args = 0.., conflicts_with_all = ["add", "remove"])]
        set: Option<Vec<String>>,

        /// Link one more category.
        #[arg(long)]
        add: Option<String>,

        /// Unlink a category.
        #[arg(long)]
        remove: Option<String>,
    },
}

pub async fn run(state: &AppState, command: SkillCommand, json: bool) -> Result<()> {
    match command {
        SkillCommand::Create {
            name,
            excerpt,
            parent,
        } => create_skill(state, name, excerpt, parent, json).await,
        SkillCommand::List { args, category } => list_skills(state, args, category, json).await,
        SkillCommand::Show { reference } => show_skill(state, &reference, json).await,
        SkillCommand::Update {
            reference,
            name,
            excerpt,
            parent,
            clear_parent,
        } => {
            let skill = state.skill_service.resolve_skill(&reference).await?;
            let updated = state
                .skill_service
                .update_skill(
                    &skill.id,
                    UpdateTagRequest {
                        name,
                        excerpt,
                        parent,
                        clear_parent,
                    },
                )
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&updated)?);
            } else {
                table::print_done(&format!("Skill {} updated.", style(&updated.tag.name).cyan()));
            }
            Ok(())
        }
        SkillCommand::Delete { reference, force } => delete_skill(state, &reference, force, json).await,
        SkillCommand::Accept { references } => {
            bulk_action(state, &references, ApprovalAction::Accept, json).await
        }
        SkillCommand::Reject { references } => {
            bulk_action(state, &references, ApprovalAction::Reject, json).await
        }
        SkillCommand::Categories {
            skill,
            set,
            add,
            remove,
        } => edit_categories(state, &skill, set, add, remove, json).await,
    }
}

async fn create_skill(
    state: &AppState,
    name: Option<String>,
    excerpt: Option<String>,
    parent: Option<String>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new().with_prompt("Skill name").interact_text()?,
    };

    let skill = state
        .skill_service
        .create_skill(CreateTagRequest {
            name,
            excerpt,
            parent,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&skill)?);
        return Ok(());
    }

    table::print_done(&format!(
        "Skill {} proposed {}",
        style(&skill.tag.name).cyan(),
        style(format!("({})", skill.id)).dim()
    ));
    Ok(())
}

async fn list_skills(
    state: &AppState,
    args: ListArgs,
    category: Option<String>,
    json: bool,
) -> Result<()> {
    let category = match category {
        Some(reference) => Some(state.skill_service.resolve_category(&reference).await?.id),
        None => None,
    };

    let filter = SkillFilter {
        state: args.parsed_state()?,
        category,
        root_only: args.root_only(),
        search: args.search.clone(),
        sort_by: Some(args.sort.clone()),
        sort_order: Some(args.sort_order()),
        limit: Some(resolve_list_limit(&state.config, args.limit)),
        offset: args.offset,
    };

    let rows = state.skill_service.list_rows(Some(filter)).await?;
    let model = table::model(state, "skill")?;
    table::print_list(model, &rows, "Propose one with: folk skill create", json)
}

async fn show_skill(state: &AppState, reference: &str, json: bool) -> Result<()> {
    let skill = state.skill_service.resolve_skill(reference).await?;
    let detail = state.skill_service.get_skill_detail(&skill.id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let parent = match detail.skill.tag.parent {
        Some(parent) => Some(state.skill_service.get_skill(&parent).await?.tag.name),
        None => None,
    };
    print_details(&detail, parent.as_deref());
    Ok(())
}

fn print_details(detail: &SkillDetail, parent: Option<&str>) {
    let t = &detail.skill.tag;
    let categories = detail.category_display();

    println!();
    println!("  {}", style(&t.name).cyan().bold());
    if !t.excerpt.is_empty() {
        println!("  {}", style(&t.excerpt).dim());
    }
    println!();
    println!("  {}       {}", style("State:").bold(), format_state(&t.state));
    println!("  {}      {}", style("Parent:").bold(), parent.unwrap_or("-"));
    println!(
        "  {}  {}",
        style("Categories:").bold(),
        if categories.is_empty() { "-" } else { categories.as_str() }
    );
    println!(
        "  {}          {}",
        style("ID:").bold(),
        style(detail.skill.id.to_string()).dim()
    );
    println!();
    println!("  {}", style("── Timestamps ──").dim());
    println!("  {}     {}", style("Created:").bold(), t.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("  {}     {}", style("Updated:").bold(), t.updated_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(at) = &t.accepted_at {
        println!("  {}    {}", style("Accepted:").bold(), at.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(at) = &t.rejected_at {
        println!("  {}    {}", style("Rejected:").bold(), at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();
}

async fn delete_skill(state: &AppState, reference: &str, force: bool, json: bool) -> Result<()> {
    let skill = state.skill_service.resolve_skill(reference).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete skill '{}' and every user assignment of it?",
                style(&skill.tag.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.skill_service.delete_skill(&skill.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "id": skill.id, "name": skill.tag.name})
        );
    } else {
        println!("  {} Skill '{}' deleted.", style("✓").red().bold(), skill.tag.name);
    }
    Ok(())
}

async fn bulk_action(
    state: &AppState,
    references: &[String],
    action: ApprovalAction,
    json: bool,
) -> Result<()> {
    let mut ids = Vec::with_capacity(references.len());
    for reference in references {
        ids.push(state.skill_service.resolve_skill(reference).await?.id);
    }

    let report = state.skill_service.bulk(&ids, action).await?;
    let message = table::model(state, "skill")?.action_message(&report);

    if json {
        println!(
            "{}",
            serde_json::json!({"action": report.action, "processed": report.processed, "message": message})
        );
    } else {
        table::print_done(&message);
    }
    Ok(())
}

async fn edit_categories(
    state: &AppState,
    reference: &str,
    set: Option<Vec<String>>,
    add: Option<String>,
    remove: Option<String>,
    json: bool,
) -> Result<()> {
    let skill = state.skill_service.resolve_skill(reference).await?;
    let service = &state.skill_service;

    let mut categories: Vec<SkillCategory> = match set {
        Some(references) => service.set_skill_categories(&skill.id, &references).await?,
        None => service.skill_categories(&skill.id).await?,
    };
    if let Some(reference) = add {
        categories = service.add_skill_category(&skill.id, &reference).await?;
    }
    if let Some(reference) = remove {
        categories = service.remove_skill_category(&skill.id, &reference).await?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }

    println!();
    if categories.is_empty() {
        println!(
            "  {} has no categories.",
            style(&skill.tag.name).cyan().bold()
        );
    } else {
        println!(
            "  {}  {}",
            style(&skill.tag.name).cyan().bold(),
            style(category_display(&categories)).dim()
        );
        println!("{}", table::build(table::model(state, "skill_category")?, &categories));
    }
    println!();
    Ok(())
}
