//! Tag CLI commands: create, list, show, update, delete, accept, reject.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::{Confirm, Input};

use folksonomy_core::repository::tag::TagFilter;
use folksonomy_core::service::approval::ApprovalAction;
use folksonomy_infra::config::resolve_list_limit;
use folksonomy_types::tag::{CreateTagRequest, Tag, TagState, UpdateTagRequest};

use super::table;
use super::ListArgs;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum TagCommand {
    /// Propose a new tag (prompts for the name when omitted).
    Create {
        #[arg(long)]
        name: Option<String>,

        /// Short description.
        #[arg(long)]
        excerpt: Option<String>,

        /// Make this tag an alias of another tag (name or id).
        #[arg(long)]
        parent: Option<String>,
    },

    /// List tags.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a tag by name or id.
    Show { reference: String },

    /// Change a tag's name, excerpt or parent.
    Update {
        reference: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        excerpt: Option<String>,

        /// New parent (name or id).
        #[arg(long, conflicts_with = "clear_parent")]
        parent: Option<String>,

        /// Make the tag a root again.
        #[arg(long)]
        clear_parent: bool,
    },

    /// Delete a tag permanently.
    #[command(alias = "rm")]
    Delete {
        reference: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Accept the selected tags.
    Accept {
        #[arg(required = true)]
        references: Vec<String>,
    },

    /// Reject the selected tags.
    Reject {
        #[arg(required = true)]
        references: Vec<String>,
    },
}

pub async fn run(state: &AppState, command: TagCommand, json: bool) -> Result<()> {
    match command {
        TagCommand::Create {
            name,
            excerpt,
            parent,
        } => create_tag(state, name, excerpt, parent, json).await,
        TagCommand::List(args) => list_tags(state, args, json).await,
        TagCommand::Show { reference } => show_tag(state, &reference, json).await,
        TagCommand::Update {
            reference,
            name,
            excerpt,
            parent,
            clear_parent,
        } => {
            let request = UpdateTagRequest {
                name,
                excerpt,
                parent,
                clear_parent,
            };
            update_tag(state, &reference, request, json).await
        }
        TagCommand::Delete { reference, force } => delete_tag(state, &reference, force, json).await,
        TagCommand::Accept { references } => {
            bulk_action(state, &references, ApprovalAction::Accept, json).await
        }
        TagCommand::Reject { references } => {
            bulk_action(state, &references, ApprovalAction::Reject, json).await
        }
    }
}

async fn create_tag(
    state: &AppState,
    name: Option<String>,
    excerpt: Option<String>,
    parent: Option<String>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new().with_prompt("Tag name").interact_text()?,
    };

    let tag = state
        .tag_service
        .create_tag(CreateTagRequest {
            name,
            excerpt,
            parent,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tag)?);
        return Ok(());
    }

    table::print_done(&format!(
        "Tag {} proposed {}",
        style(&tag.tag.name).cyan(),
        style(format!("({})", tag.id)).dim()
    ));
    Ok(())
}

async fn list_tags(state: &AppState, args: ListArgs, json: bool) -> Result<()> {
    let filter = TagFilter {
        state: args.parsed_state()?,
        root_only: args.root_only(),
        search: args.search.clone(),
        sort_by: Some(args.sort.clone()),
        sort_order: Some(args.sort_order()),
        limit: Some(resolve_list_limit(&state.config, args.limit)),
        offset: args.offset,
    };

    let rows = state.tag_service.list_rows(Some(filter)).await?;
    let model = table::model(state, "tag")?;
    table::print_list(model, &rows, "Propose one with: folk tag create", json)
}

async fn show_tag(state: &AppState, reference: &str, json: bool) -> Result<()> {
    let tag = state.tag_service.resolve(reference).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tag)?);
        return Ok(());
    }

    let parent = match tag.tag.parent {
        Some(parent) => Some(state.tag_service.get_tag(&parent).await?.tag.name),
        None => None,
    };
    print_details(&tag, parent.as_deref());
    Ok(())
}

fn print_details(tag: &Tag, parent: Option<&str>) {
    let t = &tag.tag;
    println!();
    println!("  {}", style(&t.name).cyan().bold());
    if !t.excerpt.is_empty() {
        println!("  {}", style(&t.excerpt).dim());
    }
    println!();
    println!("  {}     {}", style("State:").bold(), format_state(&t.state));
    println!("  {}    {}", style("Parent:").bold(), parent.unwrap_or("-"));
    println!("  {}        {}", style("ID:").bold(), style(tag.id.to_string()).dim());
    println!();
    println!("  {}", style("── Timestamps ──").dim());
    println!("  {}   {}", style("Created:").bold(), t.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!("  {}   {}", style("Updated:").bold(), t.updated_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(at) = &t.accepted_at {
        println!("  {}  {}", style("Accepted:").bold(), at.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(at) = &t.rejected_at {
        println!("  {}  {}", style("Rejected:").bold(), at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();
}

/// State label colored like the list tables.
pub fn format_state(state: &TagState) -> String {
    match state {
        TagState::Accepted => format!("{}", style("● Accepted").green()),
        TagState::Rejected => format!("{}", style("✗ Rejected").red()),
        TagState::Proposed => format!("{}", style("○ Proposed").yellow()),
    }
}

async fn update_tag(
    state: &AppState,
    reference: &str,
    request: UpdateTagRequest,
    json: bool,
) -> Result<()> {
    let tag = state.tag_service.resolve(reference).await?;
    let updated = state.tag_service.update_tag(&tag.id, request).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        table::print_done(&format!("Tag {} updated.", style(&updated.tag.name).cyan()));
    }
    Ok(())
}

async fn delete_tag(state: &AppState, reference: &str, force: bool, json: bool) -> Result<()> {
    let tag = state.tag_service.resolve(reference).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Permanently delete tag '{}'?",
                style(&tag.tag.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state.tag_service.delete_tag(&tag.id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({"deleted": true, "id": tag.id, "name": tag.tag.name})
        );
    } else {
        println!("  {} Tag '{}' deleted.", style("✓").red().bold(), tag.tag.name);
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
        ids.push(state.tag_service.resolve(reference).await?.id);
    }

    let report = state.tag_service.bulk(&ids, action).await?;
    let message = table::model(state, "tag")?.action_message(&report);

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
