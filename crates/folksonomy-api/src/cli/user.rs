//! User and user-skill CLI commands.

use anyhow::Result;
use clap::Subcommand;
use console::style;
use dialoguer::Confirm;

use folksonomy_core::repository::user::UserSkillFilter;
use folksonomy_infra::config::resolve_list_limit;
use folksonomy_types::id::UserSkillId;
use folksonomy_types::user::{AssignSkillRequest, CreateUserRequest};

use super::table;
use crate::state::AppState;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a user.
    Create { username: String },

    /// List users by username.
    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete a user and all of its skill assignments.
    #[command(alias = "rm")]
    Delete {
        reference: String,

        #[arg(long)]
        force: bool,
    },

    /// Give a user a skill (both by name or id).
    Assign {
        user: String,
        skill: String,

        /// Skill level (defaults to 1).
        #[arg(long)]
        level: Option<u16>,
    },

    /// Change the level of an assignment.
    Level { id: String, level: u16 },

    /// Remove an assignment.
    Unassign { id: String },

    /// List assignments, newest first.
    Skills {
        /// Only this user's skills.
        #[arg(long)]
        user: Option<String>,

        /// Only holders of this skill.
        #[arg(long)]
        skill: Option<String>,

        /// Search usernames and skill names.
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long)]
        limit: Option<i64>,

        #[arg(long)]
        offset: Option<i64>,
    },
}

fn parse_assignment_id(id: &str) -> Result<UserSkillId> {
    id.parse::<UserSkillId>()
        .map_err(|e| anyhow::anyhow!("invalid user skill id '{id}': {e}"))
}

pub async fn run(state: &AppState, command: UserCommand, json: bool) -> Result<()> {
    let users = &state.user_service;

    match command {
        UserCommand::Create { username } => {
            let user = users.create_user(CreateUserRequest { username }).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                table::print_done(&format!(
                    "User {} created {}",
                    style(&user.username).cyan(),
                    style(format!("({})", user.id)).dim()
                ));
            }
            Ok(())
        }
        UserCommand::List { search } => {
            let rows = users.list_users(search).await?;
            table::print_list(
                table::model(state, "user")?,
                &rows,
                "Create one with: folk user create",
                json,
            )
        }
        UserCommand::Delete { reference, force } => {
            let user = users.resolve_user(&reference).await?;

            if !force && !json {
                let confirmed = Confirm::new()
                    .with_prompt(format!(
                        "Delete user '{}' and all of their skills?",
                        style(&user.username).red().bold()
                    ))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    println!("  Cancelled.");
                    return Ok(());
                }
            }

            users.delete_user(&user.id).await?;
            if json {
                println!(
                    "{}",
                    serde_json::json!({"deleted": true, "id": user.id, "username": user.username})
                );
            } else {
                println!("  {} User '{}' deleted.", style("✓").red().bold(), user.username);
            }
            Ok(())
        }
        UserCommand::Assign { user, skill, level } => {
            let assigned = users
                .assign_skill(AssignSkillRequest {
                    user: user.clone(),
                    skill: skill.clone(),
                    skill_level: level,
                })
                .await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&assigned)?);
            } else {
                table::print_done(&format!(
                    "{} has {} at level {} {}",
                    style(&user).cyan(),
                    style(&skill).cyan(),
                    assigned.skill_level,
                    style(format!("({})", assigned.id)).dim()
                ));
            }
            Ok(())
        }
        UserCommand::Level { id, level } => {
            let id = parse_assignment_id(&id)?;
            let updated = users.set_level(&id, level).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&updated)?);
            } else {
                table::print_done(&format!("Skill level set to {}.", updated.skill_level));
            }
            Ok(())
        }
        UserCommand::Unassign { id } => {
            let id = parse_assignment_id(&id)?;
            users.unassign(&id).await?;
            if json {
                println!("{}", serde_json::json!({"deleted": true, "id": id}));
            } else {
                println!("  {} Assignment removed.", style("✓").red().bold());
            }
            Ok(())
        }
        UserCommand::Skills {
            user,
            skill,
            search,
            limit,
            offset,
        } => {
            let user_id = match user {
                Some(reference) => Some(users.resolve_user(&reference).await?.id),
                None => None,
            };
            let skill_id = match skill {
                Some(reference) => Some(state.skill_service.resolve_skill(&reference).await?.id),
                None => None,
            };

            let rows = users
                .list_user_skills(Some(UserSkillFilter {
                    user_id,
                    skill_id,
                    search,
                    limit: Some(resolve_list_limit(&state.config, limit)),
                    offset,
                }))
                .await?;
            table::print_list(
                table::model(state, "user_skill")?,
                &rows,
                "Assign one with: folk user assign <user> <skill>",
                json,
            )
        }
    }
}
