//! Status dashboard command.

use anyhow::Result;
use console::style;
use serde::Serialize;

use folksonomy_types::tag::TagState;

use crate::state::AppState;

/// Record counts per approval state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub total: usize,
    pub proposed: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StateCounts {
    pub fn tally<'a>(states: impl IntoIterator<Item = &'a TagState>) -> Self {
        let mut counts = Self::default();
        for state in states {
            counts.total += 1;
            match state {
                TagState::Proposed => counts.proposed += 1,
                TagState::Accepted => counts.accepted += 1,
                TagState::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Serialize)]
pub struct Status {
    pub version: &'static str,
    pub data_dir: String,
    pub tags: StateCounts,
    pub skills: StateCounts,
    pub categories: usize,
    pub users: usize,
    pub user_skills: usize,
}

pub async fn gather(state: &AppState) -> Result<Status> {
    let tags = state.tag_service.list_tags(None).await?;
    let skills = state.skill_service.list_skills(None).await?;
    let categories = state.skill_service.list_categories(None).await?;
    let users = state.user_service.list_users(None).await?;
    let user_skills = state.user_service.list_user_skills(None).await?;

    Ok(Status {
        version: env!("CARGO_PKG_VERSION"),
        data_dir: state.data_dir.display().to_string(),
        tags: StateCounts::tally(tags.iter().map(|t| &t.tag.state)),
        skills: StateCounts::tally(skills.iter().map(|s| &s.tag.state)),
        categories: categories.len(),
        users: users.len(),
        user_skills: user_skills.len(),
    })
}

/// Display the status dashboard: counts per model and state, data dir, version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let status = gather(state).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} Folksonomy v{}", style("#").bold(), status.version);
    println!();
    print_counts("Tags", &status.tags);
    print_counts("Skills", &status.skills);

    println!("  {}", style("── Other ──").dim());
    println!("  Categories:  {}", style(status.categories).bold());
    println!("  Users:       {}", style(status.users).bold());
    println!("  User skills: {}", style(status.user_skills).bold());
    println!();
    println!("  {}", style("── Storage ──").dim());
    println!("  Data dir: {}", style(&status.data_dir).dim());
    println!();
    Ok(())
}

fn print_counts(title: &str, counts: &StateCounts) {
    println!("  {}", style(format!("── {title} ──")).dim());
    println!("  Total:    {}", style(counts.total).bold());
    println!("  Accepted: {}", style(counts.accepted).green());
    println!("  Proposed: {}", style(counts.proposed).yellow());
    if counts.rejected > 0 {
        println!("  Rejected: {}", style(counts.rejected).red());
    }
    println!();
}
